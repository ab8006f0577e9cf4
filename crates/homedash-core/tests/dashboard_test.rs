#![allow(clippy::unwrap_used)]
// End-to-end tests for `Dashboard` against a wiremock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use homedash_core::{
    ActionOutcome, ActionTarget, Command, CoreError, Dashboard, DashboardConfig, FetchState,
    LifecycleAction, PollSchedule, PollingConfig, ResourceKey, ServiceDescriptor, ServiceStatus,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn service(status: &str) -> serde_json::Value {
    json!([{
        "name": "notes",
        "description": "Note taking",
        "icon": "📝",
        "path": "/srv/notes",
        "frontend_port": 3000,
        "backend_port": 8001,
        "status": status,
        "frontend_running": status == "running",
        "backend_running": status == "running"
    }])
}

fn containers() -> serde_json::Value {
    json!([{
        "id": "abc123",
        "name": "redis",
        "image": "redis:7",
        "status": "Up 2 hours",
        "state": "running",
        "ports": ["6379/tcp"],
        "created": "2026-01-01T00:00:00Z"
    }])
}

fn dashboard(server: &MockServer, polling: PollingConfig) -> Dashboard {
    let mut config = DashboardConfig::new(Url::parse(&server.uri()).unwrap());
    config.polling = polling;
    config.timeout = Duration::from_secs(5);
    Dashboard::new(config).unwrap()
}

async fn within<F: std::future::Future>(fut: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(5), fut)
        .await
        .expect("timed out")
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_start_service_refreshes_services_after_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(service("stopped")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(service("running")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/docker/containers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(containers()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/services/notes/start"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Started notes" }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut polling = PollingConfig::empty();
    polling.set(ResourceKey::Services, PollSchedule::on_demand());
    let dash = dashboard(&server, polling);
    let containers_key = ResourceKey::Containers { all: true };
    dash.load::<Vec<homedash_core::ContainerDescriptor>>(&containers_key)
        .await
        .unwrap();
    let containers_before = dash.read(&containers_key).unwrap();

    let mut services = dash.subscribe(&ResourceKey::Services);
    dash.start();
    let entry = within(services.wait_for(|e| e.state == FetchState::Success))
        .await
        .unwrap();
    let list = entry.get::<Vec<ServiceDescriptor>>().unwrap();
    assert_eq!(list[0].status, ServiceStatus::Stopped);

    let first = tokio::spawn({
        let dash = dash.clone();
        async move {
            dash.dispatch(Command::service("notes", LifecycleAction::Start))
                .await
        }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let target = ActionTarget::Service("notes".into());
    assert!(dash.action_state(&target).unwrap().is_pending());
    let second = dash
        .dispatch(Command::service("notes", LifecycleAction::Start))
        .await;
    assert!(matches!(second, Err(CoreError::ActionPending { .. })));

    let outcome = first.await.unwrap().unwrap();
    assert!(matches!(outcome, ActionOutcome::Succeeded { ref message } if message == "Started notes"));

    let entry = within(services.wait_for(|e| {
        e.get::<Vec<ServiceDescriptor>>()
            .is_some_and(|s| s[0].is_running())
    }))
    .await
    .unwrap();
    assert!(!entry.stale);
    assert_eq!(dash.read(&containers_key).unwrap(), containers_before);

    dash.shutdown().await;
}

#[tokio::test]
async fn test_failed_action_leaves_cache_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/docker/containers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(containers()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/docker/containers/abc123/stop"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "Docker daemon not running" })),
        )
        .mount(&server)
        .await;

    let dash = dashboard(&server, PollingConfig::empty());
    let key = ResourceKey::Containers { all: true };
    dash.load::<Vec<homedash_core::ContainerDescriptor>>(&key)
        .await
        .unwrap();
    let before = dash.read(&key).unwrap();

    let outcome = dash
        .dispatch(Command::container("abc123", LifecycleAction::Stop))
        .await
        .unwrap();

    match outcome {
        ActionOutcome::Failed { message, error } => {
            assert_eq!(message, "Docker daemon not running");
            assert_eq!(error.unwrap().status(), Some(500));
        }
        ActionOutcome::Succeeded { .. } => panic!("expected failure"),
    }
    assert_eq!(dash.read(&key).unwrap(), before);
}

#[tokio::test]
async fn test_container_logs_are_truncated_and_bypass_cache() {
    let server = MockServer::start().await;
    let lines: Vec<String> = (1..=60).map(|i| format!("log line {i}")).collect();

    Mock::given(method("GET"))
        .and(path("/api/docker/containers/abc123/logs"))
        .and(query_param("lines", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": lines,
            "container": "abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dash = dashboard(&server, PollingConfig::empty());
    let logs = dash.container_logs("abc123", 50).await.unwrap();

    assert_eq!(logs.len(), 50);
    assert_eq!(logs.first().unwrap(), "log line 11");
    assert_eq!(logs.last().unwrap(), "log line 60");
    assert!(dash.read(&ResourceKey::Containers { all: true }).is_none());
    assert!(dash.store().keys().is_empty());
}

#[tokio::test]
async fn test_fetch_error_keeps_stale_value() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(service("running")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dash = dashboard(&server, PollingConfig::empty());
    dash.load::<Vec<ServiceDescriptor>>(&ResourceKey::Services)
        .await
        .unwrap();

    let err = dash
        .load::<Vec<ServiceDescriptor>>(&ResourceKey::Services)
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Request failed");

    let entry = dash.read(&ResourceKey::Services).unwrap();
    assert_eq!(entry.state, FetchState::Error);
    assert_eq!(entry.last_error.as_deref(), Some("Request failed"));
    assert!(entry.get::<Vec<ServiceDescriptor>>().unwrap()[0].is_running());
}

#[tokio::test]
async fn test_wifi_networks_put_network_in_use_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/wifi/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ssid": "weak", "signal": 20, "security": "WPA2", "in_use": false },
            { "ssid": "home", "signal": 40, "security": "WPA2", "in_use": true },
            { "ssid": "neighbor", "signal": 90, "security": "", "in_use": false }
        ])))
        .mount(&server)
        .await;

    let dash = dashboard(&server, PollingConfig::empty());
    let networks = dash.wifi_networks().await.unwrap();
    let ssids: Vec<_> = networks.iter().map(|n| n.ssid.as_str()).collect();
    assert_eq!(ssids, vec!["home", "neighbor", "weak"]);
}

#[tokio::test]
async fn test_load_waiting_on_failed_fetch_keeps_error_kind() {
    let server = MockServer::start().await;
    let dash = dashboard(&server, PollingConfig::empty());
    let key = ResourceKey::Services;

    // Another caller holds the fetch gate.
    assert!(dash.store().begin_fetch(&key));

    let waiter = {
        let dash = dash.clone();
        let key = key.clone();
        tokio::spawn(async move { dash.load::<Vec<ServiceDescriptor>>(&key).await })
    };
    // Let the waiter find the gate taken and subscribe.
    tokio::time::sleep(Duration::from_millis(50)).await;

    dash.store().complete_fetch(
        &key,
        Err(CoreError::ConnectionFailed {
            url: server.uri(),
            reason: "connection refused".into(),
        }),
    );

    let err = within(waiter).await.unwrap().unwrap_err();
    assert!(
        matches!(err, CoreError::ConnectionFailed { .. }),
        "unexpected error: {err:?}"
    );
}
