#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use homedash_api::models::{ServiceStatus, UserSettings};
use homedash_api::{ApiClient, Error, LifecycleAction, SystemAction};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn metrics_body() -> serde_json::Value {
    json!({
        "cpu_percent": 42.5,
        "cpu_per_core": [40.0, 45.0],
        "cpu_count": 2,
        "memory_total": 8_589_934_592_u64,
        "memory_used": 4_294_967_296_u64,
        "memory_percent": 50.0,
        "disk_total": 256_000_000_000_u64,
        "disk_used": 64_000_000_000_u64,
        "disk_percent": 25.0,
        "cpu_temperature": 55.0
    })
}

// ── System ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_system_metrics() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/system"))
        .respond_with(ResponseTemplate::new(200).set_body_json(metrics_body()))
        .mount(&server)
        .await;

    let metrics = client.get_system_metrics().await.unwrap();

    assert_eq!(metrics.cpu_count, 2);
    assert_eq!(metrics.cpu_per_core, vec![40.0, 45.0]);
    assert_eq!(metrics.cpu_temperature, Some(55.0));
    assert!(metrics.gpu_name.is_none());
}

#[tokio::test]
async fn test_system_action_posts_to_actions_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/actions/shutdown"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Shutting down" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.system_action(SystemAction::Shutdown).await.unwrap();
    assert!(resp.success);
    assert_eq!(resp.message, "Shutting down");
}

// ── Services ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_services() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "notes",
                "description": "Note taking",
                "icon": "📝",
                "path": "/srv/notes",
                "frontend_port": 3000,
                "backend_port": 8001,
                "status": "stopped",
                "frontend_running": false,
                "backend_running": false
            }
        ])))
        .mount(&server)
        .await;

    let services = client.list_services().await.unwrap();

    assert_eq!(services.len(), 1);
    assert_eq!(services[0].name, "notes");
    assert_eq!(services[0].status, ServiceStatus::Stopped);
    assert_eq!(services[0].frontend_port, Some(3000));
    assert_eq!(services[0].websocket_port, None);
}

#[tokio::test]
async fn test_service_action_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/services/notes/restart"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Restarted notes" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .service_action("notes", LifecycleAction::Restart)
        .await
        .unwrap();
    assert_eq!(resp.message, "Restarted notes");
}

#[tokio::test]
async fn test_service_logs_sends_line_count() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/services/notes/logs"))
        .and(query_param("lines", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": ["booting", "ready"],
            "service": "notes"
        })))
        .mount(&server)
        .await;

    let logs = client.service_logs("notes", 50).await.unwrap();
    assert_eq!(logs.logs, vec!["booting", "ready"]);
}

#[tokio::test]
async fn test_http_error_surfaces_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/services/ghost/start"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Service ghost not found" })),
        )
        .mount(&server)
        .await;

    let err = client
        .service_action("ghost", LifecycleAction::Start)
        .await
        .unwrap_err();

    assert!(err.is_not_found(), "expected 404, got: {err:?}");
    assert_eq!(err.message(), "Service ghost not found");
}

#[tokio::test]
async fn test_http_error_without_body_uses_fallback() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client.list_services().await.unwrap_err();

    assert!(matches!(err, Error::Http { status: 502, detail: None, .. }));
    assert_eq!(err.message(), "Request failed");
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "not": "a list" })))
        .mount(&server)
        .await;

    let err = client.list_services().await.unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { .. }),
        "expected Deserialization error, got: {err:?}"
    );
}

// ── Docker ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_containers_passes_all_flag() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/docker/containers"))
        .and(query_param("all", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "abc123def456",
                "name": "redis",
                "image": "redis:7",
                "status": "Exited (0) 2 hours ago",
                "state": "exited",
                "ports": [],
                "created": "2026-01-01T00:00:00Z"
            }
        ])))
        .mount(&server)
        .await;

    let containers = client.list_containers(true).await.unwrap();
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].state, "exited");
}

#[tokio::test]
async fn test_container_logs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/docker/containers/abc123/logs"))
        .and(query_param("lines", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": ["a", "b", "c"],
            "container": "abc123"
        })))
        .mount(&server)
        .await;

    let logs = client.container_logs("abc123", 100).await.unwrap();
    assert_eq!(logs.logs.len(), 3);
    assert_eq!(logs.container, "abc123");
}

// ── Settings ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_settings_sends_full_object() {
    let (server, client) = setup().await;

    let settings = UserSettings {
        user_name: "ada".into(),
        wallpaper: "mountains".into(),
        dock_apps: vec!["notes".into()],
        theme: "dark".into(),
    };

    Mock::given(method("PUT"))
        .and(path("/api/settings"))
        .and(body_json(json!({
            "user_name": "ada",
            "wallpaper": "mountains",
            "dock_apps": ["notes"],
            "theme": "dark"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Settings updated" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.update_settings(&settings).await.unwrap();
    assert!(resp.success);
}

#[tokio::test]
async fn test_upload_wallpaper_is_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/settings/wallpapers/upload"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "beach",
            "name": "beach.png",
            "url": "/wallpapers/beach.png",
            "thumbnail_url": "/wallpapers/thumbs/beach.png",
            "is_default": false
        })))
        .mount(&server)
        .await;

    let info = client
        .upload_wallpaper("beach.png", Bytes::from_static(b"\x89PNG"))
        .await
        .unwrap();
    assert_eq!(info.id, "beach");
    assert!(!info.is_default);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn test_upload_failure_uses_upload_fallback() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/settings/wallpapers/upload"))
        .respond_with(ResponseTemplate::new(413))
        .mount(&server)
        .await;

    let err = client
        .upload_wallpaper("huge.png", Bytes::from_static(b"data"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Upload failed");
}

#[tokio::test]
async fn test_delete_wallpaper() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/settings/wallpapers/beach"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Deleted" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.delete_wallpaper("beach").await.unwrap();
}

// ── Wi-Fi ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_wifi_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/wifi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": { "connected": true, "ssid": "home", "signal": 72, "device": "wlan0" },
            "networks": [
                { "ssid": "home", "signal": 72, "security": "WPA2", "in_use": true },
                { "ssid": "cafe", "signal": 20, "security": "", "in_use": false }
            ]
        })))
        .mount(&server)
        .await;

    let info = client.get_wifi_info().await.unwrap();
    assert!(info.status.connected);
    assert_eq!(info.status.ssid.as_deref(), Some("home"));
    assert_eq!(info.networks.len(), 2);
    assert!(!info.networks[1].is_secured());
}

#[tokio::test]
async fn test_scan_wifi() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/wifi/scan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Scan started" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.scan_wifi().await.unwrap();
    assert_eq!(resp.message, "Scan started");
}
