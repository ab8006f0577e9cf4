#![allow(clippy::unwrap_used)]
// Poll cadence and invalidation scenarios on a paused clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use homedash_api::models::{ActionResponse, WifiInfo, WifiNetwork, WifiStatus};
use tokio::time::Instant;
use url::Url;

use homedash_core::{
    Backend, Command, CoreError, Dashboard, DashboardConfig, MutationReply, PollSchedule,
    PollingConfig, ResourceKey, ResourceValue,
};

/// Records the (virtual) instant of every fetch per key.
#[derive(Default)]
struct RecordingBackend {
    fetches: Mutex<Vec<(ResourceKey, Instant)>>,
}

impl RecordingBackend {
    fn fetches_of(&self, key: &ResourceKey) -> Vec<Instant> {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, at)| *at)
            .collect()
    }
}

fn wifi_info() -> WifiInfo {
    WifiInfo {
        status: WifiStatus {
            connected: true,
            ssid: Some("home".into()),
            signal: Some(70),
            device: Some("wlan0".into()),
        },
        networks: Vec::new(),
    }
}

impl Backend for RecordingBackend {
    fn fetch<'a>(
        &'a self,
        key: &'a ResourceKey,
    ) -> BoxFuture<'a, Result<ResourceValue, CoreError>> {
        async move {
            self.fetches
                .lock()
                .unwrap()
                .push((key.clone(), Instant::now()));
            Ok(ResourceValue::WifiInfo(wifi_info()))
        }
        .boxed()
    }

    fn execute<'a>(
        &'a self,
        _command: &'a Command,
    ) -> BoxFuture<'a, Result<MutationReply, CoreError>> {
        async {
            Ok(MutationReply::Ack(ActionResponse {
                success: true,
                message: "Scan started".into(),
            }))
        }
        .boxed()
    }

    fn service_logs<'a>(
        &'a self,
        _name: &'a str,
        _lines: u32,
    ) -> BoxFuture<'a, Result<Vec<String>, CoreError>> {
        async { Ok(Vec::new()) }.boxed()
    }

    fn container_logs<'a>(
        &'a self,
        _id: &'a str,
        _lines: u32,
    ) -> BoxFuture<'a, Result<Vec<String>, CoreError>> {
        async { Ok(Vec::new()) }.boxed()
    }

    fn wifi_networks(&self) -> BoxFuture<'_, Result<Vec<WifiNetwork>, CoreError>> {
        async { Ok(Vec::new()) }.boxed()
    }
}

fn dashboard(polling: PollingConfig) -> (Arc<RecordingBackend>, Dashboard) {
    let backend = Arc::new(RecordingBackend::default());
    let mut config = DashboardConfig::new(Url::parse("http://localhost:8000").unwrap());
    config.polling = polling;
    let dash = Dashboard::with_backend(config, Arc::clone(&backend) as Arc<dyn Backend>);
    (backend, dash)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn test_wifi_scan_triggers_out_of_band_refresh() {
    let mut polling = PollingConfig::empty();
    polling.set(
        ResourceKey::WifiInfo,
        PollSchedule::every(Duration::from_secs(5)),
    );
    let (backend, dash) = dashboard(polling);
    let start = Instant::now();

    dash.start();
    settle().await;
    assert_eq!(backend.fetches_of(&ResourceKey::WifiInfo).len(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    let outcome = dash.dispatch(Command::ScanWifi).await.unwrap();
    assert!(outcome.is_success());
    settle().await;

    let fetches = backend.fetches_of(&ResourceKey::WifiInfo);
    assert_eq!(fetches.len(), 2);
    let refreshed_after = fetches[1] - start;
    assert!(
        refreshed_after < Duration::from_secs(3),
        "refresh waited for the interval: {refreshed_after:?}"
    );

    // Regular cadence continues.
    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(backend.fetches_of(&ResourceKey::WifiInfo).len(), 3);

    dash.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_wifi_polling_follows_view_visibility() {
    let (backend, dash) = dashboard(PollingConfig::default());
    let key = ResourceKey::WifiInfo;

    dash.start();
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(backend.fetches_of(&key).is_empty());

    // View opens: immediate fetch, then every 5 s.
    dash.set_enabled(&key, true);
    settle().await;
    assert_eq!(backend.fetches_of(&key).len(), 1);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(backend.fetches_of(&key).len(), 3);

    // View closes: no more fetches.
    dash.set_enabled(&key, false);
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(backend.fetches_of(&key).len(), 3);
    assert!(dash.value::<WifiInfo>(&key).unwrap().status.connected);

    dash.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_default_cadences() {
    let (backend, dash) = dashboard(PollingConfig::default());

    dash.start();
    tokio::time::sleep(Duration::from_millis(10_500)).await;

    // t = 0, 2, 4, 6, 8, 10
    assert_eq!(backend.fetches_of(&ResourceKey::SystemMetrics).len(), 6);
    // t = 0, 5, 10
    assert_eq!(backend.fetches_of(&ResourceKey::Services).len(), 3);
    assert_eq!(
        backend
            .fetches_of(&ResourceKey::Containers { all: true })
            .len(),
        3
    );
    // t = 0, 10
    assert_eq!(backend.fetches_of(&ResourceKey::DockerInfo).len(), 2);
    // on demand: once at start
    assert_eq!(backend.fetches_of(&ResourceKey::Settings).len(), 1);
    assert_eq!(backend.fetches_of(&ResourceKey::DeviceInfo).len(), 1);

    dash.shutdown().await;
}
