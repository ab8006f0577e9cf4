// ── Dashboard facade ──
//
// Owns the cache store, poller and dispatcher for one backend and exposes
// the operations consumers need.

use std::cmp::Reverse;
use std::sync::Arc;

use homedash_api::transport::{TlsMode, TransportConfig};
use homedash_api::models::WifiNetwork;
use homedash_api::ApiClient;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::command::{ActionDispatcher, ActionEvent, ActionOutcome, ActionState, ActionTarget, Command};
use crate::config::{DashboardConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{Resource, ResourceKey};
use crate::poll::{FetchOutcome, Poller};
use crate::store::{CacheEntry, CacheStore, FetchState};
use crate::stream::EntryStream;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<DashboardInner>`. Nothing runs until
/// [`start`](Self::start) installs the poll schedules; one-shot consumers
/// can skip `start` and use [`load`](Self::load) instead.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    backend: Arc<dyn Backend>,
    store: Arc<CacheStore>,
    poller: Poller,
    dispatcher: ActionDispatcher,
}

impl Dashboard {
    /// Build a dashboard talking to the REST backend in `config`.
    pub fn new(config: DashboardConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = ApiClient::new(config.base_url.clone(), &transport)?;
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    /// Build a dashboard over any [`Backend`].
    pub fn with_backend(config: DashboardConfig, backend: Arc<dyn Backend>) -> Self {
        let store = Arc::new(CacheStore::new());
        let poller = Poller::new(Arc::clone(&store), Arc::clone(&backend));
        let dispatcher = ActionDispatcher::new(Arc::clone(&backend), Arc::clone(&store));
        Self {
            inner: Arc::new(DashboardInner {
                config,
                backend,
                store,
                poller,
                dispatcher,
            }),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.inner.store
    }

    pub fn poller(&self) -> &Poller {
        &self.inner.poller
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Install every configured poll schedule. Must run inside a Tokio
    /// runtime.
    pub fn start(&self) {
        let mut count = 0_usize;
        for (key, schedule) in self.inner.config.polling.iter() {
            self.inner.poller.schedule(key.clone(), *schedule);
            count += 1;
        }
        info!(schedules = count, base_url = %self.inner.config.base_url, "dashboard started");
    }

    /// Stop polling and wait for in-flight fetches.
    pub async fn shutdown(&self) {
        self.inner.poller.shutdown().await;
        debug!("dashboard shut down");
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn read(&self, key: &ResourceKey) -> Option<CacheEntry> {
        self.inner.store.read(key)
    }

    pub fn value<T: Resource + Clone>(&self, key: &ResourceKey) -> Option<T> {
        self.inner.store.value(key)
    }

    pub fn subscribe(&self, key: &ResourceKey) -> EntryStream {
        self.inner.store.subscribe(key)
    }

    /// Force a gated fetch of `key` now. `false` if one was already in
    /// flight.
    pub async fn refresh(&self, key: &ResourceKey) -> bool {
        self.inner.poller.refresh(key).await
    }

    /// Fetch `key` through the cache and return the typed value.
    ///
    /// If another fetch is in flight, waits for it instead of issuing a
    /// second request. A failed fetch returns its error even when an
    /// older value is cached.
    pub async fn load<T: Resource + Clone>(&self, key: &ResourceKey) -> Result<T, CoreError> {
        match self.inner.poller.refresh_outcome(key).await {
            FetchOutcome::Failed(e) => return Err(e),
            FetchOutcome::Fetched => {}
            FetchOutcome::Skipped => {
                let mut stream = self.subscribe(key);
                let entry = stream
                    .wait_for(|e| e.state != FetchState::Loading)
                    .await
                    .ok_or_else(|| CoreError::Internal("cache store dropped".into()))?;
                if entry.state == FetchState::Error {
                    return Err(self.inner.store.last_failure(key).unwrap_or_else(|| {
                        CoreError::Api {
                            message: entry.last_error.unwrap_or_default(),
                            status: None,
                        }
                    }));
                }
            }
        }
        self.value(key).ok_or_else(|| CoreError::Unavailable {
            key: key.to_string(),
        })
    }

    /// Enable or disable polling for `key` (e.g. when the view that shows
    /// it opens or closes).
    pub fn set_enabled(&self, key: &ResourceKey, enabled: bool) {
        self.inner.poller.set_enabled(key, enabled);
    }

    // ── Actions ──────────────────────────────────────────────────────

    pub async fn dispatch(&self, command: Command) -> Result<ActionOutcome, CoreError> {
        self.inner.dispatcher.dispatch(command).await
    }

    pub fn action_state(&self, target: &ActionTarget) -> Option<ActionState> {
        self.inner.dispatcher.action_state(target)
    }

    pub fn action_events(&self) -> broadcast::Receiver<ActionEvent> {
        self.inner.dispatcher.events()
    }

    // ── Uncached reads ───────────────────────────────────────────────

    /// Last `lines` log lines of a service. Never touches the cache.
    pub async fn service_logs(&self, name: &str, lines: u32) -> Result<Vec<String>, CoreError> {
        let logs = self.inner.backend.service_logs(name, lines).await?;
        Ok(tail(logs, lines))
    }

    /// Last `lines` log lines of a container. Never touches the cache.
    pub async fn container_logs(&self, id: &str, lines: u32) -> Result<Vec<String>, CoreError> {
        let logs = self.inner.backend.container_logs(id, lines).await?;
        Ok(tail(logs, lines))
    }

    /// Visible Wi-Fi networks: the one in use first, then strongest first.
    pub async fn wifi_networks(&self) -> Result<Vec<WifiNetwork>, CoreError> {
        let mut networks = self.inner.backend.wifi_networks().await?;
        networks.sort_by_key(|n| (!n.in_use, Reverse(n.signal)));
        Ok(networks)
    }
}

/// Keep the last `lines` entries, preserving order.
fn tail(mut logs: Vec<String>, lines: u32) -> Vec<String> {
    let keep = usize::try_from(lines).unwrap_or(usize::MAX);
    if logs.len() > keep {
        logs.drain(..logs.len() - keep);
    }
    logs
}

fn build_transport(config: &DashboardConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    }
}
