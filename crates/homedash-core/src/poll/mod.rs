// ── Poller ──
//
// One cancellable refresh task per resource key, each with its own
// interval and enable gate.

mod task;

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::backend::Backend;
use crate::model::ResourceKey;
use crate::store::CacheStore;

pub(crate) use task::{FetchOutcome, refresh_key};

/// Refresh schedule for one key.
///
/// `interval: None` means the key is fetched when enabled and whenever it
/// is invalidated, never on a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub interval: Option<Duration>,
    pub enabled: bool,
}

impl PollSchedule {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval: Some(interval),
            enabled: true,
        }
    }

    pub fn on_demand() -> Self {
        Self {
            interval: None,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self::on_demand()
    }
}

struct PollTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Per-key scheduled refresh.
///
/// Spawning requires a Tokio runtime. Dropping the poller cancels every
/// task; [`shutdown`](Self::shutdown) also waits for them.
pub struct Poller {
    store: Arc<CacheStore>,
    backend: Arc<dyn Backend>,
    root: CancellationToken,
    schedules: DashMap<ResourceKey, PollSchedule>,
    tasks: DashMap<ResourceKey, PollTask>,
}

impl Poller {
    pub fn new(store: Arc<CacheStore>, backend: Arc<dyn Backend>) -> Self {
        Self {
            store,
            backend,
            root: CancellationToken::new(),
            schedules: DashMap::new(),
            tasks: DashMap::new(),
        }
    }

    /// Install or replace the schedule for `key`.
    ///
    /// Enabling starts a task that fetches immediately. Disabling stops
    /// the timer; a fetch already in flight still completes and is
    /// applied. Re-installing an identical enabled schedule leaves the
    /// running task alone.
    pub fn schedule(&self, key: ResourceKey, schedule: PollSchedule) {
        let previous = self.schedules.insert(key.clone(), schedule);

        if !schedule.enabled {
            self.stop_task(&key);
            return;
        }
        let unchanged = previous.is_some_and(|p| p.enabled && p.interval == schedule.interval);
        if unchanged && self.tasks.contains_key(&key) {
            return;
        }
        self.spawn_task(key, schedule.interval);
    }

    /// Flip the enable gate of `key`, keeping its interval.
    pub fn set_enabled(&self, key: &ResourceKey, enabled: bool) {
        let current = self.schedule_of(key).unwrap_or_default();
        self.schedule(key.clone(), current.with_enabled(enabled));
    }

    pub fn schedule_of(&self, key: &ResourceKey) -> Option<PollSchedule> {
        self.schedules.get(key).map(|s| *s)
    }

    /// `true` while a refresh task for `key` is installed.
    pub fn is_polling(&self, key: &ResourceKey) -> bool {
        self.tasks.contains_key(key)
    }

    /// One-off gated fetch of `key`, independent of its schedule.
    ///
    /// Returns `false` if a fetch for the key was already in flight.
    pub async fn refresh(&self, key: &ResourceKey) -> bool {
        !matches!(
            refresh_key(&self.store, self.backend.as_ref(), key).await,
            FetchOutcome::Skipped
        )
    }

    pub(crate) async fn refresh_outcome(&self, key: &ResourceKey) -> FetchOutcome {
        refresh_key(&self.store, self.backend.as_ref(), key).await
    }

    /// Cancel every task and wait for in-flight fetches to finish.
    pub async fn shutdown(&self) {
        self.root.cancel();
        let keys: Vec<ResourceKey> = self.tasks.iter().map(|r| r.key().clone()).collect();
        for key in keys {
            if let Some((_, task)) = self.tasks.remove(&key) {
                let _ = task.handle.await;
            }
        }
        debug!("poller shut down");
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn spawn_task(&self, key: ResourceKey, interval: Option<Duration>) {
        let cancel = self.root.child_token();
        let handle = tokio::spawn(task::poll_loop(
            Arc::clone(&self.store),
            Arc::clone(&self.backend),
            key.clone(),
            interval,
            cancel.clone(),
        ));
        if let Some(old) = self.tasks.insert(key, PollTask { cancel, handle }) {
            old.cancel.cancel();
        }
    }

    fn stop_task(&self, key: &ResourceKey) {
        if let Some((_, task)) = self.tasks.remove(key) {
            debug!(%key, "stopping poll task");
            task.cancel.cancel();
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures_util::FutureExt;
    use futures_util::future::BoxFuture;
    use homedash_api::models::WifiNetwork;

    use super::*;
    use crate::backend::MutationReply;
    use crate::command::Command;
    use crate::error::CoreError;
    use crate::model::ResourceValue;
    use crate::store::FetchState;

    /// Counts fetches; each takes `delay` of (virtual) time.
    #[derive(Default)]
    struct SlowBackend {
        delay: Duration,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl SlowBackend {
        fn with_delay(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                delay,
                ..Self::default()
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Backend for SlowBackend {
        fn fetch<'a>(
            &'a self,
            _key: &'a ResourceKey,
        ) -> BoxFuture<'a, Result<ResourceValue, CoreError>> {
            async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(self.delay).await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(ResourceValue::Services(Vec::new()))
            }
            .boxed()
        }

        fn execute<'a>(
            &'a self,
            _command: &'a Command,
        ) -> BoxFuture<'a, Result<MutationReply, CoreError>> {
            async { Err(CoreError::Internal("read-only backend".into())) }.boxed()
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

    fn poller(backend: &Arc<SlowBackend>) -> (Arc<CacheStore>, Poller) {
        let store = Arc::new(CacheStore::new());
        let backend: Arc<dyn Backend> = backend.clone();
        (Arc::clone(&store), Poller::new(store, backend))
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn polls_at_interval_starting_immediately() {
        let backend = SlowBackend::with_delay(Duration::ZERO);
        let (_store, poller) = poller(&backend);

        poller.schedule(ResourceKey::Services, PollSchedule::every(Duration::from_secs(5)));
        settle().await;
        assert_eq!(backend.calls(), 1);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(backend.calls(), 3);
        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_never_overlaps_itself() {
        let backend = SlowBackend::with_delay(Duration::from_secs(12));
        let (_store, poller) = poller(&backend);

        poller.schedule(ResourceKey::Services, PollSchedule::every(Duration::from_secs(5)));
        settle().await;
        assert!(!poller.refresh(&ResourceKey::Services).await);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(backend.max_in_flight.load(Ordering::SeqCst), 1);
        assert!(backend.calls() <= 3);
        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn disabling_keeps_in_flight_result() {
        let backend = SlowBackend::with_delay(Duration::from_secs(1));
        let (store, poller) = poller(&backend);
        let key = ResourceKey::Services;

        poller.schedule(key.clone(), PollSchedule::every(Duration::from_secs(5)));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(store.read(&key).unwrap().is_loading());

        poller.set_enabled(&key, false);
        assert!(!poller.is_polling(&key));
        tokio::time::sleep(Duration::from_secs(20)).await;

        assert_eq!(backend.calls(), 1);
        assert_eq!(store.read(&key).unwrap().state, FetchState::Success);
        assert_eq!(
            poller.schedule_of(&key),
            Some(PollSchedule::every(Duration::from_secs(5)).with_enabled(false))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn reenabling_fetches_immediately() {
        let backend = SlowBackend::with_delay(Duration::ZERO);
        let (_store, poller) = poller(&backend);
        let key = ResourceKey::WifiInfo;

        poller.schedule(
            key.clone(),
            PollSchedule::every(Duration::from_secs(5)).with_enabled(false),
        );
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(backend.calls(), 0);

        poller.set_enabled(&key, true);
        settle().await;
        assert_eq!(backend.calls(), 1);
        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn invalidation_while_disabled_fetches_once_on_reenable() {
        let backend = SlowBackend::with_delay(Duration::ZERO);
        let (store, poller) = poller(&backend);
        let key = ResourceKey::WifiInfo;

        poller.schedule(key.clone(), PollSchedule::every(Duration::from_secs(5)));
        settle().await;
        assert_eq!(backend.calls(), 1);

        poller.set_enabled(&key, false);
        settle().await;
        assert!(store.invalidate(&key));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(backend.calls(), 1);

        poller.set_enabled(&key, true);
        settle().await;
        assert_eq!(backend.calls(), 2);
        assert!(!store.read(&key).unwrap().stale);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(backend.calls(), 2);
        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn on_demand_key_refreshes_only_when_invalidated() {
        let backend = SlowBackend::with_delay(Duration::ZERO);
        let (store, poller) = poller(&backend);
        let key = ResourceKey::Settings;

        poller.schedule(key.clone(), PollSchedule::on_demand());
        settle().await;
        assert_eq!(backend.calls(), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(backend.calls(), 1);

        assert!(store.invalidate(&key));
        settle().await;
        assert_eq!(backend.calls(), 2);
        assert!(!store.read(&key).unwrap().stale);
        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn identical_schedule_does_not_restart_task() {
        let backend = SlowBackend::with_delay(Duration::ZERO);
        let (_store, poller) = poller(&backend);
        let key = ResourceKey::DockerInfo;

        poller.schedule(key.clone(), PollSchedule::every(Duration::from_secs(10)));
        settle().await;
        poller.schedule(key.clone(), PollSchedule::every(Duration::from_secs(10)));
        settle().await;
        assert_eq!(backend.calls(), 1);
        poller.shutdown().await;
        assert!(!poller.is_polling(&key));
    }
}
