// ── Poll task and gated fetch ──

use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::backend::Backend;
use crate::error::CoreError;
use crate::model::ResourceKey;
use crate::store::CacheStore;

/// Result of one gated refresh attempt.
#[derive(Debug)]
pub(crate) enum FetchOutcome {
    /// Another fetch for the key was already in flight.
    Skipped,
    Fetched,
    /// The fetch ran and failed. The error is also recorded in the cache.
    Failed(CoreError),
}

/// Releases the fetch gate if the fetch future is dropped mid-flight.
struct FetchGuard<'a> {
    store: &'a CacheStore,
    key: &'a ResourceKey,
    armed: bool,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            trace!(key = %self.key, "fetch dropped before completion");
            self.store.abandon_fetch(self.key);
        }
    }
}

/// `beginFetch` → backend fetch → `completeFetch`.
pub(crate) async fn refresh_key(
    store: &CacheStore,
    backend: &dyn Backend,
    key: &ResourceKey,
) -> FetchOutcome {
    if !store.begin_fetch(key) {
        return FetchOutcome::Skipped;
    }
    let mut guard = FetchGuard {
        store,
        key,
        armed: true,
    };
    let result = backend.fetch(key).await;
    guard.armed = false;

    match result {
        Ok(value) => {
            store.complete_fetch(key, Ok(value));
            FetchOutcome::Fetched
        }
        Err(e) => {
            warn!(%key, error = %e, "refresh failed");
            store.complete_fetch(key, Err(e.clone()));
            FetchOutcome::Failed(e)
        }
    }
}

async fn next_tick(ticker: Option<&mut Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Refresh loop for one key.
///
/// Wakes on each interval tick or on the key's refresh signal. The fetch
/// runs outside the `select!`, so cancellation stops the timer but never
/// aborts a fetch that has started. Ticks missed during a slow fetch are
/// skipped, not queued.
pub(crate) async fn poll_loop(
    store: Arc<CacheStore>,
    backend: Arc<dyn Backend>,
    key: ResourceKey,
    interval: Option<Duration>,
    cancel: CancellationToken,
) {
    let signal = store.refresh_signal(&key);
    let mut ticker = interval.map(|period| {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    });
    debug!(%key, ?interval, "poll task started");

    // The first fetch below covers any invalidation made while no task
    // was running; drop its leftover permit.
    let _ = signal.notified().now_or_never();

    // An interval's first tick completes immediately; on-demand keys get
    // their initial fetch here instead.
    if ticker.is_none() && !cancel.is_cancelled() {
        refresh_key(&store, backend.as_ref(), &key).await;
    }

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = signal.notified() => trace!(%key, "out-of-band refresh"),
            () = next_tick(ticker.as_mut()) => {}
        }
        refresh_key(&store, backend.as_ref(), &key).await;
    }

    debug!(%key, "poll task stopped");
}
