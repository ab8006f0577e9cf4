// ── Central cache store ──
//
// One slot per resource key. Each slot owns a `watch` sender holding the
// entry (so readers can subscribe per key) and a `Notify` that wakes the
// key's poll task for an out-of-band refresh.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use tokio::sync::{Notify, watch};
use tracing::{debug, trace};

use super::entry::{CacheEntry, FetchState};
use crate::error::CoreError;
use crate::model::{Resource, ResourceKey, ResourceKind, ResourceValue};
use crate::stream::EntryStream;

struct Slot {
    entry: watch::Sender<CacheEntry>,
    refresh: Arc<Notify>,
}

impl Slot {
    fn new(key: ResourceKey) -> Self {
        let (entry, _) = watch::channel(CacheEntry::new(key));
        Self {
            entry,
            refresh: Arc::new(Notify::new()),
        }
    }

    fn mark_stale(&self) {
        self.entry.send_modify(|e| e.stale = true);
        // Stores a permit when the poll task is busy, so an invalidation
        // that lands mid-fetch still yields one more fetch afterwards.
        self.refresh.notify_one();
    }
}

/// Keyed cache of the last known value per resource.
///
/// The only mutable structure shared between the poller and the
/// dispatcher. Every write goes through [`begin_fetch`](Self::begin_fetch),
/// [`complete_fetch`](Self::complete_fetch) or
/// [`invalidate`](Self::invalidate); nothing else touches an entry.
#[derive(Default)]
pub struct CacheStore {
    slots: DashMap<ResourceKey, Slot>,
    /// Typed error of the last failed fetch per key. The entry only
    /// carries its message.
    failures: DashMap<ResourceKey, CoreError>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &ResourceKey) -> Ref<'_, ResourceKey, Slot> {
        if let Some(slot) = self.slots.get(key) {
            return slot;
        }
        self.slots
            .entry(key.clone())
            .or_insert_with(|| Slot::new(key.clone()))
            .downgrade()
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current entry for `key`, or `None` if the key was never touched.
    pub fn read(&self, key: &ResourceKey) -> Option<CacheEntry> {
        self.slots.get(key).map(|s| s.entry.borrow().clone())
    }

    /// Typed copy of the cached value.
    pub fn value<T: Resource + Clone>(&self, key: &ResourceKey) -> Option<T> {
        let slot = self.slots.get(key)?;
        let entry = slot.entry.borrow();
        entry.get::<T>().cloned()
    }

    /// `true` if the key holds a non-stale value fetched within `max_age`.
    pub fn is_fresh(&self, key: &ResourceKey, max_age: Duration) -> bool {
        let Some(slot) = self.slots.get(key) else {
            return false;
        };
        let entry = slot.entry.borrow();
        match (entry.stale, entry.age()) {
            (false, Some(age)) => age.to_std().is_ok_and(|age| age <= max_age),
            _ => false,
        }
    }

    /// Every key that has a slot.
    pub fn keys(&self) -> Vec<ResourceKey> {
        self.slots.iter().map(|r| r.key().clone()).collect()
    }

    /// Subscribe to changes of one entry. Creates the slot if needed.
    pub fn subscribe(&self, key: &ResourceKey) -> EntryStream {
        EntryStream::new(self.slot(key).entry.subscribe())
    }

    // ── Fetch gating ─────────────────────────────────────────────────

    /// Move the entry to `Loading` unless it already is.
    ///
    /// Returns `true` if the caller should perform the fetch. The check
    /// and the transition happen under the watch channel's write lock, so
    /// of any number of concurrent callers exactly one gets `true`.
    pub fn begin_fetch(&self, key: &ResourceKey) -> bool {
        let granted = self.slot(key).entry.send_if_modified(|e| {
            if e.state == FetchState::Loading {
                false
            } else {
                e.state = FetchState::Loading;
                true
            }
        });
        if !granted {
            trace!(%key, "fetch already in flight");
        }
        granted
    }

    /// Record the result of a fetch.
    ///
    /// Success replaces the value and timestamp and clears any error and
    /// the stale mark. Failure keeps the last good value and records the
    /// message. Applied even if the entry is no longer `Loading`.
    pub fn complete_fetch(&self, key: &ResourceKey, result: Result<ResourceValue, CoreError>) {
        let slot = self.slot(key);
        match result {
            Ok(value) => {
                self.failures.remove(key);
                slot.entry.send_modify(|e| {
                    e.value = Some(Arc::new(value));
                    e.fetched_at = Some(Utc::now());
                    e.state = FetchState::Success;
                    e.last_error = None;
                    e.stale = false;
                });
                trace!(%key, "fetch complete");
            }
            Err(error) => {
                debug!(%key, %error, "fetch failed, keeping last value");
                let message = error.message();
                // Recorded before the entry flips to `Error` so observers
                // of that transition can read it.
                self.failures.insert(key.clone(), error);
                slot.entry.send_modify(|e| {
                    e.state = FetchState::Error;
                    e.last_error = Some(message);
                });
            }
        }
    }

    /// Typed error of the last fetch of `key`, if it failed.
    pub fn last_failure(&self, key: &ResourceKey) -> Option<CoreError> {
        self.failures.get(key).map(|e| e.value().clone())
    }

    /// Release the gate of a fetch that ended without a result.
    pub(crate) fn abandon_fetch(&self, key: &ResourceKey) {
        if let Some(slot) = self.slots.get(key) {
            slot.entry.send_if_modified(|e| {
                if e.state == FetchState::Loading {
                    e.state = e.settled_state();
                    true
                } else {
                    false
                }
            });
        }
    }

    // ── Invalidation ─────────────────────────────────────────────────

    /// Mark `key` stale and request an immediate refresh.
    ///
    /// The value is kept. Returns `false` if the key was never cached.
    pub fn invalidate(&self, key: &ResourceKey) -> bool {
        let Some(slot) = self.slots.get(key) else {
            return false;
        };
        debug!(%key, "invalidating");
        slot.mark_stale();
        true
    }

    /// Invalidate every cached key of `kind`. Returns the keys touched.
    pub fn invalidate_kind(&self, kind: ResourceKind) -> Vec<ResourceKey> {
        let mut touched = Vec::new();
        for slot in &self.slots {
            if slot.key().kind() == kind {
                slot.value().mark_stale();
                touched.push(slot.key().clone());
            }
        }
        debug!(%kind, keys = touched.len(), "invalidated kind");
        touched
    }

    /// Signal used to wake the poll task of `key`.
    pub(crate) fn refresh_signal(&self, key: &ResourceKey) -> Arc<Notify> {
        Arc::clone(&self.slot(key).refresh)
    }
}
