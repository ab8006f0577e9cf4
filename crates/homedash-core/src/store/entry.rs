// ── Cache entries ──

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{Resource, ResourceKey, ResourceValue};

/// Fetch lifecycle of one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchState {
    /// Never fetched.
    Idle,
    Loading,
    Success,
    /// Last fetch failed. Any earlier value is retained.
    Error,
}

/// Last known state of one resource.
///
/// `value` survives failed fetches and invalidation: stale data is always
/// preferred over no data.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: ResourceKey,
    pub value: Option<Arc<ResourceValue>>,
    /// Time of the last successful fetch.
    pub fetched_at: Option<DateTime<Utc>>,
    pub state: FetchState,
    pub last_error: Option<String>,
    /// Set by invalidation, cleared by the next successful fetch.
    pub stale: bool,
}

impl CacheEntry {
    pub(crate) fn new(key: ResourceKey) -> Self {
        Self {
            key,
            value: None,
            fetched_at: None,
            state: FetchState::Idle,
            last_error: None,
            stale: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    /// Typed view of the value, if present and of the requested kind.
    pub fn get<T: Resource>(&self) -> Option<&T> {
        self.value.as_deref().and_then(T::from_value)
    }

    /// Time since the last successful fetch.
    pub fn age(&self) -> Option<chrono::Duration> {
        self.fetched_at.map(|t| Utc::now() - t)
    }

    /// State to fall back to when a fetch is abandoned before completing.
    pub(crate) fn settled_state(&self) -> FetchState {
        if self.last_error.is_some() {
            FetchState::Error
        } else if self.value.is_some() {
            FetchState::Success
        } else {
            FetchState::Idle
        }
    }
}
