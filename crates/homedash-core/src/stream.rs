// ── Per-key entry streams ──
//
// Subscription handle vended by the cache store for one resource key.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::CacheEntry;

/// A subscription to one cache entry.
///
/// Offers point-in-time access plus change notification through
/// [`changed`](Self::changed) or by converting into a `Stream`.
pub struct EntryStream {
    current: CacheEntry,
    receiver: watch::Receiver<CacheEntry>,
}

impl EntryStream {
    pub(crate) fn new(mut receiver: watch::Receiver<CacheEntry>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// The entry as of creation or the last [`changed`](Self::changed).
    pub fn current(&self) -> &CacheEntry {
        &self.current
    }

    /// The latest entry, which may be newer than `current`.
    pub fn latest(&self) -> CacheEntry {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change. `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<CacheEntry> {
        self.receiver.changed().await.ok()?;
        let entry = self.receiver.borrow_and_update().clone();
        self.current = entry.clone();
        Some(entry)
    }

    /// Wait until `predicate` holds for the entry, checking the latest
    /// value first.
    pub async fn wait_for(
        &mut self,
        mut predicate: impl FnMut(&CacheEntry) -> bool,
    ) -> Option<CacheEntry> {
        let entry = self.receiver.wait_for(|e| predicate(e)).await.ok()?.clone();
        self.current = entry.clone();
        Some(entry)
    }

    /// Convert into a `Stream` yielding the current entry, then every
    /// change.
    pub fn into_stream(self) -> EntryWatchStream {
        EntryWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct EntryWatchStream {
    inner: WatchStream<CacheEntry>,
}

impl Stream for EntryWatchStream {
    type Item = CacheEntry;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
