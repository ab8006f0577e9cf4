// ── Reactive cache store ──
//
// Keyed, time-stamped cache of the last known value per resource, with
// per-key fetch gating and push-based change notification.

mod cache;
mod entry;

pub use cache::CacheStore;
pub use entry::{CacheEntry, FetchState};
