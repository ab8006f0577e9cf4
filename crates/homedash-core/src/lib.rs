//! Resource synchronization and control layer between `homedash-api` and
//! its consumers.
//!
//! - **[`CacheStore`]** keeps the last known value per [`ResourceKey`],
//!   gates fetches so at most one is in flight per key, and exposes a
//!   `watch`-backed [`EntryStream`] per key.
//! - **[`Poller`]** runs one cancellable refresh task per key with its own
//!   interval and enable gate. Invalidation wakes the task immediately.
//! - **[`ActionDispatcher`]** executes a [`Command`], rejects double
//!   submits per target, and invalidates the affected resource kinds
//!   before reporting success.
//! - **[`status`]** turns raw metrics and states into severity and
//!   connectivity judgments.
//! - **[`Dashboard`]** ties the above to a [`Backend`] (normally the
//!   REST [`ApiClient`](homedash_api::ApiClient)).

pub mod backend;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod poll;
pub mod status;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{Backend, MutationReply};
pub use command::{
    ActionDispatcher, ActionEvent, ActionOutcome, ActionState, ActionTarget, Command, Verb,
};
pub use config::{DashboardConfig, PollingConfig, TlsVerification};
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use model::{
    ContainerDescriptor, ContainerState, Resource, ResourceKey, ResourceKind, ResourceValue,
    ServiceDescriptor,
};
pub use poll::{PollSchedule, Poller};
pub use status::{Connectivity, Severity};
pub use store::{CacheEntry, CacheStore, FetchState};
pub use stream::EntryStream;

// Wire types that pass through the core unchanged.
pub use homedash_api::models::{
    ContainerStats, DeviceInfo, DockerInfo, NetworkInterface, NetworkStats, NetworkStatus,
    ServiceStatus, SystemMetrics, UserSettings, WallpaperInfo, WifiInfo, WifiNetwork, WifiStatus,
};
pub use homedash_api::{LifecycleAction, SystemAction};
