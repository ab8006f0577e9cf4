// homedash-api: Async Rust client for the homedash backend REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod docker;
mod network;
mod services;
mod settings;
mod system;
mod wifi;

pub use client::ApiClient;
pub use error::Error;
pub use models::{LifecycleAction, SystemAction};
pub use transport::{TlsMode, TransportConfig};
