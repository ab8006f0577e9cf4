// ── Runtime dashboard configuration ──
//
// Describes which backend to talk to and how often to refresh each
// resource. Never touches disk: the CLI (via homedash-config) builds a
// `DashboardConfig` and hands it in.

use std::time::Duration;

use url::Url;

use crate::model::ResourceKey;
use crate::poll::PollSchedule;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed reverse proxies).
    DangerAcceptInvalid,
}

/// Configuration for one backend.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Backend root, e.g. `http://localhost:8000`. Requests go to `/api/...`
    /// under it.
    pub base_url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout, enforced by the transport.
    pub timeout: Duration,
    pub polling: PollingConfig,
}

impl DashboardConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(10),
            polling: PollingConfig::default(),
        }
    }
}

/// Per-key poll schedules installed by [`Dashboard::start`](crate::Dashboard::start).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingConfig {
    schedules: Vec<(ResourceKey, PollSchedule)>,
}

impl PollingConfig {
    /// No schedules at all. Every key is fetched on demand only.
    pub fn empty() -> Self {
        Self {
            schedules: Vec::new(),
        }
    }

    /// Insert or replace the schedule for `key`.
    pub fn set(&mut self, key: ResourceKey, schedule: PollSchedule) -> &mut Self {
        if let Some(slot) = self.schedules.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = schedule;
        } else {
            self.schedules.push((key, schedule));
        }
        self
    }

    /// Override the interval of an existing schedule, keeping its enable
    /// flag. Adds an enabled schedule if the key had none.
    pub fn set_interval(&mut self, key: ResourceKey, interval: Duration) -> &mut Self {
        let enabled = self.get(&key).is_none_or(|s| s.enabled);
        self.set(key, PollSchedule::every(interval).with_enabled(enabled))
    }

    pub fn get(&self, key: &ResourceKey) -> Option<PollSchedule> {
        self.schedules
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKey, &PollSchedule)> {
        self.schedules.iter().map(|(k, s)| (k, s))
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        let mut cfg = Self::empty();
        cfg.set(
            ResourceKey::SystemMetrics,
            PollSchedule::every(Duration::from_secs(2)),
        )
        .set(
            ResourceKey::Services,
            PollSchedule::every(Duration::from_secs(5)),
        )
        .set(
            ResourceKey::Containers { all: true },
            PollSchedule::every(Duration::from_secs(5)),
        )
        .set(
            ResourceKey::NetworkStatus,
            PollSchedule::every(Duration::from_secs(5)),
        )
        .set(
            ResourceKey::DockerInfo,
            PollSchedule::every(Duration::from_secs(10)),
        )
        // Only polled while the Wi-Fi view is open.
        .set(
            ResourceKey::WifiInfo,
            PollSchedule::every(Duration::from_secs(5)).with_enabled(false),
        )
        .set(ResourceKey::Settings, PollSchedule::on_demand())
        .set(ResourceKey::Wallpapers, PollSchedule::on_demand())
        .set(ResourceKey::DeviceInfo, PollSchedule::on_demand())
        .set(ResourceKey::WifiStatus, PollSchedule::on_demand());
        cfg
    }
}
