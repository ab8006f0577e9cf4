//! Shared configuration for homedash.
//!
//! TOML profiles loaded with `figment` (defaults, file, `HOMEDASH_`
//! environment) and translated into `homedash_core::DashboardConfig`.
//! The CLI layers its flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use homedash_core::{DashboardConfig, PollingConfig, ResourceKey, TlsVerification};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "HOMEDASH_CONFIG";

/// Backend used when no profile names one.
pub const DEFAULT_BACKEND: &str = "http://localhost:8021";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// The profile named `name`, or the default profile when `name` is
    /// `None`. A missing default profile resolves to a localhost profile;
    /// a missing named profile is an error.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
        if let Some(name) = name {
            return self
                .profiles
                .get(name)
                .cloned()
                .map(|p| (name.to_owned(), p))
                .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() });
        }
        let name = self.default_profile.as_deref().unwrap_or("default");
        let profile = self.profiles.get(name).cloned().unwrap_or_default();
        Ok((name.to_owned(), profile))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_backend() -> String {
    DEFAULT_BACKEND.into()
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Backend root URL (e.g. "http://spark.local:8021").
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override the default insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override the default timeout (seconds).
    pub timeout: Option<u64>,

    /// Poll interval overrides.
    #[serde(default, skip_serializing_if = "PollOverrides::is_empty")]
    pub poll: PollOverrides,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            ca_cert: None,
            insecure: None,
            timeout: None,
            poll: PollOverrides::default(),
        }
    }
}

/// Poll intervals in milliseconds. Unset fields keep the built-in cadence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PollOverrides {
    pub metrics_ms: Option<u64>,
    pub services_ms: Option<u64>,
    pub containers_ms: Option<u64>,
    pub network_ms: Option<u64>,
    pub docker_info_ms: Option<u64>,
    pub wifi_ms: Option<u64>,
}

impl PollOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the overrides on top of `polling`, keeping enable flags.
    pub fn apply(&self, polling: &mut PollingConfig) -> Result<(), ConfigError> {
        let pairs = [
            (ResourceKey::SystemMetrics, self.metrics_ms, "poll.metrics_ms"),
            (ResourceKey::Services, self.services_ms, "poll.services_ms"),
            (
                ResourceKey::Containers { all: true },
                self.containers_ms,
                "poll.containers_ms",
            ),
            (ResourceKey::NetworkStatus, self.network_ms, "poll.network_ms"),
            (ResourceKey::DockerInfo, self.docker_info_ms, "poll.docker_info_ms"),
            (ResourceKey::WifiInfo, self.wifi_ms, "poll.wifi_ms"),
        ];
        for (key, ms, field) in pairs {
            match ms {
                None => {}
                Some(0) => {
                    return Err(ConfigError::Validation {
                        field: field.into(),
                        reason: "interval must be greater than zero".into(),
                    });
                }
                Some(ms) => {
                    polling.set_interval(key, Duration::from_millis(ms));
                }
            }
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `HOMEDASH_CONFIG`, else the platform
/// config directory.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("dev", "homedash", "homedash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("homedash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` (missing file is fine) + `HOMEDASH_` environment.
///
/// Nested keys use a double underscore: `HOMEDASH_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HOMEDASH_").ignore(&["config"]).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(&path, cfg)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `DashboardConfig` from a profile and the global defaults.
pub fn profile_to_dashboard_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<DashboardConfig, ConfigError> {
    let base_url: url::Url = profile
        .backend
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "backend".into(),
            reason: format!("invalid URL: {}", profile.backend),
        })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = profile.timeout.unwrap_or(defaults.timeout);
    if timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least one second".into(),
        });
    }

    let mut polling = PollingConfig::default();
    profile.poll.apply(&mut polling)?;

    Ok(DashboardConfig {
        base_url,
        tls,
        timeout: Duration::from_secs(timeout),
        polling,
    })
}
