// Wire models for the backend REST API.
//
// Field names match the JSON the backend emits. Optional fields are
// absent on hosts without the corresponding hardware (GPU, sensors,
// Wi-Fi adapter).

use std::fmt;

use serde::{Deserialize, Serialize};

// ── System ──────────────────────────────────────────────────────────

/// Host utilization snapshot from `GET /system`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub cpu_percent: f64,
    #[serde(default)]
    pub cpu_per_core: Vec<f64>,
    pub cpu_count: u32,
    pub memory_total: u64,
    pub memory_used: u64,
    pub memory_percent: f64,
    pub disk_total: u64,
    pub disk_used: u64,
    pub disk_percent: f64,
    #[serde(default)]
    pub gpu_name: Option<String>,
    #[serde(default)]
    pub gpu_memory_total: Option<u64>,
    #[serde(default)]
    pub gpu_memory_used: Option<u64>,
    #[serde(default)]
    pub gpu_memory_percent: Option<f64>,
    #[serde(default)]
    pub gpu_utilization: Option<f64>,
    #[serde(default)]
    pub gpu_temperature: Option<f64>,
    #[serde(default)]
    pub cpu_temperature: Option<f64>,
}

/// Host identity from `GET /system/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub hostname: String,
    pub os: String,
    pub local_ip: String,
    pub uptime_seconds: u64,
    pub uptime_formatted: String,
}

/// Power/session actions under `POST /actions/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemAction {
    Restart,
    Shutdown,
    Logout,
}

impl SystemAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Shutdown => "shutdown",
            Self::Logout => "logout",
        }
    }
}

impl fmt::Display for SystemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Services ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
    Error,
    #[serde(other)]
    Unknown,
}

impl ServiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A managed project from `GET /services`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub frontend_port: Option<u16>,
    #[serde(default)]
    pub backend_port: Option<u16>,
    #[serde(default)]
    pub websocket_port: Option<u16>,
    pub status: ServiceStatus,
    #[serde(default)]
    pub frontend_running: bool,
    #[serde(default)]
    pub backend_running: bool,
}

/// Lifecycle verbs shared by services and containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleAction {
    Start,
    Stop,
    Restart,
}

impl LifecycleAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic `{ success, message }` body returned by every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLogs {
    pub logs: Vec<String>,
    pub service: String,
}

// ── Docker ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: String,
    pub state: String,
    #[serde(default)]
    pub ports: Vec<String>,
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerStats {
    pub id: String,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_usage: String,
    pub memory_limit: String,
    pub memory_percent: f64,
    pub network_io: String,
    pub block_io: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerLogs {
    pub logs: Vec<String>,
    pub container: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerInfo {
    pub containers: u32,
    pub containers_running: u32,
    pub containers_paused: u32,
    pub containers_stopped: u32,
    pub images: u32,
    pub server_version: String,
    pub storage_driver: String,
    pub memory_total: u64,
    pub cpus: u32,
}

// ── Network ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub ipv4_address: Option<String>,
    #[serde(default)]
    pub ipv4_netmask: Option<String>,
    #[serde(default)]
    pub ipv6_address: Option<String>,
    pub is_up: bool,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub mtu: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub interface: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errors_in: u64,
    pub errors_out: u64,
    pub drop_in: u64,
    pub drop_out: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub hostname: String,
    #[serde(default)]
    pub interfaces: Vec<NetworkInterface>,
    #[serde(default)]
    pub stats: Vec<NetworkStats>,
    pub connections_count: u64,
    pub established_connections: u64,
}

// ── Settings ────────────────────────────────────────────────────────

/// Full settings object. `PUT /settings` replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_name: String,
    pub wallpaper: String,
    #[serde(default)]
    pub dock_apps: Vec<String>,
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperInfo {
    pub id: String,
    pub name: String,
    pub url: String,
    pub thumbnail_url: String,
    #[serde(default)]
    pub is_default: bool,
}

// ── Wi-Fi ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiNetwork {
    pub ssid: String,
    pub signal: u8,
    #[serde(default)]
    pub security: String,
    #[serde(default)]
    pub in_use: bool,
}

impl WifiNetwork {
    /// Open networks report an empty or `"Open"` security string.
    pub fn is_secured(&self) -> bool {
        !self.security.is_empty() && self.security != "Open"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiStatus {
    pub connected: bool,
    #[serde(default)]
    pub ssid: Option<String>,
    #[serde(default)]
    pub signal: Option<u8>,
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiInfo {
    pub status: WifiStatus,
    #[serde(default)]
    pub networks: Vec<WifiNetwork>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn service_status_unknown_values_decode_as_unknown() {
        let info: ServiceInfo = serde_json::from_value(json!({
            "name": "notes",
            "status": "degraded"
        }))
        .unwrap();
        assert_eq!(info.status, ServiceStatus::Unknown);
        assert!(!info.frontend_running);
    }

    #[test]
    fn metrics_optional_hardware_fields_default_to_none() {
        let metrics: SystemMetrics = serde_json::from_value(json!({
            "cpu_percent": 12.5,
            "cpu_count": 8,
            "memory_total": 16_000_000_000_u64,
            "memory_used": 4_000_000_000_u64,
            "memory_percent": 25.0,
            "disk_total": 500,
            "disk_used": 100,
            "disk_percent": 20.0
        }))
        .unwrap();
        assert!(metrics.cpu_per_core.is_empty());
        assert!(metrics.gpu_name.is_none());
        assert!(metrics.cpu_temperature.is_none());
    }

    #[test]
    fn wifi_security_detection() {
        let open = WifiNetwork {
            ssid: "cafe".into(),
            signal: 40,
            security: "Open".into(),
            in_use: false,
        };
        let wpa = WifiNetwork {
            security: "WPA2".into(),
            ..open.clone()
        };
        assert!(!open.is_secured());
        assert!(wpa.is_secured());
    }
}
