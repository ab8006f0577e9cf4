// ── Status deriver ──
//
// Pure mappings from raw metrics and states to judgments a UI can color.
// Every function is total over its input domain.

use std::fmt;

use homedash_api::models::{NetworkInterface, SystemMetrics, WifiStatus};
use serde::Serialize;

use crate::model::{ContainerDescriptor, ServiceDescriptor};

/// Utilization severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-threshold classifier: `<= warn_above` is normal, `<= critical_above`
/// is a warning, anything higher is critical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warn_above: f64,
    pub critical_above: f64,
}

/// CPU, memory, disk and GPU percentages.
pub const PERCENT_THRESHOLDS: Thresholds = Thresholds {
    warn_above: 50.0,
    critical_above: 80.0,
};

/// Temperatures in °C.
pub const TEMPERATURE_THRESHOLDS: Thresholds = Thresholds {
    warn_above: 60.0,
    critical_above: 80.0,
};

impl Thresholds {
    /// NaN classifies as `Normal`.
    pub fn classify(&self, value: f64) -> Severity {
        if value > self.critical_above {
            Severity::Critical
        } else if value > self.warn_above {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

pub fn severity(percent: f64) -> Severity {
    PERCENT_THRESHOLDS.classify(percent)
}

pub fn temperature_severity(celsius: f64) -> Severity {
    TEMPERATURE_THRESHOLDS.classify(celsius)
}

/// Raw status string check used by the backend for services and
/// containers alike.
pub fn is_running(status: &str) -> bool {
    status == "running"
}

/// Wi-Fi signal strength (0-100) as 1-4 bars.
pub fn signal_bars(signal: u8) -> u8 {
    match signal {
        76.. => 4,
        51..=75 => 3,
        26..=50 => 2,
        _ => 1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl From<bool> for Connectivity {
    fn from(up: bool) -> Self {
        if up {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }
}

impl From<&WifiStatus> for Connectivity {
    fn from(status: &WifiStatus) -> Self {
        status.connected.into()
    }
}

impl From<&NetworkInterface> for Connectivity {
    fn from(iface: &NetworkInterface) -> Self {
        iface.is_up.into()
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        })
    }
}

// ── Aggregate judgments ─────────────────────────────────────────────

/// Severities for one metrics snapshot. Hardware-dependent readings are
/// `None` when the host does not report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsJudgment {
    pub cpu: Severity,
    pub memory: Severity,
    pub disk: Severity,
    pub cpu_temperature: Option<Severity>,
    pub gpu_utilization: Option<Severity>,
    pub gpu_memory: Option<Severity>,
    pub gpu_temperature: Option<Severity>,
}

impl MetricsJudgment {
    /// Highest severity across every reading.
    pub fn worst(&self) -> Severity {
        [
            Some(self.cpu),
            Some(self.memory),
            Some(self.disk),
            self.cpu_temperature,
            self.gpu_utilization,
            self.gpu_memory,
            self.gpu_temperature,
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(Severity::Normal)
    }
}

impl From<&SystemMetrics> for MetricsJudgment {
    fn from(m: &SystemMetrics) -> Self {
        Self {
            cpu: severity(m.cpu_percent),
            memory: severity(m.memory_percent),
            disk: severity(m.disk_percent),
            cpu_temperature: m.cpu_temperature.map(temperature_severity),
            gpu_utilization: m.gpu_utilization.map(severity),
            gpu_memory: m.gpu_memory_percent.map(severity),
            gpu_temperature: m.gpu_temperature.map(temperature_severity),
        }
    }
}

/// Running / total counts over a cached service list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    pub total: usize,
    pub running: usize,
}

impl ServiceSummary {
    pub fn of(services: &[ServiceDescriptor]) -> Self {
        Self {
            total: services.len(),
            running: services.iter().filter(|s| s.is_running()).count(),
        }
    }
}

/// Running / total counts over a cached container list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContainerSummary {
    pub total: usize,
    pub running: usize,
}

impl ContainerSummary {
    pub fn of(containers: &[ContainerDescriptor]) -> Self {
        Self {
            total: containers.len(),
            running: containers.iter().filter(|c| c.is_running()).count(),
        }
    }

    pub fn stopped(&self) -> usize {
        self.total - self.running
    }
}
