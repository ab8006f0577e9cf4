// ── Resource keys ──

use std::fmt;

use strum::{EnumDiscriminants, EnumIter};

/// Identifies one cacheable backend collection or singleton.
///
/// The parameterless discriminant [`ResourceKind`] names the family and is
/// the unit of invalidation: invalidating `Containers` marks both the
/// `all = true` and `all = false` listings stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumDiscriminants)]
#[strum_discriminants(name(ResourceKind), derive(Hash, EnumIter))]
pub enum ResourceKey {
    SystemMetrics,
    Services,
    Containers { all: bool },
    ContainerStats { id: String },
    DockerInfo,
    NetworkStatus,
    Settings,
    Wallpapers,
    DeviceInfo,
    WifiInfo,
    WifiStatus,
}

impl ResourceKey {
    pub fn kind(&self) -> ResourceKind {
        ResourceKind::from(self)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Containers { all } => write!(f, "containers(all={all})"),
            Self::ContainerStats { id } => write!(f, "container-stats({id})"),
            other => f.write_str(other.kind().as_str()),
        }
    }
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SystemMetrics => "system-metrics",
            Self::Services => "services",
            Self::Containers => "containers",
            Self::ContainerStats => "container-stats",
            Self::DockerInfo => "docker-info",
            Self::NetworkStatus => "network-status",
            Self::Settings => "settings",
            Self::Wallpapers => "wallpapers",
            Self::DeviceInfo => "device-info",
            Self::WifiInfo => "wifi-info",
            Self::WifiStatus => "wifi-status",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parameterised_keys_share_a_kind() {
        assert_eq!(
            ResourceKey::Containers { all: true }.kind(),
            ResourceKey::Containers { all: false }.kind()
        );
        assert_ne!(
            ResourceKey::Containers { all: true },
            ResourceKey::Containers { all: false }
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(ResourceKey::SystemMetrics.to_string(), "system-metrics");
        assert_eq!(
            ResourceKey::Containers { all: true }.to_string(),
            "containers(all=true)"
        );
        assert_eq!(
            ResourceKey::ContainerStats { id: "abc123".into() }.to_string(),
            "container-stats(abc123)"
        );
        assert_eq!(ResourceKind::iter().count(), 11);
    }
}
