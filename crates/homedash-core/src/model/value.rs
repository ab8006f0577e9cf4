// ── Cached resource values ──

use homedash_api::models::{
    ContainerStats, DeviceInfo, DockerInfo, NetworkStatus, SystemMetrics, UserSettings,
    WallpaperInfo, WifiInfo, WifiStatus,
};

use super::{ContainerDescriptor, ResourceKind, ServiceDescriptor};

/// The value stored in a cache entry, one variant per [`ResourceKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceValue {
    SystemMetrics(SystemMetrics),
    Services(Vec<ServiceDescriptor>),
    Containers(Vec<ContainerDescriptor>),
    ContainerStats(ContainerStats),
    DockerInfo(DockerInfo),
    NetworkStatus(NetworkStatus),
    Settings(UserSettings),
    Wallpapers(Vec<WallpaperInfo>),
    DeviceInfo(DeviceInfo),
    WifiInfo(WifiInfo),
    WifiStatus(WifiStatus),
}

impl ResourceValue {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::SystemMetrics(_) => ResourceKind::SystemMetrics,
            Self::Services(_) => ResourceKind::Services,
            Self::Containers(_) => ResourceKind::Containers,
            Self::ContainerStats(_) => ResourceKind::ContainerStats,
            Self::DockerInfo(_) => ResourceKind::DockerInfo,
            Self::NetworkStatus(_) => ResourceKind::NetworkStatus,
            Self::Settings(_) => ResourceKind::Settings,
            Self::Wallpapers(_) => ResourceKind::Wallpapers,
            Self::DeviceInfo(_) => ResourceKind::DeviceInfo,
            Self::WifiInfo(_) => ResourceKind::WifiInfo,
            Self::WifiStatus(_) => ResourceKind::WifiStatus,
        }
    }
}

/// Typed access to a [`ResourceValue`] variant.
///
/// ```ignore
/// let services: Option<Vec<ServiceDescriptor>> = store.value(&ResourceKey::Services);
/// ```
pub trait Resource: Sized {
    const KIND: ResourceKind;

    fn from_value(value: &ResourceValue) -> Option<&Self>;
}

macro_rules! impl_resource {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl Resource for $ty {
                const KIND: ResourceKind = ResourceKind::$variant;

                fn from_value(value: &ResourceValue) -> Option<&Self> {
                    match value {
                        ResourceValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_resource! {
    SystemMetrics => SystemMetrics,
    Services => Vec<ServiceDescriptor>,
    Containers => Vec<ContainerDescriptor>,
    ContainerStats => ContainerStats,
    DockerInfo => DockerInfo,
    NetworkStatus => NetworkStatus,
    Settings => UserSettings,
    Wallpapers => Vec<WallpaperInfo>,
    DeviceInfo => DeviceInfo,
    WifiInfo => WifiInfo,
    WifiStatus => WifiStatus,
}
