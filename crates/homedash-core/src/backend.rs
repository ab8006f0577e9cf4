// ── Backend seam ──
//
// The cache, poller and dispatcher only see this trait. The REST client
// implements it; tests substitute scripted backends.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use homedash_api::models::{ActionResponse, WallpaperInfo, WifiNetwork};
use homedash_api::{ApiClient, LifecycleAction, SystemAction};
use tracing::debug;

use crate::command::Command;
use crate::error::CoreError;
use crate::model::{ContainerDescriptor, ResourceKey, ResourceValue, ServiceDescriptor};

/// What a mutation returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationReply {
    /// The generic `{ success, message }` acknowledgement.
    Ack(ActionResponse),
    /// A wallpaper upload returns the stored wallpaper instead.
    Uploaded(WallpaperInfo),
}

/// Source of resource values and sink for commands.
pub trait Backend: Send + Sync + 'static {
    /// Fetch the current value for `key`.
    fn fetch<'a>(&'a self, key: &'a ResourceKey)
    -> BoxFuture<'a, Result<ResourceValue, CoreError>>;

    /// Execute one command.
    fn execute<'a>(&'a self, command: &'a Command)
    -> BoxFuture<'a, Result<MutationReply, CoreError>>;

    /// Last `lines` log lines of a service, oldest first.
    fn service_logs<'a>(
        &'a self,
        name: &'a str,
        lines: u32,
    ) -> BoxFuture<'a, Result<Vec<String>, CoreError>>;

    /// Last `lines` log lines of a container, oldest first.
    fn container_logs<'a>(
        &'a self,
        id: &'a str,
        lines: u32,
    ) -> BoxFuture<'a, Result<Vec<String>, CoreError>>;

    /// Visible Wi-Fi networks, bypassing the cache.
    fn wifi_networks(&self) -> BoxFuture<'_, Result<Vec<WifiNetwork>, CoreError>>;
}

// ── REST implementation ──────────────────────────────────────────────

impl Backend for ApiClient {
    fn fetch<'a>(
        &'a self,
        key: &'a ResourceKey,
    ) -> BoxFuture<'a, Result<ResourceValue, CoreError>> {
        async move {
            debug!(%key, "fetching");
            let value = match key {
                ResourceKey::SystemMetrics => {
                    ResourceValue::SystemMetrics(self.get_system_metrics().await?)
                }
                ResourceKey::Services => ResourceValue::Services(
                    self.list_services()
                        .await?
                        .into_iter()
                        .map(ServiceDescriptor::from)
                        .collect(),
                ),
                ResourceKey::Containers { all } => ResourceValue::Containers(
                    self.list_containers(*all)
                        .await?
                        .into_iter()
                        .map(ContainerDescriptor::from)
                        .collect(),
                ),
                ResourceKey::ContainerStats { id } => {
                    ResourceValue::ContainerStats(self.container_stats(id).await?)
                }
                ResourceKey::DockerInfo => ResourceValue::DockerInfo(self.get_docker_info().await?),
                ResourceKey::NetworkStatus => {
                    ResourceValue::NetworkStatus(self.get_network_status().await?)
                }
                ResourceKey::Settings => ResourceValue::Settings(self.get_settings().await?),
                ResourceKey::Wallpapers => ResourceValue::Wallpapers(self.list_wallpapers().await?),
                ResourceKey::DeviceInfo => ResourceValue::DeviceInfo(self.get_device_info().await?),
                ResourceKey::WifiInfo => ResourceValue::WifiInfo(self.get_wifi_info().await?),
                ResourceKey::WifiStatus => ResourceValue::WifiStatus(self.get_wifi_status().await?),
            };
            Ok(value)
        }
        .boxed()
    }

    fn execute<'a>(
        &'a self,
        command: &'a Command,
    ) -> BoxFuture<'a, Result<MutationReply, CoreError>> {
        async move {
            let ack = match command {
                Command::StartService { name } => {
                    self.service_action(name, LifecycleAction::Start).await?
                }
                Command::StopService { name } => {
                    self.service_action(name, LifecycleAction::Stop).await?
                }
                Command::RestartService { name } => {
                    self.service_action(name, LifecycleAction::Restart).await?
                }
                Command::StartContainer { id } => {
                    self.container_action(id, LifecycleAction::Start).await?
                }
                Command::StopContainer { id } => {
                    self.container_action(id, LifecycleAction::Stop).await?
                }
                Command::RestartContainer { id } => {
                    self.container_action(id, LifecycleAction::Restart).await?
                }
                Command::ScanWifi => self.scan_wifi().await?,
                Command::UpdateSettings(settings) => self.update_settings(settings).await?,
                Command::UploadWallpaper { file_name, content } => {
                    let info = self.upload_wallpaper(file_name, content.clone()).await?;
                    return Ok(MutationReply::Uploaded(info));
                }
                Command::DeleteWallpaper { id } => self.delete_wallpaper(id).await?,
                Command::RestartSystem => self.system_action(SystemAction::Restart).await?,
                Command::ShutdownSystem => self.system_action(SystemAction::Shutdown).await?,
                Command::Logout => self.system_action(SystemAction::Logout).await?,
            };
            Ok(MutationReply::Ack(ack))
        }
        .boxed()
    }

    fn service_logs<'a>(
        &'a self,
        name: &'a str,
        lines: u32,
    ) -> BoxFuture<'a, Result<Vec<String>, CoreError>> {
        async move { Ok(ApiClient::service_logs(self, name, lines).await?.logs) }.boxed()
    }

    fn container_logs<'a>(
        &'a self,
        id: &'a str,
        lines: u32,
    ) -> BoxFuture<'a, Result<Vec<String>, CoreError>> {
        async move { Ok(ApiClient::container_logs(self, id, lines).await?.logs) }.boxed()
    }

    fn wifi_networks(&self) -> BoxFuture<'_, Result<Vec<WifiNetwork>, CoreError>> {
        async move { Ok(self.list_wifi_networks().await?) }.boxed()
    }
}
