// ── Command API ──
//
// Every state-changing operation is a `Command` variant. Targets, verbs
// and the resource kinds each command invalidates are resolved by
// exhaustive match, so an unsupported verb does not compile.

mod dispatcher;

use std::fmt;

use bytes::Bytes;
use homedash_api::models::UserSettings;
use homedash_api::{LifecycleAction, SystemAction};

use crate::model::ResourceKind;

pub use dispatcher::{ActionDispatcher, ActionEvent, ActionOutcome, ActionState};

/// All write operations against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // ── Services ─────────────────────────────────────────────────────
    StartService { name: String },
    StopService { name: String },
    RestartService { name: String },

    // ── Containers ───────────────────────────────────────────────────
    StartContainer { id: String },
    StopContainer { id: String },
    RestartContainer { id: String },

    // ── Wi-Fi ────────────────────────────────────────────────────────
    ScanWifi,

    // ── Settings / wallpapers ────────────────────────────────────────
    /// Replaces the full settings object.
    UpdateSettings(UserSettings),
    UploadWallpaper { file_name: String, content: Bytes },
    DeleteWallpaper { id: String },

    // ── System ───────────────────────────────────────────────────────
    RestartSystem,
    ShutdownSystem,
    Logout,
}

/// The entity an action applies to. At most one action per target may be
/// pending at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionTarget {
    Service(String),
    Container(String),
    Wifi,
    Settings,
    /// The wallpaper library as a whole (uploads).
    Wallpapers,
    Wallpaper(String),
    System,
}

impl fmt::Display for ActionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(name) => write!(f, "service {name}"),
            Self::Container(id) => write!(f, "container {id}"),
            Self::Wifi => f.write_str("wifi"),
            Self::Settings => f.write_str("settings"),
            Self::Wallpapers => f.write_str("wallpapers"),
            Self::Wallpaper(id) => write!(f, "wallpaper {id}"),
            Self::System => f.write_str("system"),
        }
    }
}

/// Action verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Start,
    Stop,
    Restart,
    Scan,
    Upload,
    Update,
    Delete,
    Shutdown,
    Logout,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Scan => "scan",
            Self::Upload => "upload",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Shutdown => "shutdown",
            Self::Logout => "logout",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Command {
    /// Lifecycle command for a service.
    pub fn service(name: impl Into<String>, action: LifecycleAction) -> Self {
        let name = name.into();
        match action {
            LifecycleAction::Start => Self::StartService { name },
            LifecycleAction::Stop => Self::StopService { name },
            LifecycleAction::Restart => Self::RestartService { name },
        }
    }

    /// Lifecycle command for a container.
    pub fn container(id: impl Into<String>, action: LifecycleAction) -> Self {
        let id = id.into();
        match action {
            LifecycleAction::Start => Self::StartContainer { id },
            LifecycleAction::Stop => Self::StopContainer { id },
            LifecycleAction::Restart => Self::RestartContainer { id },
        }
    }

    /// Power/session command for the host.
    pub fn system(action: SystemAction) -> Self {
        match action {
            SystemAction::Restart => Self::RestartSystem,
            SystemAction::Shutdown => Self::ShutdownSystem,
            SystemAction::Logout => Self::Logout,
        }
    }

    pub fn target(&self) -> ActionTarget {
        match self {
            Self::StartService { name } | Self::StopService { name } | Self::RestartService { name } => {
                ActionTarget::Service(name.clone())
            }
            Self::StartContainer { id }
            | Self::StopContainer { id }
            | Self::RestartContainer { id } => ActionTarget::Container(id.clone()),
            Self::ScanWifi => ActionTarget::Wifi,
            Self::UpdateSettings(_) => ActionTarget::Settings,
            Self::UploadWallpaper { .. } => ActionTarget::Wallpapers,
            Self::DeleteWallpaper { id } => ActionTarget::Wallpaper(id.clone()),
            Self::RestartSystem | Self::ShutdownSystem | Self::Logout => ActionTarget::System,
        }
    }

    pub fn verb(&self) -> Verb {
        match self {
            Self::StartService { .. } | Self::StartContainer { .. } => Verb::Start,
            Self::StopService { .. } | Self::StopContainer { .. } => Verb::Stop,
            Self::RestartService { .. } | Self::RestartContainer { .. } | Self::RestartSystem => {
                Verb::Restart
            }
            Self::ScanWifi => Verb::Scan,
            Self::UpdateSettings(_) => Verb::Update,
            Self::UploadWallpaper { .. } => Verb::Upload,
            Self::DeleteWallpaper { .. } => Verb::Delete,
            Self::ShutdownSystem => Verb::Shutdown,
            Self::Logout => Verb::Logout,
        }
    }

    /// Resource kinds whose cache entries a successful run invalidates.
    pub fn affected(&self) -> &'static [ResourceKind] {
        match self {
            Self::StartService { .. } | Self::StopService { .. } | Self::RestartService { .. } => {
                &[ResourceKind::Services]
            }
            Self::StartContainer { .. }
            | Self::StopContainer { .. }
            | Self::RestartContainer { .. } => &[ResourceKind::Containers],
            Self::ScanWifi => &[ResourceKind::WifiInfo],
            Self::UpdateSettings(_) => &[ResourceKind::Settings],
            Self::UploadWallpaper { .. } | Self::DeleteWallpaper { .. } => {
                &[ResourceKind::Wallpapers]
            }
            Self::RestartSystem | Self::ShutdownSystem | Self::Logout => &[],
        }
    }
}
