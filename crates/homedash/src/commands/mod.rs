//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod config_cmd;
pub mod containers;
pub mod docker;
pub mod network;
pub mod services;
pub mod settings;
pub mod system;
pub mod util;
pub mod wallpapers;
pub mod watch;
pub mod wifi;

use homedash_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::System(args) => system::handle(dashboard, args, global).await,
        Command::Services(args) => services::handle(dashboard, args, global).await,
        Command::Containers(args) => containers::handle(dashboard, args, global).await,
        Command::Docker(args) => docker::handle(dashboard, args, global).await,
        Command::Network(args) => network::handle(dashboard, args, global).await,
        Command::Wifi(args) => wifi::handle(dashboard, args, global).await,
        Command::Settings(args) => settings::handle(dashboard, args, global).await,
        Command::Wallpapers(args) => wallpapers::handle(dashboard, args, global).await,
        Command::Watch(args) => watch::handle(dashboard, args, global).await,
        // Config and Completions are handled before a backend is resolved
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions do not use a backend".into(),
        )),
    }
}
