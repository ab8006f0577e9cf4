//! Settings command handlers.
//!
//! Updates are read-modify-write: the backend replaces the whole
//! settings object on `PUT`.

use homedash_core::{
    Command as CoreCommand, Dashboard, ResourceKey, UserSettings, WallpaperInfo,
};

use crate::cli::{GlobalOpts, SettingsArgs, SettingsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(s: &UserSettings) -> String {
    let dock = if s.dock_apps.is_empty() {
        "-".to_owned()
    } else {
        s.dock_apps.join(", ")
    };
    [
        format!("Name:       {}", s.user_name),
        format!("Theme:      {}", s.theme),
        format!("Wallpaper:  {}", s.wallpaper),
        format!("Dock:       {dock}"),
    ]
    .join("\n")
}

pub async fn handle(
    dashboard: &Dashboard,
    args: SettingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let current: UserSettings = dashboard.load(&ResourceKey::Settings).await?;

    let updated = match args.command {
        SettingsCommand::Show => {
            let out = output::render_single(global.output, &current, detail, |s| {
                s.user_name.clone()
            })?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }
        SettingsCommand::SetName { name } => {
            if name.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "name".into(),
                    reason: "must not be empty".into(),
                });
            }
            UserSettings {
                user_name: name,
                ..current
            }
        }
        SettingsCommand::SetWallpaper { wallpaper } => {
            let wallpapers: Vec<WallpaperInfo> =
                dashboard.load(&ResourceKey::Wallpapers).await?;
            if !wallpapers.iter().any(|w| w.id == wallpaper) {
                return Err(CliError::NotFound {
                    resource_type: "wallpaper".into(),
                    identifier: wallpaper,
                    list_command: "wallpapers list".into(),
                });
            }
            UserSettings {
                wallpaper,
                ..current
            }
        }
        SettingsCommand::SetTheme { theme } => UserSettings { theme, ..current },
    };

    util::run_action(dashboard, CoreCommand::UpdateSettings(updated), global).await
}
