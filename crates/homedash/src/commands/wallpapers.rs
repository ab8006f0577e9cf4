//! Wallpaper command handlers.

use std::path::Path;

use bytes::Bytes;
use tabled::Tabled;

use homedash_core::{Command as CoreCommand, Dashboard, ResourceKey, WallpaperInfo};

use crate::cli::{GlobalOpts, WallpapersArgs, WallpapersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct WallpaperRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Default")]
    default: &'static str,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&WallpaperInfo> for WallpaperRow {
    fn from(w: &WallpaperInfo) -> Self {
        Self {
            id: w.id.clone(),
            name: w.name.clone(),
            default: if w.is_default { "yes" } else { "" },
            url: w.url.clone(),
        }
    }
}

pub async fn handle(
    dashboard: &Dashboard,
    args: WallpapersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        WallpapersCommand::List => {
            let wallpapers: Vec<WallpaperInfo> = dashboard.load(&ResourceKey::Wallpapers).await?;
            let out = output::render_list(
                global.output,
                &wallpapers,
                |w| WallpaperRow::from(w),
                |w| w.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WallpapersCommand::Upload { path } => {
            let file_name = file_name(&path)?;
            let content = Bytes::from(tokio::fs::read(&path).await?);
            util::run_action(
                dashboard,
                CoreCommand::UploadWallpaper { file_name, content },
                global,
            )
            .await
        }

        WallpapersCommand::Delete { id } => {
            let prompt = format!("Delete wallpaper {id}?");
            if !util::confirm(&prompt, "wallpapers delete", global.yes)? {
                return Ok(());
            }
            util::run_action(dashboard, CoreCommand::DeleteWallpaper { id }, global).await
        }
    }
}

fn file_name(path: &Path) -> Result<String, CliError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| CliError::Validation {
            field: "path".into(),
            reason: format!("{} has no usable file name", path.display()),
        })
}
