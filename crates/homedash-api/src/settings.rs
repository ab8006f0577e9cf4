// Settings endpoints
//
// User settings (replaced wholesale on update) and the wallpaper library.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::{Error, UPLOAD_FAILED};
use crate::models::{ActionResponse, UserSettings, WallpaperInfo};

impl ApiClient {
    /// Current user settings.
    ///
    /// `GET /api/settings`
    pub async fn get_settings(&self) -> Result<UserSettings, Error> {
        let url = self.api_url(&["settings"])?;
        self.get(url).await
    }

    /// Replace the full settings object.
    ///
    /// `PUT /api/settings`
    pub async fn update_settings(&self, settings: &UserSettings) -> Result<ActionResponse, Error> {
        let url = self.api_url(&["settings"])?;
        debug!(user = %settings.user_name, wallpaper = %settings.wallpaper, "updating settings");
        self.put(url, settings).await
    }

    /// Wallpapers available for selection (built-in and uploaded).
    ///
    /// `GET /api/settings/wallpapers`
    pub async fn list_wallpapers(&self) -> Result<Vec<WallpaperInfo>, Error> {
        let url = self.api_url(&["settings", "wallpapers"])?;
        self.get(url).await
    }

    /// Upload a new wallpaper image as multipart field `file`.
    ///
    /// `POST /api/settings/wallpapers/upload`
    pub async fn upload_wallpaper(
        &self,
        file_name: &str,
        content: Bytes,
    ) -> Result<WallpaperInfo, Error> {
        let url = self.api_url(&["settings", "wallpapers", "upload"])?;
        debug!(file_name, size = content.len(), "uploading wallpaper");
        let part = Part::stream(content).file_name(file_name.to_owned());
        let form = Form::new().part("file", part);
        self.post_multipart(url, form, UPLOAD_FAILED).await
    }

    /// Delete an uploaded wallpaper.
    ///
    /// `DELETE /api/settings/wallpapers/{id}`
    pub async fn delete_wallpaper(&self, id: &str) -> Result<ActionResponse, Error> {
        let url = self.api_url(&["settings", "wallpapers", id])?;
        debug!(wallpaper = id, "deleting wallpaper");
        self.delete(url).await
    }
}
