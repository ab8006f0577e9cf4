// Wi-Fi endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ActionResponse, WifiInfo, WifiNetwork, WifiStatus};

impl ApiClient {
    /// Connection status plus visible networks.
    ///
    /// `GET /api/wifi`
    pub async fn get_wifi_info(&self) -> Result<WifiInfo, Error> {
        let url = self.api_url(&["wifi"])?;
        self.get(url).await
    }

    /// Connection status only.
    ///
    /// `GET /api/wifi/status`
    pub async fn get_wifi_status(&self) -> Result<WifiStatus, Error> {
        let url = self.api_url(&["wifi", "status"])?;
        self.get(url).await
    }

    /// Visible networks only.
    ///
    /// `GET /api/wifi/networks`
    pub async fn list_wifi_networks(&self) -> Result<Vec<WifiNetwork>, Error> {
        let url = self.api_url(&["wifi", "networks"])?;
        self.get(url).await
    }

    /// Ask the host to rescan for networks.
    ///
    /// `POST /api/wifi/scan`
    pub async fn scan_wifi(&self) -> Result<ActionResponse, Error> {
        let url = self.api_url(&["wifi", "scan"])?;
        debug!("requesting wifi rescan");
        self.post(url).await
    }
}
