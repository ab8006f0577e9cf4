// Network endpoints

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::NetworkStatus;

impl ApiClient {
    /// Interfaces, per-interface counters, and connection totals.
    ///
    /// `GET /api/network/status`
    pub async fn get_network_status(&self) -> Result<NetworkStatus, Error> {
        let url = self.api_url(&["network", "status"])?;
        self.get(url).await
    }
}
