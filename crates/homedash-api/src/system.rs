// System endpoints
//
// Host metrics, host identity, and power/session actions.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ActionResponse, DeviceInfo, SystemAction, SystemMetrics};

impl ApiClient {
    /// Current host utilization.
    ///
    /// `GET /api/system`
    pub async fn get_system_metrics(&self) -> Result<SystemMetrics, Error> {
        let url = self.api_url(&["system"])?;
        self.get(url).await
    }

    /// Hostname, OS, address and uptime.
    ///
    /// `GET /api/system/info`
    pub async fn get_device_info(&self) -> Result<DeviceInfo, Error> {
        let url = self.api_url(&["system", "info"])?;
        self.get(url).await
    }

    /// Restart, shut down, or log out of the host.
    ///
    /// `POST /api/actions/{restart|shutdown|logout}`
    pub async fn system_action(&self, action: SystemAction) -> Result<ActionResponse, Error> {
        let url = self.api_url(&["actions", action.as_str()])?;
        debug!(%action, "requesting system action");
        self.post(url).await
    }
}
