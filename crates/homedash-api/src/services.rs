// Service endpoints
//
// Managed projects: listing, lifecycle control, and log tails.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ActionResponse, LifecycleAction, ServiceInfo, ServiceLogs};

impl ApiClient {
    /// List every managed service with its current status.
    ///
    /// `GET /api/services`
    pub async fn list_services(&self) -> Result<Vec<ServiceInfo>, Error> {
        let url = self.api_url(&["services"])?;
        self.get(url).await
    }

    /// Start, stop, or restart a service.
    ///
    /// `POST /api/services/{name}/{action}`
    pub async fn service_action(
        &self,
        name: &str,
        action: LifecycleAction,
    ) -> Result<ActionResponse, Error> {
        let url = self.api_url(&["services", name, action.as_str()])?;
        debug!(service = name, %action, "requesting service action");
        self.post(url).await
    }

    /// Tail the last `lines` log lines of a service.
    ///
    /// `GET /api/services/{name}/logs?lines=N`
    pub async fn service_logs(&self, name: &str, lines: u32) -> Result<ServiceLogs, Error> {
        let mut url = self.api_url(&["services", name, "logs"])?;
        url.query_pairs_mut()
            .append_pair("lines", &lines.to_string());
        debug!(service = name, lines, "fetching service logs");
        self.get(url).await
    }
}
