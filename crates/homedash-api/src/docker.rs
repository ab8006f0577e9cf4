// Docker endpoints
//
// Engine summary, container listing, per-container stats, lifecycle
// control, and log tails.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    ActionResponse, ContainerInfo, ContainerLogs, ContainerStats, DockerInfo, LifecycleAction,
};

impl ApiClient {
    /// Docker engine summary.
    ///
    /// `GET /api/docker/info`
    pub async fn get_docker_info(&self) -> Result<DockerInfo, Error> {
        let url = self.api_url(&["docker", "info"])?;
        self.get(url).await
    }

    /// List containers. `all = false` restricts to running ones.
    ///
    /// `GET /api/docker/containers?all=bool`
    pub async fn list_containers(&self, all: bool) -> Result<Vec<ContainerInfo>, Error> {
        let mut url = self.api_url(&["docker", "containers"])?;
        url.query_pairs_mut()
            .append_pair("all", if all { "true" } else { "false" });
        self.get(url).await
    }

    /// Resource usage for one container.
    ///
    /// `GET /api/docker/containers/{id}/stats`
    pub async fn container_stats(&self, id: &str) -> Result<ContainerStats, Error> {
        let url = self.api_url(&["docker", "containers", id, "stats"])?;
        debug!(container = id, "fetching container stats");
        self.get(url).await
    }

    /// Start, stop, or restart a container.
    ///
    /// `POST /api/docker/containers/{id}/{action}`
    pub async fn container_action(
        &self,
        id: &str,
        action: LifecycleAction,
    ) -> Result<ActionResponse, Error> {
        let url = self.api_url(&["docker", "containers", id, action.as_str()])?;
        debug!(container = id, %action, "requesting container action");
        self.post(url).await
    }

    /// Tail the last `lines` log lines of a container.
    ///
    /// `GET /api/docker/containers/{id}/logs?lines=N`
    pub async fn container_logs(&self, id: &str, lines: u32) -> Result<ContainerLogs, Error> {
        let mut url = self.api_url(&["docker", "containers", id, "logs"])?;
        url.query_pairs_mut()
            .append_pair("lines", &lines.to_string());
        debug!(container = id, lines, "fetching container logs");
        self.get(url).await
    }
}
