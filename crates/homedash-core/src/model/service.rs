// ── Service domain type ──

use homedash_api::models::{ServiceInfo, ServiceStatus};
use serde::Serialize;

/// A managed project as reported by the backend.
///
/// Read-only on the client side: state changes are requested through
/// [`Command`](crate::Command)s and observed on the next fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub path: String,
    pub frontend_port: Option<u16>,
    pub backend_port: Option<u16>,
    pub websocket_port: Option<u16>,
    pub status: ServiceStatus,
    pub frontend_running: bool,
    pub backend_running: bool,
}

impl ServiceDescriptor {
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Ports the service exposes, in frontend/backend/websocket order.
    pub fn ports(&self) -> impl Iterator<Item = u16> + '_ {
        [self.frontend_port, self.backend_port, self.websocket_port]
            .into_iter()
            .flatten()
    }
}

impl From<ServiceInfo> for ServiceDescriptor {
    fn from(s: ServiceInfo) -> Self {
        Self {
            name: s.name,
            description: s.description,
            icon: s.icon,
            path: s.path,
            frontend_port: s.frontend_port,
            backend_port: s.backend_port,
            websocket_port: s.websocket_port,
            status: s.status,
            frontend_running: s.frontend_running,
            backend_running: s.backend_running,
        }
    }
}
