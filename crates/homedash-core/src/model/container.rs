// ── Container domain types ──

use std::fmt;

use homedash_api::models::ContainerInfo;
use serde::{Serialize, Serializer};

/// Docker container state, parsed from the engine's lowercase state string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    /// Anything the engine reports that is not listed above.
    Other(String),
}

impl ContainerState {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "created" => Self::Created,
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "removing" => Self::Removing,
            "exited" => Self::Exited,
            "dead" => Self::Dead,
            _ => Self::Other(raw.to_owned()),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Removing => "removing",
            Self::Exited => "exited",
            Self::Dead => "dead",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContainerState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A Docker container as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerDescriptor {
    pub id: String,
    pub name: String,
    pub image: String,
    /// Human status line from the engine (`"Up 3 hours"`).
    pub status: String,
    pub state: ContainerState,
    pub ports: Vec<String>,
    pub created: String,
}

impl ContainerDescriptor {
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// First 12 characters of the id, as `docker ps` shows it.
    pub fn short_id(&self) -> &str {
        self.id.get(..12).unwrap_or(&self.id)
    }
}

impl From<ContainerInfo> for ContainerDescriptor {
    fn from(c: ContainerInfo) -> Self {
        Self {
            state: ContainerState::parse(&c.state),
            id: c.id,
            name: c.name,
            image: c.image,
            status: c.status,
            ports: c.ports,
            created: c.created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_parsing_keeps_unknown_values() {
        assert_eq!(ContainerState::parse("Running"), ContainerState::Running);
        assert_eq!(ContainerState::parse("exited"), ContainerState::Exited);
        let odd = ContainerState::parse("hibernating");
        assert_eq!(odd, ContainerState::Other("hibernating".into()));
        assert_eq!(odd.to_string(), "hibernating");
        assert!(!odd.is_running());
    }

    #[test]
    fn short_id_truncates_long_ids_only() {
        let mut c = ContainerDescriptor {
            id: "0123456789abcdef".into(),
            name: "redis".into(),
            image: "redis:7".into(),
            status: "Up".into(),
            state: ContainerState::Running,
            ports: vec![],
            created: String::new(),
        };
        assert_eq!(c.short_id(), "0123456789ab");
        c.id = "abc123".into();
        assert_eq!(c.short_id(), "abc123");
    }
}
