//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use homedash_config::ConfigError;
use homedash_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(homedash::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Reason: {reason}\n\
             Try: homedash --backend http://<host>:8021 system info"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out: {message}")]
    #[diagnostic(
        code(homedash::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(homedash::not_found),
        help("Run: homedash {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(code(homedash::api_error))]
    Api { message: String, status: Option<u16> },

    #[error("Unexpected response from backend: {message}")]
    #[diagnostic(
        code(homedash::decode),
        help("The backend may be a different version than this CLI expects.")
    )]
    Decode { message: String },

    #[error("No data available for {key}")]
    #[diagnostic(code(homedash::unavailable))]
    Unavailable { key: String },

    // ── Actions ──────────────────────────────────────────────────────
    #[error("An action on {target} is already in progress")]
    #[diagnostic(
        code(homedash::action_pending),
        help("Wait for the running action to finish, then retry.")
    )]
    ActionPending { target: String },

    #[error("Could not {verb} {target}: {message}")]
    #[diagnostic(code(homedash::action_failed))]
    ActionFailed {
        verb: String,
        target: String,
        message: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(homedash::validation))]
    Validation { field: String, reason: String },

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(homedash::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(homedash::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: homedash --profile {name} config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Profile '{name}' already exists")]
    #[diagnostic(
        code(homedash::profile_exists),
        help("Use --force to overwrite it.")
    )]
    ProfileExists { name: String },

    #[error(transparent)]
    #[diagnostic(code(homedash::config))]
    Config(ConfigError),

    // ── IO / Rendering ───────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(homedash::render))]
    Render(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(homedash::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } | Self::Api {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::ActionPending { .. } | Self::ProfileExists { .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout { message } => Self::Timeout { message },
            CoreError::Api { message, status } => Self::Api { message, status },
            CoreError::Decode { message } => Self::Decode { message },
            CoreError::ActionPending { target } => Self::ActionPending { target },
            CoreError::Unavailable { key } => Self::Unavailable { key },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: String::new(),
            },
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let cases = [
            (
                CoreError::ConnectionFailed {
                    url: "http://x".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (
                CoreError::Timeout {
                    message: "10s".into(),
                },
                exit_code::TIMEOUT,
            ),
            (
                CoreError::Api {
                    message: "Service not found".into(),
                    status: Some(404),
                },
                exit_code::NOT_FOUND,
            ),
            (
                CoreError::Api {
                    message: "Request failed".into(),
                    status: Some(500),
                },
                exit_code::GENERAL,
            ),
            (
                CoreError::ActionPending {
                    target: "service notes".into(),
                },
                exit_code::CONFLICT,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn api_error_displays_backend_detail_verbatim() {
        let err = CliError::from(CoreError::Api {
            message: "Container is already running".into(),
            status: Some(409),
        });
        assert_eq!(err.to_string(), "Container is already running");
    }
}
