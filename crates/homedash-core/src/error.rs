// ── Core error types ──
//
// User-facing errors from homedash-core. Consumers never match on HTTP
// transport details; the `From<homedash_api::Error>` impl folds them into
// the variants below.

use thiserror::Error;

/// Unified error type for the core crate.
///
/// `Clone` so a failure can be stored in an [`ActionOutcome`](crate::ActionOutcome)
/// and broadcast to several observers.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    // ── Backend errors ───────────────────────────────────────────────
    /// Non-2xx response. `message` is the backend `detail` or the generic
    /// fallback.
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    #[error("Unexpected response from backend: {message}")]
    Decode { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    /// A second action was dispatched for a target that is still pending.
    #[error("An action on {target} is already in progress")]
    ActionPending { target: String },

    /// A read found no cached value for the key.
    #[error("No data available for {key}")]
    Unavailable { key: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Single human-readable message without the variant prefix for
    /// backend errors.
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status code when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<homedash_api::Error> for CoreError {
    fn from(err: homedash_api::Error) -> Self {
        let message = err.message();
        match err {
            homedash_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { message }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            homedash_api::Error::Http { status, .. } => CoreError::Api {
                message,
                status: Some(status),
            },
            homedash_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
            homedash_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            homedash_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_keeps_detail_and_status() {
        let err: CoreError = homedash_api::Error::Http {
            status: 404,
            detail: Some("Container abc123 not found".into()),
            fallback: homedash_api::error::REQUEST_FAILED,
        }
        .into();
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Container abc123 not found");
        assert_eq!(err.to_string(), "Container abc123 not found");
    }

    #[test]
    fn deserialization_maps_to_decode() {
        let err: CoreError = homedash_api::Error::Deserialization {
            message: "missing field `name`".into(),
            body: "{}".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Decode { .. }));
        assert_eq!(err.status(), None);
    }
}
