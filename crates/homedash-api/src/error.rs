use thiserror::Error;

/// Generic message used when a failed response carries no usable `detail`.
pub const REQUEST_FAILED: &str = "Request failed";

/// Generic message used when a wallpaper upload fails without a `detail`.
pub const UPLOAD_FAILED: &str = "Upload failed";

/// Top-level error type for the `homedash-api` crate.
///
/// Every failure mode of a backend call lands in exactly one variant.
/// `homedash-core` maps these into user-facing errors; callers that only
/// need a string use [`Error::message`].
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// Non-2xx response. `detail` is the backend's `{ "detail": ... }`
    /// message when the body carried one.
    #[error("HTTP {status}: {}", http_message(.detail, .fallback))]
    Http {
        status: u16,
        detail: Option<String>,
        fallback: &'static str,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

#[allow(clippy::ref_option)]
fn http_message<'a>(detail: &'a Option<String>, fallback: &'a &'static str) -> &'a str {
    detail.as_deref().unwrap_or(fallback)
}

impl Error {
    /// Single human-readable message, as shown to a user.
    ///
    /// HTTP failures surface the backend `detail` or the generic fallback,
    /// never the status line.
    pub fn message(&self) -> String {
        match self {
            Self::Http {
                detail, fallback, ..
            } => detail.clone().unwrap_or_else(|| (*fallback).to_owned()),
            Self::Transport(e) if e.is_timeout() => "Request timed out".into(),
            Self::Transport(e) if e.is_connect() => "Backend unreachable".into(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if the request timed out in the transport layer.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status code, if the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
