// Backend HTTP client
//
// Wraps `reqwest::Client` with `/api` URL construction and the backend's
// error convention (`{ "detail": ... }` on non-2xx). Endpoint families
// (services, docker, ...) are implemented as inherent methods in sibling
// modules to keep this one focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, REQUEST_FAILED};
use crate::transport::TransportConfig;

/// Error body shape used by the backend for every non-2xx response.
#[derive(serde::Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Raw HTTP client for the backend REST API.
///
/// Stateless apart from the connection pool: every method is a single
/// request/response with no retries. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://localhost:8000`);
    /// every path is resolved under `{base_url}/api/`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/{segments...}`, percent-encoding each segment.
    pub(crate) fn api_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        parse_response(resp, REQUEST_FAILED).await
    }

    /// Send a body-less POST request and decode the JSON body.
    pub(crate) async fn post<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        parse_response(resp, REQUEST_FAILED).await
    }

    /// Send a PUT request with a JSON body and decode the JSON body.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_response(resp, REQUEST_FAILED).await
    }

    /// Send a DELETE request and decode the JSON body.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {}", url);
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_response(resp, REQUEST_FAILED).await
    }

    /// Send a multipart POST. `fallback` is the message used when the
    /// backend rejects the upload without a `detail`.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: reqwest::multipart::Form,
        fallback: &'static str,
    ) -> Result<T, Error> {
        debug!("POST (multipart) {}", url);
        let resp = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_response(resp, fallback).await
    }
}

/// Map a response onto `T`, or onto the typed error taxonomy.
///
/// Non-2xx: the `detail` field of the JSON body when present, the
/// `fallback` message otherwise (absent or malformed body).
async fn parse_response<T: DeserializeOwned>(
    resp: reqwest::Response,
    fallback: &'static str,
) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| match d {
                serde_json::Value::String(s) if !s.is_empty() => Some(s),
                serde_json::Value::Null | serde_json::Value::String(_) => None,
                other => Some(other.to_string()),
            });
        trace!(status = status.as_u16(), ?detail, "request failed");
        return Err(Error::Http {
            status: status.as_u16(),
            detail,
            fallback,
        });
    }

    let body = resp.text().await.map_err(Error::Transport)?;

    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn api_url_appends_api_prefix() {
        let c = client("http://localhost:8000");
        let url = c.api_url(&["services", "notes", "start"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/services/notes/start");
    }

    #[test]
    fn api_url_keeps_base_path_and_encodes_segments() {
        let c = client("http://host/dash/");
        let url = c.api_url(&["services", "my app", "logs"]).unwrap();
        assert_eq!(url.as_str(), "http://host/dash/api/services/my%20app/logs");
    }
}
