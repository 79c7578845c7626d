// Backend HTTP client
//
// Wraps `reqwest::Client` with Rentdesk-specific URL construction and
// response decoding. All endpoint groups (requests, kyc, overrides,
// metrics, operators) are implemented as inherent methods via separate
// files to keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ErrorBody;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Rentdesk backend API.
///
/// The backend speaks plain JSON: collections and records on success,
/// `{ "error": "..." }` with a meaningful status code on failure. This
/// client decodes both sides -- callers only ever see typed payloads or
/// a typed [`Error`].
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ConsoleClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ConsoleClient {
    /// Create a new client from a base URL and transport config.
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

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(&format!("/api/{path}"))
            .map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON payload.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Send a GET request with query parameters and decode the JSON payload.
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Send a POST request with a JSON body and decode the JSON payload.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Decode a backend response: JSON payload on 2xx, typed error otherwise.
    ///
    /// Non-2xx bodies carry `{ "error": "..." }`; the status code picks the
    /// error variant (401 authentication, 404 not-found, 409 conflict).
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            });
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status.as_u16() {
            401 => Err(Error::Authentication { message }),
            404 => Err(Error::NotFound { message }),
            409 => Err(Error::Conflict { message }),
            code => Err(Error::Api {
                status: code,
                message,
            }),
        }
    }
}
