// Core HTTP client for the Home Assistant REST API.
//
// This module owns transport mechanics: URL construction, header
// injection, status-code classification, and JSON decoding. Endpoint
// methods live in separate files (states, events, services, system) as
// inherent impls, keeping this module focused on request execution.

use std::sync::Arc;

use reqwest::header::{self, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::{AccessToken, TokenStore};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Client for the Home Assistant REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and the token
/// store. The token is the only mutable shared state, guarded by a
/// readers-writer lock: GET requests hold the read side for their full
/// round trip and POST requests the write side, so POSTs are serialized
/// against every other in-flight call on the same client.
///
/// ```no_run
/// # async fn demo() -> Result<(), hass_api::Error> {
/// let client = hass_api::HomeAssistantClient::new(
///     "http://homeassistant.local:8123",
///     "your_long_lived_access_token_0123456789",
/// )?;
/// let status = client.get_api_status().await?;
/// println!("{}", status.message);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HomeAssistantClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<TokenStore>,
}

impl HomeAssistantClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client with default transport settings (system TLS,
    /// 30 second timeout).
    ///
    /// Fails with [`Error::InvalidArgument`] on an empty base URL,
    /// [`Error::InvalidUrl`] on an unparseable one, and
    /// [`Error::Authentication`] if the token fails validation. A
    /// trailing slash on the base URL is stripped before storage.
    pub fn new(base_url: &str, access_token: &str) -> Result<Self, Error> {
        Self::with_transport(base_url, access_token, &TransportConfig::default())
    }

    /// Build a client with explicit transport settings.
    pub fn with_transport(
        base_url: &str,
        access_token: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, access_token, http)
    }

    /// Wrap an existing `reqwest::Client` (pooling, TLS, and timeout
    /// policy stay with the caller).
    pub fn from_reqwest(
        base_url: &str,
        access_token: &str,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        let token = AccessToken::new(access_token)?;

        Ok(Self {
            http,
            base_url,
            token: Arc::new(TokenStore::new(token)),
        })
    }

    fn normalize_base_url(raw: &str) -> Result<String, Error> {
        if raw.trim().is_empty() {
            return Err(Error::InvalidArgument {
                message: "base URL cannot be empty".into(),
            });
        }
        let trimmed = raw.trim_end_matches('/');
        Url::parse(trimmed)?;
        Ok(trimmed.to_owned())
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The configured base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate and replace the stored access token.
    ///
    /// Takes the write side of the token lock, so the swap waits for
    /// in-flight requests and subsequent requests observe the new token.
    pub async fn update_token(&self, access_token: &str) -> Result<(), Error> {
        let token = AccessToken::new(access_token)?;
        self.token.replace(token).await;
        Ok(())
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}/api/{path}", self.base_url))?)
    }

    fn bearer_header(token: &AccessToken) -> Result<HeaderValue, Error> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
            .map_err(|e| Error::Authentication {
                message: format!("access token is not a valid header value: {e}"),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }

    // ── Request execution ────────────────────────────────────────────

    /// Execute a GET request and decode the JSON body into `T`.
    ///
    /// Holds the token read lock for the whole round trip.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        let token = self.token.read().await;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, Self::bearer_header(&token)?)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(Error::Transport)?;

        decode_response(resp).await
    }

    /// Execute a fire-and-forget POST. A missing body is sent as `{}`.
    ///
    /// Holds the token write lock for the whole round trip, which
    /// serializes POSTs against all other calls on this client.
    pub(crate) async fn post(&self, path: &str, body: Option<Value>) -> Result<(), Error> {
        let url = self.api_url(path)?;
        let payload = body.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        let token = self.token.write().await;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header(header::AUTHORIZATION, Self::bearer_header(&token)?)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(read_api_error(status, resp).await)
        }
    }
}

// ── Response classification ──────────────────────────────────────────

/// 2xx with a body: decode as JSON. 2xx without one: `EmptyResponse`.
/// Anything else: `ApiRequest` with status and best-effort body text.
async fn decode_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(read_api_error(status, resp).await);
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    if body.is_empty() {
        return Err(Error::EmptyResponse);
    }

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}

async fn read_api_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let body = resp.text().await.ok().filter(|b| !b.is_empty());
    Error::ApiRequest {
        status: status.as_u16(),
        body,
    }
}

/// Fail fast with `InvalidArgument` on an empty required path parameter.
pub(crate) fn require_non_empty(value: &str, what: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        Err(Error::InvalidArgument {
            message: format!("{what} cannot be empty"),
        })
    } else {
        Ok(())
    }
}
