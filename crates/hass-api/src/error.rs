use thiserror::Error;

/// Top-level error type for the `hass-api` crate.
///
/// Every failure mode is a distinct variant, but the `Display` strings keep
/// the human-readable messages callers have historically substring-matched
/// on (e.g. looking for `"401"` in a failed status message).
#[derive(Debug, Error)]
pub enum Error {
    // ── Input validation ────────────────────────────────────────────
    /// Bad constructor or call input. Raised before any I/O happens.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Access token failed validation (empty, too short, bad charset).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout,
    /// stream I/O). The underlying reqwest message is preserved verbatim.
    #[error("Error communicating with Home Assistant API: {0}")]
    Transport(#[from] reqwest::Error),

    /// Base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API responses ───────────────────────────────────────────────
    /// Non-2xx HTTP status. Carries the status code and the raw body
    /// text when the server sent one.
    #[error("API request failed with status code {status}: {}", .body.as_deref().unwrap_or("<no body>"))]
    ApiRequest { status: u16, body: Option<String> },

    /// Response body is not valid JSON or does not fit the requested
    /// shape. Keeps the raw body for debugging.
    #[error("Error parsing API response: {message}")]
    Deserialization { message: String, body: String },

    /// 2xx status with no body where one was expected.
    #[error("Empty response from API")]
    EmptyResponse,
}

impl Error {
    /// The HTTP status code, if this error came from an API response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiRequest { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected our credentials (HTTP 401)
    /// or the token failed local validation.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. }) || self.status() == Some(401)
    }

    /// Returns `true` for a server-side failure (HTTP 5xx).
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn api_request_message_contains_status_and_body() {
        let err = Error::ApiRequest {
            status: 401,
            body: Some(r#"{"message":"Unauthorized, invalid access token"}"#.into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Unauthorized"));
        assert!(err.is_auth_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn api_request_without_body() {
        let err = Error::ApiRequest { status: 500, body: None };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("<no body>"));
        assert!(err.is_server_error());
    }

    #[test]
    fn authentication_is_auth_error() {
        let err = Error::Authentication { message: "too short".into() };
        assert!(err.is_auth_error());
        assert_eq!(err.status(), None);
    }
}
