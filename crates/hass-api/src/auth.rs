// Access token validation and thread-safe storage.
//
// Home Assistant long-lived access tokens are opaque strings; we validate
// shape only (length, charset) before accepting one. The token is the only
// mutable shared state in the client and is guarded by a readers-writer
// lock: requests take the read side, token replacement takes the write side.

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Error;

/// Minimum accepted token length. Long-lived access tokens issued by
/// Home Assistant are far longer, so anything shorter is a paste error.
const MIN_TOKEN_LENGTH: usize = 32;

/// A validated long-lived access token.
///
/// Construction enforces the token shape; the raw text lives in a
/// [`SecretString`] so it is redacted from `Debug` output.
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: SecretString,
}

impl AccessToken {
    /// Validate and wrap a raw token string.
    ///
    /// Fails with [`Error::Authentication`] if the token is empty after
    /// trimming, shorter than 32 characters, or contains characters
    /// outside `[A-Za-z0-9_.-]`.
    pub fn new(raw: &str) -> Result<Self, Error> {
        if raw.trim().is_empty() {
            return Err(Error::Authentication {
                message: "access token cannot be empty".into(),
            });
        }
        if raw.len() < MIN_TOKEN_LENGTH {
            return Err(Error::Authentication {
                message: format!("access token must be at least {MIN_TOKEN_LENGTH} characters"),
            });
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(Error::Authentication {
                message: "access token contains invalid characters; only alphanumerics, \
                          dots, underscores, and hyphens are allowed"
                    .into(),
            });
        }

        Ok(Self {
            secret: SecretString::from(raw),
        })
    }

    /// The raw token text. Only used to build the Authorization header.
    pub(crate) fn expose(&self) -> &str {
        self.secret.expose_secret()
    }
}

/// Readers-writer store for the client's current token.
///
/// GET requests hold the read guard for their full round trip, POST
/// requests the write guard. That serializes every POST against all other
/// in-flight calls on the same client, which mirrors the documented
/// behavior of the reference client.
#[derive(Debug)]
pub(crate) struct TokenStore {
    inner: RwLock<AccessToken>,
}

impl TokenStore {
    pub(crate) fn new(token: AccessToken) -> Self {
        Self {
            inner: RwLock::new(token),
        }
    }

    /// Shared access to the current token (many concurrent readers).
    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, AccessToken> {
        self.inner.read().await
    }

    /// Exclusive access to the current token (excludes all readers).
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, AccessToken> {
        self.inner.write().await
    }

    /// Replace the stored token under the write lock.
    pub(crate) async fn replace(&self, token: AccessToken) {
        *self.inner.write().await = token;
    }
}

#[cfg(test)]
mod tests {
    use super::AccessToken;
    use crate::error::Error;

    const VALID: &str = "abcDEF0123456789abcDEF0123456789.-_x";

    #[test]
    fn accepts_valid_token() {
        let token = AccessToken::new(VALID).unwrap();
        assert_eq!(token.expose(), VALID);
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        for raw in ["", "   ", "\t\n"] {
            let err = AccessToken::new(raw).unwrap_err();
            assert!(matches!(err, Error::Authentication { .. }), "{raw:?}");
        }
    }

    #[test]
    fn rejects_short_token() {
        let err = AccessToken::new("abc123").unwrap_err();
        assert!(err.to_string().contains("32"));
    }

    #[test]
    fn rejects_invalid_characters() {
        for raw in [
            "abcDEF0123456789abcDEF0123456789!!",
            "abcDEF0123456789 abcDEF0123456789",
            "abcDEF0123456789abcDEF0123456789/+",
        ] {
            let err = AccessToken::new(raw).unwrap_err();
            assert!(matches!(err, Error::Authentication { .. }), "{raw:?}");
        }
    }

    #[test]
    fn debug_output_redacts_secret() {
        let token = AccessToken::new(VALID).unwrap();
        assert!(!format!("{token:?}").contains(VALID));
    }
}
