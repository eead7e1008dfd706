//! Header conventions for carrying the credential over HTTP.
//!
//! Two deployments of the same contract exist: a custom `FLEXHIRE-API-KEY`
//! header carrying the token verbatim, and a standard `Authorization` header
//! wrapping the token as `Token <value>`. The active scheme is selected once
//! at startup and governs both inbound extraction at the proxy and outbound
//! attachment towards the upstream.

use std::fmt;
use std::str::FromStr;

use crate::token::{ApiCredential, CredentialValidationError};

/// Header name used by the custom-header scheme.
pub const API_KEY_HEADER: &str = "FLEXHIRE-API-KEY";
/// Header name used by the authorization scheme.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

const TOKEN_PREFIX: &str = "Token ";

/// Header convention used to carry the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScheme {
    /// `FLEXHIRE-API-KEY: <token>` with the token passed verbatim.
    ApiKeyHeader,
    /// `Authorization: Token <token>`.
    AuthorizationToken,
}

/// Errors raised when decoding a header value into a credential.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemeDecodeError {
    /// The header value does not match the scheme's expected shape.
    #[error("header value does not match the {scheme} scheme")]
    InvalidFormat {
        /// Scheme that rejected the value.
        scheme: CredentialScheme,
    },
    /// The header matched the scheme but carried a blank token.
    #[error(transparent)]
    InvalidToken(#[from] CredentialValidationError),
}

/// Errors raised when parsing a scheme name from configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemeParseError {
    /// The configured name matches no known scheme.
    #[error("unknown credential scheme '{value}'; expected api-key|authorization-token")]
    Unknown {
        /// The rejected configuration value.
        value: String,
    },
}

impl CredentialScheme {
    /// Name of the HTTP header this scheme reads and writes.
    #[must_use]
    pub const fn header_name(self) -> &'static str {
        match self {
            Self::ApiKeyHeader => API_KEY_HEADER,
            Self::AuthorizationToken => AUTHORIZATION_HEADER,
        }
    }

    /// Render the header value carrying `credential` under this scheme.
    #[must_use]
    pub fn encode(self, credential: &ApiCredential) -> String {
        match self {
            Self::ApiKeyHeader => credential.expose().to_owned(),
            Self::AuthorizationToken => format!("{TOKEN_PREFIX}{}", credential.expose()),
        }
    }

    /// Recover the credential from a header value written by [`Self::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemeDecodeError::InvalidFormat`] when an authorization
    /// value lacks the `Token` prefix, and
    /// [`SchemeDecodeError::InvalidToken`] when the carried token is blank.
    pub fn decode(self, header_value: &str) -> Result<ApiCredential, SchemeDecodeError> {
        let raw = match self {
            Self::ApiKeyHeader => header_value,
            Self::AuthorizationToken => header_value
                .strip_prefix(TOKEN_PREFIX)
                .ok_or(SchemeDecodeError::InvalidFormat { scheme: self })?,
        };
        Ok(ApiCredential::new(raw)?)
    }
}

impl fmt::Display for CredentialScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKeyHeader => f.write_str("api-key"),
            Self::AuthorizationToken => f.write_str("authorization-token"),
        }
    }
}

impl FromStr for CredentialScheme {
    type Err = SchemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api-key" => Ok(Self::ApiKeyHeader),
            "authorization-token" => Ok(Self::AuthorizationToken),
            _ => Err(SchemeParseError::Unknown { value: s.to_owned() }),
        }
    }
}
