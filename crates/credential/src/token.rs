//! Opaque API credential value.
//!
//! The token is bearer material for the upstream API. It is never inspected
//! beyond a non-empty check, never serialised, and its `Debug` output shows a
//! truncated fingerprint instead of the raw value.

use std::fmt;

use zeroize::Zeroize;

use crate::fingerprint::credential_fingerprint;

/// Opaque bearer token identifying a user to the upstream API.
///
/// ## Invariants
/// - The wrapped value is non-empty and carries no leading or trailing
///   whitespace.
///
/// # Examples
/// ```
/// use credential::ApiCredential;
///
/// let token = ApiCredential::new("fh-12345").expect("valid token");
/// assert_eq!(token.expose(), "fh-12345");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

/// Validation errors returned when constructing an [`ApiCredential`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    /// The supplied token was empty once trimmed.
    #[error("credential must not be empty")]
    Empty,
}

impl ApiCredential {
    /// Construct a credential after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError::Empty`] when the trimmed value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, CredentialValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CredentialValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the raw token.
    ///
    /// The name is deliberately loud: call sites that expose the token should
    /// be easy to audit. Do not pass the result to a logger.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiCredential")
            .field(&credential_fingerprint(self))
            .finish()
    }
}

impl Drop for ApiCredential {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
