//! Shared credential primitives for the GraphQL relay proxy and its clients.
//!
//! The proxy and the profile client both carry the same opaque API token, in
//! one of two header conventions selected once at startup. This crate keeps
//! the token type, the header scheme, and the log-safe fingerprint in one
//! place so the two sides cannot drift apart.
//!
//! # Example
//!
//! ```
//! use credential::{ApiCredential, CredentialScheme};
//!
//! let token = ApiCredential::new("fh-12345").expect("non-empty token");
//! let scheme = CredentialScheme::AuthorizationToken;
//!
//! let value = scheme.encode(&token);
//! assert_eq!(value, "Token fh-12345");
//!
//! let decoded = scheme.decode(&value).expect("round trip");
//! assert_eq!(decoded.expose(), token.expose());
//! ```

mod fingerprint;
mod scheme;
mod token;

pub use fingerprint::credential_fingerprint;
pub use scheme::{
    CredentialScheme, SchemeDecodeError, SchemeParseError, API_KEY_HEADER, AUTHORIZATION_HEADER,
};
pub use token::{ApiCredential, CredentialValidationError};
