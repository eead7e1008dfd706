//! Credential fingerprinting for diagnostics.
//!
//! The proxy logs which credential a request carried without writing the
//! token itself. A truncated SHA-256 digest gives operators enough to match
//! log lines against a known key while staying useless as bearer material.

use sha2::{Digest, Sha256};

use crate::token::ApiCredential;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Produce a 16-character lowercase hex fingerprint of the credential.
///
/// # Examples
///
/// ```
/// use credential::{credential_fingerprint, ApiCredential};
///
/// let token = ApiCredential::new("fh-12345").expect("valid token");
/// let fp = credential_fingerprint(&token);
///
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn credential_fingerprint(credential: &ApiCredential) -> String {
    let mut hasher = Sha256::new();
    hasher.update(credential.expose().as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
