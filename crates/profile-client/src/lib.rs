//! Profile client for the credential-relaying GraphQL proxy.
//!
//! The client owns the browser-side half of the relay contract: it keeps the
//! API credential in a persistent slot, issues the fixed profile query and
//! visibility mutation through the proxy, classifies every response through
//! an explicit decision ladder, and flattens the upstream's nested payload
//! into a view model ready for rendering.
//!
//! Credential access goes through the injected [`CredentialStore`] so
//! library consumers and tests can swap the file slot for a fake.

pub mod query;
pub mod response;
pub mod service;
pub mod store;
pub mod view;

pub use response::{GraphqlError, ParsedResponse};
pub use service::{ProfileError, ProfileService};
pub use store::{CredentialStore, CredentialStoreError, FileCredentialStore, InMemoryCredentialStore};
pub use view::{JobApplication, Profile, Visibility};
