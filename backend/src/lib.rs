//! Credential-relaying GraphQL proxy library modules.
//!
//! The proxy accepts GraphQL request envelopes on `/api/graphql`, re-attaches
//! the caller's credential in the header convention the upstream expects, and
//! relays the upstream's status and body bytes verbatim. Modules follow the
//! hexagonal split: `domain` holds the envelopes and the upstream port,
//! `inbound` the HTTP adapter, `outbound` the reqwest-backed upstream gateway.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped trace middleware, re-exported for server assembly.
pub use middleware::trace::RequestTrace;
