//! GraphQL request and error envelopes.
//!
//! The proxy understands exactly two JSON shapes: the request envelope it
//! forwards, and the error envelope it produces when the forward itself
//! fails. Upstream response bodies stay opaque bytes end to end.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// GraphQL request envelope accepted from clients and forwarded upstream.
///
/// ## Invariants
/// - `variables` is always present on the wire once re-serialised; an absent
///   field deserialises to an empty object.
///
/// # Examples
/// ```
/// use backend::domain::GraphqlRequest;
///
/// let request: GraphqlRequest =
///     serde_json::from_str(r#"{"query":"query { currentUser { name } }"}"#)
///         .expect("valid envelope");
/// assert!(request.variables.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GraphqlRequest {
    /// GraphQL document text.
    #[schema(example = "query { currentUser { name } }")]
    pub query: String,
    /// Operation variables. Defaults to an empty object when omitted.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub variables: Map<String, Value>,
}

/// Error envelope returned when the proxy cannot reach the upstream.
///
/// Mirrors the standard GraphQL response shape so clients parse relay
/// failures with the same code path as upstream errors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GraphqlErrorEnvelope {
    /// Error list; the proxy always emits exactly one entry.
    pub errors: Vec<GraphqlErrorEntry>,
}

/// Single entry in a [`GraphqlErrorEnvelope`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GraphqlErrorEntry {
    /// Human-readable failure description.
    #[schema(example = "upstream dispatch failed: connection refused")]
    pub message: String,
}

impl GraphqlErrorEnvelope {
    /// Wrap one failure description in the envelope shape.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            errors: vec![GraphqlErrorEntry {
                message: message.into(),
            }],
        }
    }
}
