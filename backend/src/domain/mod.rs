//! Domain types for the relay: GraphQL envelopes and the upstream port.
//!
//! These types are transport agnostic. The inbound HTTP adapter maps them to
//! Actix responses; the outbound gateway maps them to reqwest calls.

pub mod envelope;
pub mod ports;

pub use envelope::{GraphqlErrorEntry, GraphqlErrorEnvelope, GraphqlRequest};
pub use ports::{UpstreamGateway, UpstreamGatewayError, UpstreamReply};
