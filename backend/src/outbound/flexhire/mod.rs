//! Flexhire outbound adapter.
//!
//! This module provides the reqwest implementation of the `UpstreamGateway`
//! port.

mod http_gateway;

pub use http_gateway::FlexhireHttpGateway;
