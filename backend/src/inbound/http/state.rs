//! Shared HTTP adapter state.
//!
//! The relay handler accepts this state via `actix_web::web::Data` so it only
//! depends on the upstream port and stays testable without network access.

use std::sync::Arc;

use credential::CredentialScheme;

use crate::domain::ports::UpstreamGateway;

/// Dependency bundle for the relay handler.
#[derive(Clone)]
pub struct ProxyState {
    /// Gateway forwarding envelopes to the upstream API.
    pub gateway: Arc<dyn UpstreamGateway>,
    /// Header convention for extracting and re-attaching the credential.
    pub scheme: CredentialScheme,
}

impl ProxyState {
    /// Bundle a gateway with the active credential scheme.
    #[must_use]
    pub fn new(gateway: Arc<dyn UpstreamGateway>, scheme: CredentialScheme) -> Self {
        Self { gateway, scheme }
    }
}
