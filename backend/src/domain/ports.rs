//! Domain ports defining the edges of the relay.
//!
//! The single driven port is the upstream gateway. It exposes a strongly
//! typed error so the HTTP adapter maps failures into the GraphQL error
//! envelope instead of leaking transport detail.

use std::sync::Mutex;

use async_trait::async_trait;
use credential::ApiCredential;
use thiserror::Error;

use super::envelope::GraphqlRequest;

/// Raw upstream reply relayed to the caller without reinterpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    /// HTTP status code returned by the upstream.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

/// Errors raised while dispatching a request to the upstream.
#[derive(Debug, Error)]
pub enum UpstreamGatewayError {
    /// The outbound request could not be constructed or sent.
    #[error("upstream dispatch failed: {message}")]
    Transport {
        /// Failure description safe to surface to callers.
        message: String,
    },
}

impl UpstreamGatewayError {
    /// Construct a transport failure.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Driven port forwarding GraphQL envelopes to the upstream API.
///
/// Implementations attach the credential in whichever header convention is
/// configured, send the envelope, and hand back the reply untouched. A
/// missing credential is forwarded as absent, never rejected here.
#[async_trait]
pub trait UpstreamGateway: Send + Sync {
    /// Forward one envelope and return the upstream's raw reply.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamGatewayError::Transport`] when the request cannot be
    /// sent or the response body cannot be read. A non-success upstream
    /// status is not an error; it is part of the reply.
    async fn forward(
        &self,
        request: &GraphqlRequest,
        credential: Option<&ApiCredential>,
    ) -> Result<UpstreamReply, UpstreamGatewayError>;
}

/// Record of one forwarded request, captured by [`FixtureUpstreamGateway`].
#[derive(Debug, Clone)]
pub struct RecordedForward {
    /// The forwarded envelope.
    pub request: GraphqlRequest,
    /// The credential attached to the forward, when present.
    pub credential: Option<ApiCredential>,
}

/// Canned gateway used by tests and local assembly without network access.
///
/// Replays a fixed reply and records every forward so tests can assert what
/// crossed the port.
pub struct FixtureUpstreamGateway {
    reply: Result<UpstreamReply, String>,
    forwards: Mutex<Vec<RecordedForward>>,
}

impl FixtureUpstreamGateway {
    /// Gateway that answers every forward with `status` and `body`.
    #[must_use]
    pub fn replying(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            reply: Ok(UpstreamReply {
                status,
                body: body.into(),
            }),
            forwards: Mutex::new(Vec::new()),
        }
    }

    /// Gateway that fails every forward with a transport error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            forwards: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the forwards observed so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<RecordedForward> {
        self.forwards
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UpstreamGateway for FixtureUpstreamGateway {
    async fn forward(
        &self,
        request: &GraphqlRequest,
        credential: Option<&ApiCredential>,
    ) -> Result<UpstreamReply, UpstreamGatewayError> {
        if let Ok(mut guard) = self.forwards.lock() {
            guard.push(RecordedForward {
                request: request.clone(),
                credential: credential.cloned(),
            });
        }
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(UpstreamGatewayError::transport(message.clone())),
        }
    }
}
