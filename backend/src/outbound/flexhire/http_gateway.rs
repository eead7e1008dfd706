//! Reqwest-backed upstream gateway adapter.
//!
//! This adapter owns transport details only: envelope serialisation,
//! credential header attachment, and reading the reply back as raw bytes.
//! It never interprets the upstream's body and never maps upstream HTTP
//! statuses to errors; both relay to the caller as-is.

use async_trait::async_trait;
use credential::{ApiCredential, CredentialScheme};
use reqwest::{Client, Url};

use crate::domain::envelope::GraphqlRequest;
use crate::domain::ports::{UpstreamGateway, UpstreamGatewayError, UpstreamReply};

/// `Accept` value preferring the GraphQL-over-HTTP response media type.
const ACCEPT_GRAPHQL_RESPONSE: &str =
    "application/graphql-response+json; charset=utf-8, application/json; charset=utf-8";

/// Upstream gateway that performs HTTP POST requests against one endpoint.
///
/// No request timeout is configured beyond the transport default; the relay
/// contract is a plain pass-through with no retry or deadline policy.
pub struct FlexhireHttpGateway {
    client: Client,
    endpoint: Url,
    scheme: CredentialScheme,
}

impl FlexhireHttpGateway {
    /// Build an adapter posting to `endpoint` with `scheme` header encoding.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, scheme: CredentialScheme) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint,
            scheme,
        })
    }
}

#[async_trait]
impl UpstreamGateway for FlexhireHttpGateway {
    async fn forward(
        &self,
        request: &GraphqlRequest,
        credential: Option<&ApiCredential>,
    ) -> Result<UpstreamReply, UpstreamGatewayError> {
        let mut outbound = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, ACCEPT_GRAPHQL_RESPONSE)
            .json(request);
        if let Some(token) = credential {
            outbound = outbound.header(self.scheme.header_name(), self.scheme.encode(token));
        }

        let response = outbound.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(UpstreamReply {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(transport: reqwest::Error) -> UpstreamGatewayError {
    UpstreamGatewayError::transport(transport.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_against_the_default_flexhire_endpoint() {
        let endpoint = Url::parse("https://flexhire.com/api/v2").expect("valid url");
        let gateway = FlexhireHttpGateway::new(endpoint, CredentialScheme::ApiKeyHeader);
        assert!(gateway.is_ok(), "default client construction should succeed");
    }
}
