//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the relay: the `/api/graphql` passthrough, the health probes, and the
//! envelope schemas. The generated specification backs Swagger UI in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::envelope::{GraphqlErrorEntry, GraphqlErrorEnvelope, GraphqlRequest};

/// Enrich the generated document with the credential header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "UpstreamCredential",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                credential::API_KEY_HEADER,
                "Upstream API credential, relayed verbatim; deployments using the \
                 authorization scheme send `Authorization: Token <credential>` instead.",
            ))),
        );
    }
}

/// OpenAPI document for the relay API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Flexhire relay proxy API",
        description = "Credential-relaying passthrough in front of the Flexhire GraphQL API.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("UpstreamCredential" = [])),
    paths(
        crate::inbound::http::graphql::relay,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(GraphqlRequest, GraphqlErrorEnvelope, GraphqlErrorEntry)),
    tags(
        (name = "graphql", description = "Credential-relaying GraphQL passthrough"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
