//! Relay handler for `POST /api/graphql`.
//!
//! ```text
//! POST /api/graphql {"query":"query { currentUser { name } }","variables":{}}
//! ```
//!
//! The handler extracts the caller's credential from the configured header,
//! forwards the envelope through the upstream gateway, and relays the
//! upstream status and body bytes verbatim. Credential material never
//! reaches the logs; diagnostics carry a truncated fingerprint instead.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use actix_web::{post, web, HttpRequest, HttpResponse};
use credential::{credential_fingerprint, ApiCredential, CredentialScheme};
use tracing::{debug, error, info};

use crate::domain::envelope::{GraphqlErrorEnvelope, GraphqlRequest};
use crate::inbound::http::state::ProxyState;

/// Relay one GraphQL envelope to the upstream API.
///
/// The proxy makes no authentication decision of its own: an absent or
/// malformed credential header is forwarded as absent, and the upstream's
/// verdict comes back unmodified.
#[utoipa::path(
    post,
    path = "/api/graphql",
    request_body = GraphqlRequest,
    responses(
        (status = 200, description = "Upstream reply, relayed verbatim"),
        (status = 400, description = "Malformed request envelope"),
        (status = 500, description = "Upstream dispatch failed", body = GraphqlErrorEnvelope)
    ),
    tags = ["graphql"],
    operation_id = "relayGraphql"
)]
#[post("/api/graphql")]
pub async fn relay(
    req: HttpRequest,
    payload: web::Json<GraphqlRequest>,
    state: web::Data<ProxyState>,
) -> HttpResponse {
    let credential = extract_credential(req.headers(), state.scheme);
    match credential.as_ref() {
        Some(token) => info!(
            credential = %credential_fingerprint(token),
            "relaying envelope with credential"
        ),
        None => info!("relaying envelope without credential"),
    }

    let envelope = payload.into_inner();
    debug!(
        query_bytes = envelope.query.len(),
        variable_count = envelope.variables.len(),
        "forwarding request body"
    );

    match state.gateway.forward(&envelope, credential.as_ref()).await {
        Ok(reply) => {
            info!(
                status = reply.status,
                body_bytes = reply.body.len(),
                "upstream replied"
            );
            relay_reply(reply.status, reply.body)
        }
        Err(gateway_error) => {
            error!(error = %gateway_error, "upstream dispatch failed");
            HttpResponse::InternalServerError()
                .json(GraphqlErrorEnvelope::from_message(gateway_error.to_string()))
        }
    }
}

/// Read and decode the credential header for the active scheme.
///
/// A missing header, a non-ASCII value, or a value that does not match the
/// scheme all yield `None`: the relay forwards the request without a
/// credential and leaves rejection to the upstream.
fn extract_credential(headers: &HeaderMap, scheme: CredentialScheme) -> Option<ApiCredential> {
    let value = headers.get(scheme.header_name())?;
    let text = match value.to_str() {
        Ok(text) => text,
        Err(_) => {
            debug!(
                header = scheme.header_name(),
                "ignoring non-ASCII credential header"
            );
            return None;
        }
    };
    match scheme.decode(text) {
        Ok(token) => Some(token),
        Err(decode_error) => {
            debug!(
                header = scheme.header_name(),
                error = %decode_error,
                "ignoring malformed credential header"
            );
            None
        }
    }
}

/// Build the relayed response from the upstream's status and body.
///
/// An out-of-range status code cannot be represented in the relayed
/// response; it degrades to the same 500 envelope as a dispatch failure.
fn relay_reply(status: u16, body: Vec<u8>) -> HttpResponse {
    match StatusCode::from_u16(status) {
        Ok(code) => HttpResponse::build(code)
            .content_type("application/json")
            .body(body),
        Err(_) => {
            error!(status, "upstream returned unrepresentable status code");
            HttpResponse::InternalServerError().json(GraphqlErrorEnvelope::from_message(format!(
                "upstream returned unrepresentable status code {status}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test as actix_test, App};
    use credential::CredentialScheme;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::FixtureUpstreamGateway;

    fn app_state(
        gateway: Arc<FixtureUpstreamGateway>,
        scheme: CredentialScheme,
    ) -> web::Data<ProxyState> {
        web::Data::new(ProxyState::new(gateway, scheme))
    }

    const ENVELOPE: &str = r#"{"query":"query { currentUser { name } }"}"#;

    #[actix_web::test]
    async fn relays_upstream_status_and_body_verbatim() {
        let body = br#"{"data":{"currentUser":{"name":"Ada"}}}"#.to_vec();
        let gateway = Arc::new(FixtureUpstreamGateway::replying(200, body.clone()));
        let app = actix_test::init_service(
            App::new()
                .app_data(app_state(Arc::clone(&gateway), CredentialScheme::ApiKeyHeader))
                .service(relay),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/api/graphql")
            .insert_header(("FLEXHIRE-API-KEY", "fh-12345"))
            .insert_header(("Content-Type", "application/json"))
            .set_payload(ENVELOPE)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status().as_u16(), 200);
        let relayed = actix_test::read_body(response).await;
        assert_eq!(relayed.as_ref(), body.as_slice(), "body must pass through byte-identical");
    }

    #[actix_web::test]
    async fn non_success_upstream_status_passes_through() {
        let gateway = Arc::new(FixtureUpstreamGateway::replying(
            401,
            br#"{"errors":[{"message":"bad key"}]}"#.to_vec(),
        ));
        let app = actix_test::init_service(
            App::new()
                .app_data(app_state(Arc::clone(&gateway), CredentialScheme::ApiKeyHeader))
                .service(relay),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/api/graphql")
            .insert_header(("Content-Type", "application/json"))
            .set_payload(ENVELOPE)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn missing_credential_is_forwarded_as_absent() {
        let gateway = Arc::new(FixtureUpstreamGateway::replying(200, b"{}".to_vec()));
        let app = actix_test::init_service(
            App::new()
                .app_data(app_state(Arc::clone(&gateway), CredentialScheme::ApiKeyHeader))
                .service(relay),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/api/graphql")
            .insert_header(("Content-Type", "application/json"))
            .set_payload(ENVELOPE)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status().as_u16(), 200, "relay must not reject locally");
        let forwards = gateway.recorded();
        assert_eq!(forwards.len(), 1);
        assert!(
            forwards.first().and_then(|f| f.credential.as_ref()).is_none(),
            "credential must be forwarded as absent"
        );
    }

    #[actix_web::test]
    async fn dispatch_failure_maps_to_500_with_single_error_entry() {
        let gateway = Arc::new(FixtureUpstreamGateway::failing("connection refused"));
        let app = actix_test::init_service(
            App::new()
                .app_data(app_state(Arc::clone(&gateway), CredentialScheme::ApiKeyHeader))
                .service(relay),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/api/graphql")
            .insert_header(("Content-Type", "application/json"))
            .set_payload(ENVELOPE)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status().as_u16(), 500);
        let body: Value = actix_test::read_body_json(response).await;
        let errors = body
            .get("errors")
            .and_then(Value::as_array)
            .expect("errors array");
        assert_eq!(errors.len(), 1, "exactly one error entry");
        let message = errors
            .first()
            .and_then(|entry| entry.get("message"))
            .and_then(Value::as_str)
            .expect("message field");
        assert!(message.contains("connection refused"));
    }

    #[actix_web::test]
    async fn variables_default_to_empty_object_before_forwarding() {
        let gateway = Arc::new(FixtureUpstreamGateway::replying(200, b"{}".to_vec()));
        let app = actix_test::init_service(
            App::new()
                .app_data(app_state(Arc::clone(&gateway), CredentialScheme::ApiKeyHeader))
                .service(relay),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/api/graphql")
            .insert_header(("Content-Type", "application/json"))
            .set_payload(ENVELOPE)
            .to_request();
        let _response = actix_test::call_service(&app, request).await;

        let forwards = gateway.recorded();
        let forwarded = forwards.first().expect("one forward");
        assert!(forwarded.request.variables.is_empty());
    }

    #[rstest]
    #[case::api_key(CredentialScheme::ApiKeyHeader, "FLEXHIRE-API-KEY", "fh-12345", "fh-12345")]
    #[case::authorization(
        CredentialScheme::AuthorizationToken,
        "Authorization",
        "Token fh-12345",
        "fh-12345"
    )]
    fn extracts_credentials_per_scheme(
        #[case] scheme: CredentialScheme,
        #[case] header: &'static str,
        #[case] value: &'static str,
        #[case] expected: &str,
    ) {
        let headers = header_map(header, value);
        let token = extract_credential(&headers, scheme).expect("credential present");
        assert_eq!(token.expose(), expected);
    }

    #[test]
    fn malformed_authorization_value_extracts_as_absent() {
        let headers = header_map("Authorization", "Bearer fh-12345");
        assert!(extract_credential(&headers, CredentialScheme::AuthorizationToken).is_none());
    }

    fn header_map(name: &str, value: &'static str) -> HeaderMap {
        use actix_web::http::header::{HeaderName, HeaderValue};

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(name.as_bytes()).expect("valid header name"),
            HeaderValue::from_static(value),
        );
        headers
    }
}
