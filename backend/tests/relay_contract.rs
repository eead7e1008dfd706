//! End-to-end contract tests for the relay endpoint.
//!
//! The app is assembled exactly as the binary assembles it — CORS, trace
//! middleware, relay handler, health probes — with the upstream port
//! replaced by the fixture gateway, so the tests exercise the full inbound
//! path without network access.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{test as actix_test, web, App, Error};
use credential::CredentialScheme;
use rstest::rstest;
use serde_json::Value;

use backend::config::{proxy_config_from_env, BuildMode, ProxyConfig};
use backend::domain::ports::FixtureUpstreamGateway;
use backend::inbound::http::cors::relay_cors;
use backend::inbound::http::graphql::relay;
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::state::ProxyState;
use backend::RequestTrace;

const ENVELOPE: &str = r#"{"query":"query { currentUser { name } }","variables":{}}"#;
const FRONTEND_ORIGIN: &str = "http://localhost:3002";

fn test_config(scheme: CredentialScheme) -> ProxyConfig {
    let mut env = mockable::MockEnv::new();
    let scheme_name = scheme.to_string();
    env.expect_string().returning(move |name| match name {
        "CREDENTIAL_SCHEME" => Some(scheme_name.clone()),
        "FRONTEND_ORIGIN" => Some(FRONTEND_ORIGIN.to_owned()),
        _ => None,
    });
    proxy_config_from_env(&env, BuildMode::Debug).expect("debug config")
}

async fn relay_app(
    gateway: Arc<FixtureUpstreamGateway>,
    scheme: CredentialScheme,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let config = test_config(scheme);
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    actix_test::init_service(
        App::new()
            .app_data(health_state)
            .app_data(web::Data::new(ProxyState::new(gateway, scheme)))
            .wrap(relay_cors(&config))
            .wrap(RequestTrace)
            .service(relay)
            .service(ready)
            .service(live),
    )
    .await
}

fn post_envelope() -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/graphql")
        .insert_header((header::ORIGIN, FRONTEND_ORIGIN))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(ENVELOPE)
}

#[actix_web::test]
async fn upstream_reply_passes_through_byte_identical() {
    let upstream_body = br#"{"data":{"currentUser":{"name":"Ada","avatarUrl":null}}}"#.to_vec();
    let gateway = Arc::new(FixtureUpstreamGateway::replying(200, upstream_body.clone()));
    let app = relay_app(Arc::clone(&gateway), CredentialScheme::ApiKeyHeader).await;

    let response = actix_test::call_service(
        &app,
        post_envelope()
            .insert_header(("FLEXHIRE-API-KEY", "fh-12345"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), upstream_body.as_slice());
}

#[rstest]
#[case::api_key(CredentialScheme::ApiKeyHeader, "FLEXHIRE-API-KEY", "fh-12345")]
#[case::authorization(CredentialScheme::AuthorizationToken, "Authorization", "Token fh-12345")]
#[actix_web::test]
async fn both_schemes_extract_and_forward_the_credential(
    #[case] scheme: CredentialScheme,
    #[case] header_name: &'static str,
    #[case] header_value: &'static str,
) {
    let gateway = Arc::new(FixtureUpstreamGateway::replying(200, b"{}".to_vec()));
    let app = relay_app(Arc::clone(&gateway), scheme).await;

    let response = actix_test::call_service(
        &app,
        post_envelope()
            .insert_header((header_name, header_value))
            .to_request(),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);

    let forwards = gateway.recorded();
    let credential = forwards
        .first()
        .and_then(|forward| forward.credential.clone())
        .expect("credential forwarded");
    assert_eq!(credential.expose(), "fh-12345");
}

#[actix_web::test]
async fn missing_credential_still_forwards() {
    let gateway = Arc::new(FixtureUpstreamGateway::replying(200, b"{}".to_vec()));
    let app = relay_app(Arc::clone(&gateway), CredentialScheme::ApiKeyHeader).await;

    let response = actix_test::call_service(&app, post_envelope().to_request()).await;

    assert_eq!(response.status().as_u16(), 200, "relay must never reject locally");
    let forwards = gateway.recorded();
    assert_eq!(forwards.len(), 1, "request must reach the gateway");
    assert!(forwards.first().and_then(|f| f.credential.clone()).is_none());
}

#[actix_web::test]
async fn dispatch_failure_yields_500_with_one_error_entry() {
    let gateway = Arc::new(FixtureUpstreamGateway::failing("upstream unreachable"));
    let app = relay_app(gateway, CredentialScheme::ApiKeyHeader).await;

    let response = actix_test::call_service(&app, post_envelope().to_request()).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = actix_test::read_body_json(response).await;
    let errors = body.get("errors").and_then(Value::as_array).expect("errors array");
    assert_eq!(errors.len(), 1);
}

#[actix_web::test]
async fn responses_carry_trace_identifiers() {
    let gateway = Arc::new(FixtureUpstreamGateway::replying(200, b"{}".to_vec()));
    let app = relay_app(gateway, CredentialScheme::ApiKeyHeader).await;

    let response = actix_test::call_service(&app, post_envelope().to_request()).await;
    assert!(response.headers().contains_key("trace-id"));
}

#[actix_web::test]
async fn preflight_allows_only_the_configured_origin() {
    let gateway = Arc::new(FixtureUpstreamGateway::replying(200, b"{}".to_vec()));
    let app = relay_app(gateway, CredentialScheme::ApiKeyHeader).await;

    let allowed = actix_test::call_service(
        &app,
        actix_test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/graphql")
            .insert_header((header::ORIGIN, FRONTEND_ORIGIN))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "flexhire-api-key"))
            .to_request(),
    )
    .await;
    assert!(
        allowed.status().is_success(),
        "preflight from the configured origin should pass, got {}",
        allowed.status()
    );
    assert_eq!(
        allowed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some(FRONTEND_ORIGIN)
    );

    let denied = actix_test::try_call_service(
        &app,
        actix_test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/graphql")
            .insert_header((header::ORIGIN, "http://evil.example"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request(),
    )
    .await;
    match denied {
        Ok(response) => assert!(
            !response.status().is_success(),
            "preflight from a foreign origin must not succeed"
        ),
        Err(_) => {} // rejected before reaching a handler
    }
}

#[actix_web::test]
async fn health_probes_respond() {
    let gateway = Arc::new(FixtureUpstreamGateway::replying(200, b"{}".to_vec()));
    let app = relay_app(gateway, CredentialScheme::ApiKeyHeader).await;

    for path in ["/health/ready", "/health/live"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(path).to_request(),
        )
        .await;
        assert_eq!(response.status().as_u16(), 200, "{path} should answer 200");
    }
}
