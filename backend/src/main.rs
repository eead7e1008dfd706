//! Proxy entry-point: wires the relay endpoint, health probes, and docs.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::config::{proxy_config_from_env, BuildMode};
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::UpstreamGateway;
use backend::inbound::http::cors::relay_cors;
use backend::inbound::http::graphql::relay;
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::state::ProxyState;
use backend::outbound::flexhire::FlexhireHttpGateway;
use backend::RequestTrace;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = proxy_config_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|error| std::io::Error::other(format!("invalid proxy configuration: {error}")))?;

    let gateway: Arc<dyn UpstreamGateway> = Arc::new(
        FlexhireHttpGateway::new(config.upstream_url.clone(), config.scheme)
            .map_err(|error| std::io::Error::other(format!("build upstream client: {error}")))?,
    );
    let proxy_state = web::Data::new(ProxyState::new(gateway, config.scheme));

    info!(
        bind_addr = %config.bind_addr,
        upstream = %config.upstream_url,
        scheme = %config.scheme,
        frontend_origin = %config.frontend_origin,
        "starting relay proxy"
    );

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let server_config = config.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(proxy_state.clone())
            .wrap(relay_cors(&server_config))
            .wrap(RequestTrace)
            .service(relay)
            .service(ready)
            .service(live);

        #[cfg(feature = "metrics")]
        let app = app.wrap(make_metrics());

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> actix_web_prom::PrometheusMetrics {
    use actix_web_prom::PrometheusMetricsBuilder;

    PrometheusMetricsBuilder::new("relay")
        .endpoint("/metrics")
        .build()
        .expect("configure Prometheus metrics")
}
