//! Cross-origin policy for the relay endpoint.
//!
//! Exactly one browser origin may call the relay, with `POST` only. The
//! active credential header is accepted on requests and listed in the
//! exposed headers so browser clients can read it back whichever scheme is
//! deployed.

use actix_cors::Cors;
use actix_web::http::header;

use crate::config::ProxyConfig;

/// Build the CORS middleware for the configured frontend origin.
#[must_use]
pub fn relay_cors(config: &ProxyConfig) -> Cors {
    Cors::default()
        .allowed_origin(&config.frontend_origin)
        .allowed_methods(vec!["POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .allowed_header(config.scheme.header_name())
        .expose_headers(vec![config.scheme.header_name()])
}
