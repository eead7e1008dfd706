//! Proxy configuration parsing and validation.
//!
//! This module centralises the environment-driven relay settings so they are
//! validated consistently and can be tested in isolation. Debug builds
//! tolerate missing values and fall back to development defaults with a
//! warning; release builds require every deployment choice to be explicit.

use std::net::SocketAddr;

use credential::CredentialScheme;
use mockable::Env;
use tracing::warn;
use url::Url;

const BIND_ADDR_ENV: &str = "PROXY_BIND_ADDR";
const UPSTREAM_URL_ENV: &str = "UPSTREAM_GRAPHQL_URL";
const SCHEME_ENV: &str = "CREDENTIAL_SCHEME";
const FRONTEND_ORIGIN_ENV: &str = "FRONTEND_ORIGIN";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPSTREAM_URL: &str = "https://flexhire.com/api/v2";
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:3002";

const ADDR_EXPECTED: &str = "host:port socket address";
const URL_EXPECTED: &str = "absolute http(s) URL";
const SCHEME_EXPECTED: &str = "api-key|authorization-token";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing values.
    Debug,
    /// Release builds require explicit, valid settings.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Relay settings derived from the environment.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Upstream GraphQL endpoint requests are forwarded to.
    pub upstream_url: Url,
    /// Header convention carrying the credential on both legs.
    pub scheme: CredentialScheme,
    /// Sole browser origin allowed to call the relay endpoint.
    pub frontend_origin: String,
}

/// Errors raised while validating relay configuration.
#[derive(thiserror::Error, Debug)]
pub enum ProxyConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Name of the absent variable.
        name: &'static str,
    },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Name of the rejected variable.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Human-readable description of the accepted shape.
        expected: &'static str,
    },
}

/// Build relay settings from environment variables and build mode.
///
/// # Errors
///
/// In release mode, returns [`ProxyConfigError::MissingEnv`] for any unset
/// deployment choice. Both modes return [`ProxyConfigError::InvalidEnv`] for
/// a value that is present but does not parse; debug mode only substitutes
/// defaults for values that are absent.
///
/// # Examples
///
/// ```rust
/// use backend::config::{proxy_config_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "PROXY_BIND_ADDR" => Some("127.0.0.1:3000".to_owned()),
///     "UPSTREAM_GRAPHQL_URL" => Some("https://flexhire.com/api/v2".to_owned()),
///     "CREDENTIAL_SCHEME" => Some("api-key".to_owned()),
///     "FRONTEND_ORIGIN" => Some("http://localhost:3002".to_owned()),
///     _ => None,
/// });
///
/// let config = proxy_config_from_env(&env, BuildMode::Release)?;
/// assert_eq!(config.frontend_origin, "http://localhost:3002");
/// # Ok(())
/// # }
/// ```
pub fn proxy_config_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<ProxyConfig, ProxyConfigError> {
    let bind_addr = bind_addr_from_env(env, mode)?;
    let upstream_url = upstream_url_from_env(env, mode)?;
    let scheme = scheme_from_env(env, mode)?;
    let frontend_origin = frontend_origin_from_env(env, mode)?;

    Ok(ProxyConfig {
        bind_addr,
        upstream_url,
        scheme,
        frontend_origin,
    })
}

fn bind_addr_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<SocketAddr, ProxyConfigError> {
    let value = match env.string(BIND_ADDR_ENV) {
        Some(value) => value,
        None => {
            if !mode.is_debug() {
                return Err(ProxyConfigError::MissingEnv {
                    name: BIND_ADDR_ENV,
                });
            }
            warn!("{BIND_ADDR_ENV} not set; using default");
            DEFAULT_BIND_ADDR.to_owned()
        }
    };
    value
        .parse()
        .map_err(|_| ProxyConfigError::InvalidEnv {
            name: BIND_ADDR_ENV,
            value,
            expected: ADDR_EXPECTED,
        })
}

fn upstream_url_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Url, ProxyConfigError> {
    let value = match env.string(UPSTREAM_URL_ENV) {
        Some(value) => value,
        None => {
            if !mode.is_debug() {
                return Err(ProxyConfigError::MissingEnv {
                    name: UPSTREAM_URL_ENV,
                });
            }
            warn!("{UPSTREAM_URL_ENV} not set; using default");
            DEFAULT_UPSTREAM_URL.to_owned()
        }
    };
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(ProxyConfigError::InvalidEnv {
            name: UPSTREAM_URL_ENV,
            value,
            expected: URL_EXPECTED,
        }),
    }
}

fn scheme_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<CredentialScheme, ProxyConfigError> {
    let value = match env.string(SCHEME_ENV) {
        Some(value) => value,
        None => {
            if !mode.is_debug() {
                return Err(ProxyConfigError::MissingEnv { name: SCHEME_ENV });
            }
            warn!("{SCHEME_ENV} not set; defaulting to api-key");
            return Ok(CredentialScheme::ApiKeyHeader);
        }
    };
    value.parse().map_err(|_| ProxyConfigError::InvalidEnv {
        name: SCHEME_ENV,
        value,
        expected: SCHEME_EXPECTED,
    })
}

fn frontend_origin_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<String, ProxyConfigError> {
    let value = match env.string(FRONTEND_ORIGIN_ENV) {
        Some(value) => value,
        None => {
            if !mode.is_debug() {
                return Err(ProxyConfigError::MissingEnv {
                    name: FRONTEND_ORIGIN_ENV,
                });
            }
            warn!("{FRONTEND_ORIGIN_ENV} not set; using default");
            DEFAULT_FRONTEND_ORIGIN.to_owned()
        }
    };
    if Url::parse(&value).is_err() {
        return Err(ProxyConfigError::InvalidEnv {
            name: FRONTEND_ORIGIN_ENV,
            value,
            expected: URL_EXPECTED,
        });
    }
    // Browsers send Origin without a trailing slash; normalise to match.
    Ok(value.trim_end_matches('/').to_owned())
}
