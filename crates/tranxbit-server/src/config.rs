//! Server configuration for `Tranxbit`.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `TRANXBIT_*` environment variables.

use std::net::SocketAddr;

/// Default request timeout for the authentication service.
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 10;

/// Default cap on concurrent sign-up requests.
const DEFAULT_REGISTER_CONCURRENCY: usize = 32;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// External authentication service (None = in-memory registrar).
    pub auth_service: Option<AuthServiceConfig>,
    /// Allowed CORS origin (None = any origin).
    pub cors_origin: Option<String>,
    /// Maximum in-flight requests on the registration routes.
    pub register_concurrency: usize,
}

/// Where accepted registrations are sent.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Base URL of the authentication service (e.g., `https://auth.tranxbit.com/api`).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on, binds to `0.0.0.0`
    /// - `TRANXBIT_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:8300`)
    /// - `TRANXBIT_LOG_LEVEL`: log filter (default: `info`)
    /// - `TRANXBIT_AUTH_URL`: authentication service base URL (optional)
    /// - `TRANXBIT_AUTH_TIMEOUT_SECS`: authentication service timeout (default: `10`)
    /// - `TRANXBIT_CORS_ORIGIN`: allowed browser origin (default: any)
    /// - `TRANXBIT_REGISTER_CONCURRENCY`: in-flight sign-up cap (default: `32`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let default_addr = SocketAddr::from(([127, 0, 0, 1], 8300));

        // Priority: TRANXBIT_BIND_ADDR > PORT > default 127.0.0.1:8300
        let bind_addr = if let Some(addr) = get("TRANXBIT_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port_str) = get("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8300);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            default_addr
        };

        let log_level = get("TRANXBIT_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let auth_service = get("TRANXBIT_AUTH_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| AuthServiceConfig {
                base_url: url.trim_end_matches('/').to_owned(),
                timeout_secs: get("TRANXBIT_AUTH_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_AUTH_TIMEOUT_SECS),
            });

        let cors_origin = get("TRANXBIT_CORS_ORIGIN").filter(|o| !o.is_empty() && o != "*");

        let register_concurrency = get("TRANXBIT_REGISTER_CONCURRENCY")
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(DEFAULT_REGISTER_CONCURRENCY);

        Self {
            bind_addr,
            log_level,
            auth_service,
            cors_origin,
            register_concurrency,
        }
    }
}
