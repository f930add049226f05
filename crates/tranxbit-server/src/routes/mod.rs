//! HTTP routes for `Tranxbit` server.
//!
//! Every handler lives under `/v1`. [`build_router`] assembles the full
//! application, middleware included, so tests exercise the same stack the
//! binary serves.

pub mod catalog;
pub mod content;
pub mod dashboard;
pub mod register;
pub mod sys;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    // Sign-ups call out to the authentication service; cap them separately.
    let register_routes = Router::new()
        .nest("/v1/register", register::router())
        .layer(ConcurrencyLimitLayer::new(config.register_concurrency));

    Router::new()
        .nest("/v1/sys", sys::router())
        .merge(register_routes)
        .nest("/v1/catalog", catalog::router())
        .nest("/v1/content", content::router())
        .nest("/v1/dashboard", dashboard::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.cors_origin.as_deref()))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(e)) => {
            warn!(error = %e, "invalid TRANXBIT_CORS_ORIGIN, allowing any origin");
            AllowOrigin::from(Any)
        }
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
