//! `Tranxbit` server entry point.
//!
//! Picks a registrar, then starts the Axum HTTP server with graceful
//! shutdown on SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use tranxbit_core::registrar::Registrar;
use tranxbit_server::config::ServerConfig;
use tranxbit_server::registrar::LocalRegistrar;
use tranxbit_server::routes;
use tranxbit_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!("Tranxbit starting");

    let registrar = build_registrar(&config)?;
    let state = Arc::new(AppState::new(registrar));
    let app = routes::build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Tranxbit server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Tranxbit server stopped");
    Ok(())
}

/// Choose where accepted registrations go.
fn build_registrar(config: &ServerConfig) -> anyhow::Result<Arc<dyn Registrar>> {
    match &config.auth_service {
        #[cfg(feature = "auth-service")]
        Some(auth) => {
            info!(url = %auth.base_url, timeout_secs = auth.timeout_secs, "using authentication service");
            let registrar = tranxbit_server::registrar::HttpRegistrar::new(auth)
                .context("failed to build authentication service client")?;
            Ok(Arc::new(registrar))
        }
        #[cfg(not(feature = "auth-service"))]
        Some(_) => {
            anyhow::bail!("TRANXBIT_AUTH_URL set but feature 'auth-service' is not enabled");
        }
        None => {
            info!("using in-memory registrar (accounts will not persist)");
            Ok(Arc::new(LocalRegistrar::new()))
        }
    }
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
