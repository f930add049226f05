//! `Tranxbit` HTTP server.
//!
//! Wires the core library into an Axum server. Serves the registration API
//! (live validation and sign-up) plus the catalog, landing content and
//! dashboard data at `/v1/*`.

pub mod config;
pub mod error;
pub mod registrar;
pub mod routes;
pub mod state;
