//! Shared application state for `Tranxbit` server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. Requests carry their own registration draft, so
//! the state holds only the registrar and read-only account data.

use std::sync::Arc;

use tranxbit_core::dashboard::AccountSummary;
use tranxbit_core::registrar::Registrar;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Account creation backend.
    pub registrar: Arc<dyn Registrar>,
    /// Header data for the dashboard shell.
    pub account: AccountSummary,
}

impl AppState {
    #[must_use]
    pub fn new(registrar: Arc<dyn Registrar>) -> Self {
        Self {
            registrar,
            account: AccountSummary::demo(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
