//! Dashboard shell routes: `/v1/dashboard/*`
//!
//! Account header data and sidebar navigation state.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use tranxbit_core::dashboard::{self, BOTTOM_NAV_ITEMS, NAV_ITEMS, NavItem, Notification};

use crate::state::AppState;

/// Build the `/v1/dashboard` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/summary", get(summary))
        .route("/navigation", get(navigation))
}

// ── Request / Response types ─────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub display_name: String,
    pub initials: String,
    pub available_credits_cents: u64,
    pub formatted_credits: String,
    pub pending_orders: u32,
    pub unread_notifications: usize,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "/dashboard".to_owned()
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub items: &'static [NavItem],
    pub bottom_items: &'static [NavItem],
    pub active: Option<&'static str>,
    pub header_visible: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let account = &state.account;
    Json(SummaryResponse {
        display_name: account.display_name.clone(),
        initials: account.initials(),
        available_credits_cents: account.available_credits_cents,
        formatted_credits: account.formatted_credits(),
        pending_orders: account.pending_orders,
        unread_notifications: account.unread_count(),
        notifications: account.notifications.clone(),
    })
}

/// Sidebar state for the page at `?path=`.
async fn navigation(Query(query): Query<NavigationQuery>) -> Json<NavigationResponse> {
    Json(NavigationResponse {
        items: &NAV_ITEMS,
        bottom_items: &BOTTOM_NAV_ITEMS,
        active: dashboard::active_item(&query.path).map(|item| item.id),
        header_visible: dashboard::header_visible(&query.path),
    })
}
