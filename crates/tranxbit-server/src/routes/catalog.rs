//! Gift-card catalog routes: `/v1/catalog/*`

use std::sync::Arc;

use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use tranxbit_core::catalog::{self, Brand, DENOMINATIONS, PurchaseSelection};

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/v1/catalog` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/brands", get(list_brands))
        .route("/denominations", get(list_denominations))
        .route("/quote", post(quote))
}

// ── Request / Response types ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BrandQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct BrandListResponse {
    pub brands: Vec<&'static Brand>,
}

#[derive(Debug, Serialize)]
pub struct DenominationsResponse {
    pub currency: &'static str,
    pub amounts: &'static [u32],
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub brand: Option<String>,
    pub amount: Option<u32>,
    #[serde(default = "one")]
    pub quantity: u32,
}

const fn one() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub brand: Option<&'static Brand>,
    pub amount: Option<u32>,
    pub quantity: u32,
    pub total: u64,
    pub formatted_total: String,
    pub can_purchase: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Brands matching `?q=`, all of them when absent.
async fn list_brands(Query(query): Query<BrandQuery>) -> Json<BrandListResponse> {
    Json(BrandListResponse {
        brands: catalog::search_brands(&query.q),
    })
}

async fn list_denominations() -> Json<DenominationsResponse> {
    Json(DenominationsResponse {
        currency: "USD",
        amounts: &DENOMINATIONS,
    })
}

/// Price a brand/amount/quantity pick.
async fn quote(Json(body): Json<QuoteRequest>) -> Result<Json<QuoteResponse>, AppError> {
    let selection = PurchaseSelection::from_parts(body.brand.as_deref(), body.amount, body.quantity)?;

    Ok(Json(QuoteResponse {
        brand: selection.brand(),
        amount: selection.amount(),
        quantity: selection.quantity(),
        total: selection.total(),
        formatted_total: selection.formatted_total(),
        can_purchase: selection.can_purchase(),
    }))
}
