//! Landing-page content routes: `/v1/content/*`

use std::sync::Arc;

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use tranxbit_core::content::{FAQ, FEATURED_OFFERS, FaqAccordion, FaqEntry, FeaturedOffer};

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/v1/content` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/faq", get(list_faq))
        .route("/faq/{index}", get(open_faq))
        .route("/offers", get(list_offers))
}

#[derive(Debug, Serialize)]
pub struct FaqResponse {
    pub entries: &'static [FaqEntry],
}

#[derive(Debug, Serialize)]
pub struct FaqEntryResponse {
    pub open: Option<usize>,
    pub entry: Option<&'static FaqEntry>,
}

#[derive(Debug, Serialize)]
pub struct OffersResponse {
    pub offers: &'static [FeaturedOffer],
}

async fn list_faq() -> Json<FaqResponse> {
    Json(FaqResponse { entries: &FAQ })
}

/// Accordion state after expanding `index` from a collapsed list.
async fn open_faq(Path(index): Path<usize>) -> Result<Json<FaqEntryResponse>, AppError> {
    let mut accordion = FaqAccordion::new();
    accordion.toggle(index)?;

    Ok(Json(FaqEntryResponse {
        open: accordion.open_index(),
        entry: accordion.open_entry(),
    }))
}

async fn list_offers() -> Json<OffersResponse> {
    Json(OffersResponse {
        offers: &FEATURED_OFFERS,
    })
}
