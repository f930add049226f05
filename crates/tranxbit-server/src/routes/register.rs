//! Registration routes: `/v1/register/*`
//!
//! `POST /validate` runs the live validation a form performs on each
//! keystroke and returns everything needed to draw it. `POST /` guards the
//! draft and submits it to the configured registrar.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use tranxbit_core::draft::RegistrationDraft;
use tranxbit_core::guard::{self, Decision};
use tranxbit_core::registrar::RegistrationOutcome;
use tranxbit_core::session::FormSession;
use tranxbit_core::strength::{StrengthBand, StrengthScore};
use tranxbit_core::validation::{self, ValidationReport};
use tranxbit_core::view::{self, RegistrationView, ViewFlags};

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/v1/register` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(register))
        .route("/validate", post(validate))
}

// ── Request / Response types ─────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub report: ValidationReport,
    pub strength: StrengthScore,
    pub band: StrengthBand,
    pub view: RegistrationView,
    pub decision: Decision,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Validate a draft without submitting it.
async fn validate(Json(draft): Json<RegistrationDraft>) -> Json<ValidateResponse> {
    let report = validation::validate(&draft);
    let strength = StrengthScore::from_report(&report.password);
    let flags = ViewFlags {
        password_help_open: !draft.password.is_empty(),
        ..ViewFlags::default()
    };

    Json(ValidateResponse {
        report,
        strength,
        band: strength.band(),
        view: view::render(&draft, &report, flags),
        decision: guard::decide(&draft, &report),
    })
}

/// Guard and submit a draft.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<RegistrationDraft>,
) -> Result<(StatusCode, Json<RegistrationOutcome>), AppError> {
    let mut session = FormSession::detached(draft);
    let outcome = session.submit(state.registrar.as_ref()).await?;

    let RegistrationOutcome::VerifyEmail { email } = &outcome;
    info!(email = %email, "registration submitted");

    Ok((StatusCode::CREATED, Json(outcome)))
}
