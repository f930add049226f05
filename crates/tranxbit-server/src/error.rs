//! HTTP error types for `Tranxbit` server.
//!
//! Maps domain errors from `tranxbit-core` into HTTP responses. Every error
//! produces a JSON body with a machine-readable `error` field and a
//! human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use tranxbit_core::error::{CatalogError, ContentError, RegistrationError, SubmitError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// The submission guard refused the draft.
    Rejected(RegistrationError),
    /// The authentication service refused or failed; message is shown verbatim.
    Upstream(String),
    /// Requested resource not found.
    NotFound(String),
    /// Client sent invalid input.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, detail) = match self {
            Self::Rejected(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "rejected",
                err.reason(),
                Some(err.user_message()),
            ),
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, "registration_failed", msg, None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_owned(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error_type,
            message,
            detail,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Rejected(inner) => Self::Rejected(inner),
            SubmitError::Service(msg) => Self::Upstream(msg),
            SubmitError::Cancelled => Self::Internal(err.to_string()),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownBrand { .. } => Self::NotFound(err.to_string()),
            CatalogError::UnknownDenomination { .. } => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::UnknownFaq { .. } => Self::NotFound(err.to_string()),
        }
    }
}
