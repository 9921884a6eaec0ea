use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::scholarships::filter::EligibilityError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Eligibility(EligibilityError::DataUnavailable) => {
                tracing::warn!("Scholarship query rejected: dataset is empty");
                (
                    StatusCode::NOT_FOUND,
                    "DATA_UNAVAILABLE",
                    "No scholarship data available".to_string(),
                )
            }
            AppError::Eligibility(EligibilityError::NoMatch) => (
                StatusCode::NOT_FOUND,
                "NO_MATCH",
                "No scholarships found".to_string(),
            ),
            AppError::Eligibility(EligibilityError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
