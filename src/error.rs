use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum MedcalError {
    #[error("Invalid parameters")]
    InvalidParameters,

    #[error("invalid date `{value}`, expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid time `{value}`, expected HH:MM")]
    InvalidTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl IntoResponse for MedcalError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self {
            MedcalError::InvalidParameters => (StatusCode::BAD_REQUEST, "INVALID_PARAMETERS"),
            MedcalError::InvalidDate { .. } => (StatusCode::BAD_REQUEST, "INVALID_DATE"),
            MedcalError::InvalidTime { .. } => (StatusCode::BAD_REQUEST, "INVALID_TIME"),
            MedcalError::InvalidMonth { .. } => (StatusCode::BAD_REQUEST, "INVALID_MONTH"),
            MedcalError::MissingField(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELD"),
            MedcalError::DatabaseError(e) => {
                tracing::error!(error = %e, "database error while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };
        let message = match self {
            MedcalError::DatabaseError(_) => "An internal server error occurred.".to_string(),
            other => other.to_string(),
        };
        let body = ApiErrorResponse {
            success: false,
            code: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
}
