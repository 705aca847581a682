use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// A single rejected input field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Input rejected before any side effect took place.
#[derive(Debug, Error)]
#[error("{} campo(s) inválido(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldError>>,
}

// Client-visible bodies stay generic; the underlying error only reaches the
// logs. Credential mismatches never pass through here (uniform 200 contract)
// and notification failures never leave the notify module.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(e) => {
                let body = ErrorBody {
                    success: false,
                    message: "Datos inválidos".into(),
                    details: Some(e.errors),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Storage(e) => {
                error!(error = %e, "storage failure");
                internal_response()
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal failure");
                internal_response()
            }
        }
    }
}

fn internal_response() -> Response {
    let body = ErrorBody {
        success: false,
        message: "Error interno del servidor".into(),
        details: None,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
