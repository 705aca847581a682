use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    contact::{
        dto::{ContactRequestCreate, ContactRequestResponse},
        services,
    },
    error::ApiError,
    state::AppState,
    store::ContactRequest,
};

pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contact-request", post(create_contact_request))
        .route("/contact-requests", get(list_contact_requests))
}

#[instrument(skip(state, payload))]
pub async fn create_contact_request(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequestCreate>,
) -> Result<Json<ContactRequestResponse>, ApiError> {
    let outcome = services::submit(&state, payload).await?;
    Ok(Json(ContactRequestResponse {
        success: true,
        message: "Solicitud enviada exitosamente. Te contactaremos pronto.".into(),
        id: outcome.id,
    }))
}

#[instrument(skip(state))]
pub async fn list_contact_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactRequest>>, ApiError> {
    Ok(Json(services::list(&state).await?))
}
