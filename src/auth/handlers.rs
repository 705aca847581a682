use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    auth::{
        bootstrap,
        dto::{InitAdminResponse, LoginRequest, LoginResponse},
        services::{self, LoginOutcome},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/init-admin", post(init_admin))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = match services::login(&state, &payload.email, &payload.password).await? {
        LoginOutcome::Success { token, user } => LoginResponse {
            success: true,
            message: "Login exitoso".into(),
            token: Some(token),
            user: Some(user),
        },
        LoginOutcome::InvalidCredentials => LoginResponse {
            success: false,
            message: "Credenciales inválidas".into(),
            token: None,
            user: None,
        },
    };
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn init_admin(
    State(state): State<AppState>,
) -> Result<Json<InitAdminResponse>, ApiError> {
    let created = bootstrap::ensure_default_admin(state.store.as_ref()).await?;
    let message = if created {
        "Admin user created successfully"
    } else {
        "Admin user already exists"
    };
    Ok(Json(InitAdminResponse {
        message: message.into(),
    }))
}
