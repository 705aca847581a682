mod app;
mod auth;
mod config;
mod contact;
mod error;
mod notify;
mod state;
mod store;

use crate::auth::bootstrap;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "lsweb=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    // The first login needs the default admin; a storage hiccup here is not
    // fatal since POST /init-admin can retry it later.
    match bootstrap::ensure_default_admin(app_state.store.as_ref()).await {
        Ok(true) => tracing::info!("default admin credential created"),
        Ok(false) => tracing::debug!("default admin credential already present"),
        Err(e) => tracing::error!(error = %e, "default admin bootstrap failed; continuing"),
    }

    let app = app::build_app(app_state);
    app::serve(app).await
}
