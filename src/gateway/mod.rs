//! HTTP Gateway
//!
//! Thin transport wrapper around the transfer core. Routing,
//! serialization and status mapping only; every rule lives behind
//! [`AppState::orchestrator`].

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
use state::AppState;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/transfer", post(handlers::create_transfer))
        .route("/api/v1/transfer/{id}", get(handlers::get_transfer))
        .route(
            "/api/v1/accounts/{id}/balance",
            get(handlers::get_account_balance),
        )
        .route("/api/v1/health", get(handlers::health_check))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start HTTP Gateway server
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
