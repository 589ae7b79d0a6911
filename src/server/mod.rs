//! HTTP surface
//!
//! Axum router exposing the copilot to the dashboard:
//! - `POST /api/ai/chat`: patient-grounded chat
//! - `GET /api/health`: liveness probe
//!
//! Authentication happens upstream; handlers never look at identity.

pub mod handlers;

use crate::config::CopilotConfig;
use crate::copilot::Copilot;
use crate::errors::{CopilotError, Result};
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub copilot: Arc<Copilot>,
}

impl AppState {
    pub fn new(copilot: Copilot) -> Self {
        Self {
            copilot: Arc::new(copilot),
        }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState, frontend_origin: &str) -> Result<Router> {
    let origin = frontend_origin.parse::<HeaderValue>().map_err(|e| {
        CopilotError::ConfigError(format!("Invalid frontend origin '{}': {}", frontend_origin, e))
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(Router::new()
        .route("/api/ai/chat", post(handlers::chat_handler))
        .route("/api/health", get(handlers::health_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Bind the listener and serve until Ctrl-C.
pub async fn serve(config: &CopilotConfig, copilot: Copilot) -> Result<()> {
    let router = build_router(AppState::new(copilot), &config.server.frontend_origin)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let local_addr = listener.local_addr()?;

    info!(
        addr = %local_addr,
        mode = ?config.mode,
        cloud_only = config.use_cloud(),
        "CareBridge copilot server started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for ctrl+c");
        std::future::pending::<()>().await;
    }
}
