// ============================================================
// Layer 1 — HTTP API
// ============================================================
// A thin axum service over the loaded pipeline. The state is
// built once from AppConfig, wrapped in an Arc and handed to
// the router; handlers only read it.
//
//   serve(config)
//     1. AppState::load(config)      artifact + metrics
//     2. router(state)               routes + request tracing
//     3. bind 0.0.0.0:port, serve until Ctrl-C

pub mod handlers;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AppConfig;
use crate::error::Result;
use state::AppState;

/// Build the application router over a shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/model-info", get(handlers::model_info))
        .route("/predict", post(handlers::predict))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Load the model and serve the API until Ctrl-C.
pub async fn serve(config: AppConfig) -> Result<()> {
    let port  = config.port;
    let state = Arc::new(AppState::load(config)?);
    tracing::info!("Model loaded: {}", state.is_loaded());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
