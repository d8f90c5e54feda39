//! Tally Web Server
//!
//! Axum-based REST API for the Tally finance question-answering agent.
//!
//! The API is intentionally small: one question-answering endpoint plus a
//! health check, with a permissive CORS policy so the bundled browser UI
//! can call it directly. Answering never fails at the transport layer -
//! the agent contains every error and the endpoint always returns 200
//! with a well-formed payload.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use tally_core::{AgentResponse, FinanceAgent};

/// Shared application state
pub struct AppState {
    pub agent: FinanceAgent,
}

/// Question payload for POST /ask
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Build the application router
///
/// `static_dir`, when set, is served at the root for the browser UI.
pub fn app(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/ask", post(ask))
        .route("/health", get(health));

    if let Some(dir) = static_dir {
        info!(dir = %dir.display(), "Serving static UI");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown
pub async fn serve(
    state: Arc<AppState>,
    host: &str,
    port: u16,
    static_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Tally server listening");
    axum::serve(listener, app(state, static_dir)).await?;
    Ok(())
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Json<AgentResponse> {
    info!(question = %request.question, "Question received");
    Json(state.agent.analyze(&request.question).await)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
