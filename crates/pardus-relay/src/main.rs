//! Pardus Relay Server
//!
//! Axum server bridging the pardus dispatch protocol to a local Ollama
//! instance. `POST /chat` accepts an instruction plus flat tool schemas,
//! re-nests the schemas into the OpenAI tool-calling form and forwards
//! everything to Ollama's chat-completions endpoint, returning the
//! completion untouched.

mod handlers;
mod ollama;
mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::handlers::{chat, health};
use crate::state::{AppState, RelayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let state = AppState::new(RelayConfig::from_env())?;
    let addr = state.config.bind_addr();
    let ollama_url = state.config.ollama_url.clone();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("pardus-relay running on http://{}", addr);
    tracing::info!("Forwarding to Ollama at {}", ollama_url);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health - Health check");
    tracing::info!("  POST /chat   - Dispatch to Ollama");

    axum::serve(listener, app).await?;

    Ok(())
}
