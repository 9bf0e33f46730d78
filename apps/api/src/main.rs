mod analysis;
mod config;
mod embedding;
mod errors;
mod llm_client;
mod retry;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::extractor::LlmSkillExtractor;
use crate::config::Config;
use crate::embedding::openai::OpenAiEmbeddings;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gapcheck API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize skill extractor on top of the LLM client
    let extractor = Arc::new(LlmSkillExtractor::new(llm.clone()));

    // Initialize embedding provider
    let embedder = Arc::new(OpenAiEmbeddings::new(
        config.embedding_api_key.clone(),
        config.embedding_base_url.clone(),
        config.embedding_model.clone(),
    ));
    info!(
        "Embedding provider initialized (model: {})",
        config.embedding_model
    );

    // Build app state
    let state = AppState {
        llm,
        extractor,
        embedder,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
