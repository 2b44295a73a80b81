mod configuration;
mod error;
mod routes;
mod state;

use duet::conversation::Orchestrator;
use duet::providers::llama_cpp::LlamaCppProvider;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let settings = configuration::Settings::new()?;
    let addr = settings.server.socket_addr()?;
    let max_turns = settings.server.max_turns;

    let provider_config = settings.provider.into_config();
    info!("using inference server at {}", provider_config.host);
    let provider = LlamaCppProvider::new(provider_config)?;

    let state = state::AppState::new(Orchestrator::new(Arc::new(provider)), max_turns);

    // Create router with CORS support
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::configure(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
