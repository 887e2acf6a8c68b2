use anyhow::Context;
use tracing_subscriber::EnvFilter;

use rag_chunk::config::AppConfig;
use rag_chunk::routes;
use rag_chunk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded (env: {})", std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config);
    tracing::info!("Serving {} chunking strategies", state.strategies.len());

    let app = routes::router(state);

    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
