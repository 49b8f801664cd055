//! Q&A server binary
//!
//! Run with: cargo run --bin askdoc-server

use askdoc::{config::AppConfig, server::QaServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askdoc=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration: optional TOML file, credential from the environment
    let config = match std::env::var("ASKDOC_CONFIG") {
        Ok(path) => AppConfig::load(&path)?,
        Err(_) => AppConfig::default(),
    }
    .with_env_credentials();

    tracing::info!("Configuration loaded");
    tracing::info!("  - Upload dir: {}", config.ingest.upload_dir.display());
    tracing::info!(
        "  - Allowed extensions: {}",
        config.ingest.allowed_extensions.join(", ")
    );
    tracing::info!("  - Extractive model: {}", config.extractive.model_id);
    tracing::info!(
        "  - Remote backend: {}",
        if config.remote.api_key.is_some() {
            "enabled"
        } else {
            "disabled (no credential)"
        }
    );

    let server = QaServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/upload - Upload documents");
    println!("  POST /api/ask    - Ask questions");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
