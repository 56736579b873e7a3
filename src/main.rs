// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use std::{env, sync::Arc};
use text_extractor::{
    api::{start_server, AppState},
    cli::Cli,
    embeddings::load_handle,
    extract::PdfTextExtractor,
    version,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = Cli::parse().into_config();
    config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    let addr = config.socket_addr().map_err(|e| anyhow!(e))?;

    info!("Starting {}", version::get_version_string());
    info!("Features: {}", version::FEATURES.join(", "));
    info!(
        "Embedding backend: {} (model {}, cache {})",
        config.embedding.backend,
        config.embedding.model_name,
        config.embedding.model_dir.display()
    );

    // Load the embedding backend before accepting requests
    let embeddings = load_handle(&config.embedding).await;
    if !embeddings.is_ready() {
        warn!("Continuing without embeddings: /health and /extract stay available");
    }

    let state = AppState::new(Arc::new(PdfTextExtractor::new()), embeddings);

    info!("API Endpoints:");
    info!("  Health:   GET  http://{}/health", addr);
    info!("  Extract:  POST http://{}/extract", addr);
    info!("  Embed:    POST http://{}/embed", addr);
    info!("  Model:    GET  http://{}/model", addr);

    start_server(addr, state).await
}
