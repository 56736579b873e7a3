// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding Model Manager
//!
//! Builds the configured embedding provider once at startup:
//! - `onnx`: fetches `model.onnx` and `tokenizer.json` into
//!   `<model_dir>/<model_name>/` when missing, then opens an ONNX session
//! - `sentence`: lets fastembed download into `<model_dir>` and load the
//!   packaged model

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

use super::artifacts::{ArtifactSource, ModelArtifacts};
use super::onnx_model::{OnnxEmbeddingModel, OnnxModelOptions};
use super::sentence_model::SentenceEmbeddingModel;
use super::{EmbeddingBackend, EmbeddingHandle, EmbeddingProvider};
use crate::config::EmbeddingConfig;

pub const MODEL_FILE: &str = "model.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Loads the provider described by `config`
///
/// # Errors
/// Download failures, missing/invalid model files, or an unsupported model
/// name.
pub async fn load_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    info!(
        "Initializing {} embedding backend with model {}",
        config.backend, config.model_name
    );

    let provider: Arc<dyn EmbeddingProvider> = match config.backend {
        EmbeddingBackend::Onnx => Arc::new(load_onnx(config).await?),
        EmbeddingBackend::Sentence => Arc::new(load_sentence(config).await?),
    };

    info!(
        "Embedding backend ready: {} ({} dimensions)",
        provider.model_name(),
        provider.dimension()
    );
    Ok(provider)
}

/// Like [`load_provider`], but never fails: an initialization error is kept
/// in the handle so the service can start without embeddings
pub async fn load_handle(config: &EmbeddingConfig) -> EmbeddingHandle {
    match load_provider(config).await {
        Ok(provider) => EmbeddingHandle::ready(provider),
        Err(e) => {
            error!("Failed to initialize embedding backend: {:#}", e);
            error!("POST /embed will return 500 until the service is restarted");
            EmbeddingHandle::unavailable(format!("Embedding backend unavailable: {:#}", e))
        }
    }
}

async fn load_onnx(config: &EmbeddingConfig) -> Result<OnnxEmbeddingModel> {
    let artifacts = ModelArtifacts::new(config.artifact_dir());
    let paths = artifacts
        .ensure(&[
            ArtifactSource::new(MODEL_FILE, config.model_url.clone()),
            ArtifactSource::new(TOKENIZER_FILE, config.tokenizer_url.clone()),
        ])
        .await?;

    let model_name = config.model_name.clone();
    let model_path = paths[0].clone();
    let tokenizer_path = paths[1].clone();
    let options = OnnxModelOptions {
        max_length: config.max_length,
        normalize: config.normalize,
    };

    tokio::task::spawn_blocking(move || {
        OnnxEmbeddingModel::new(model_name, model_path, tokenizer_path, options)
    })
    .await
    .context("ONNX model loading task failed")?
}

async fn load_sentence(config: &EmbeddingConfig) -> Result<SentenceEmbeddingModel> {
    tokio::fs::create_dir_all(&config.model_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create model directory {}",
                config.model_dir.display()
            )
        })?;

    let model_name = config.model_name.clone();
    let cache_dir = config.model_dir.clone();
    let model = tokio::task::spawn_blocking(move || {
        SentenceEmbeddingModel::new(model_name, &cache_dir)
    })
    .await
    .context("Sentence model loading task failed")??;

    info!("Sentence model resolved to {}", model.model_code());
    Ok(model)
}
