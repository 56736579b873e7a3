// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Packaged sentence-embedding model backed by fastembed
//!
//! fastembed bundles tokenizer, ONNX graph, pooling and normalization per
//! model and handles its own download into the cache directory.

use anyhow::{Context, Result};
use async_trait::async_trait;
use fastembed::{InitOptions, TextEmbedding};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

use super::{EmbeddingBackend, EmbeddingError, EmbeddingProvider};

#[derive(Clone)]
pub struct SentenceEmbeddingModel {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
    model_code: String,
    dimension: usize,
}

impl std::fmt::Debug for SentenceEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("model_code", &self.model_code)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl SentenceEmbeddingModel {
    /// Loads a supported fastembed model, downloading it into `cache_dir`
    /// when missing. Blocking.
    pub fn new(model_name: impl Into<String>, cache_dir: &Path) -> Result<Self> {
        let model_name = model_name.into();
        let supported = TextEmbedding::list_supported_models();
        let info = supported
            .iter()
            .find(|info| model_code_matches(&info.model_code, &model_name))
            .with_context(|| {
                format!(
                    "Model '{}' is not a supported sentence-embedding model",
                    model_name
                )
            })?;

        info!(
            "Loading sentence-embedding model {} ({}, {} dimensions)",
            model_name, info.model_code, info.dim
        );

        let text_embedding = TextEmbedding::try_new(
            InitOptions::new(info.model.clone())
                .with_cache_dir(cache_dir.to_path_buf())
                .with_show_download_progress(false),
        )
        .with_context(|| format!("Failed to initialize {}", info.model_code))?;

        Ok(Self {
            model: Arc::new(Mutex::new(text_embedding)),
            model_name,
            model_code: info.model_code.clone(),
            dimension: info.dim,
        })
    }

    pub fn model_code(&self) -> &str {
        &self.model_code
    }

    pub fn embed_blocking(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| EmbeddingError::Inference("model lock poisoned".to_string()))?;
        let mut embeddings = model
            .embed(vec![text], None)
            .map_err(|e| EmbeddingError::Inference(format!("{:#}", e)))?;
        drop(model);

        let embedding = embeddings
            .pop()
            .ok_or_else(|| EmbeddingError::Inference("model returned no embedding".to_string()))?;

        if embedding.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        Ok(embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for SentenceEmbeddingModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let model = self.clone();
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || model.embed_blocking(&text))
            .await
            .map_err(|e| EmbeddingError::Task(e.to_string()))?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn backend(&self) -> EmbeddingBackend {
        EmbeddingBackend::Sentence
    }
}

/// Accepts a full hub code ("Qdrant/all-MiniLM-L6-v2-onnx") or its short
/// form ("all-MiniLM-L6-v2"), case-insensitively
fn model_code_matches(model_code: &str, requested: &str) -> bool {
    let requested = requested.trim();
    if model_code.eq_ignore_ascii_case(requested) {
        return true;
    }
    let short = model_code.rsplit('/').next().unwrap_or(model_code);
    let short = short.strip_suffix("-onnx").unwrap_or(short);
    short.eq_ignore_ascii_case(requested)
}
