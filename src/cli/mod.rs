// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use std::path::PathBuf;

use crate::config::{
    EmbeddingConfig, ServiceConfig, DEFAULT_EMBEDDING_MODEL, DEFAULT_HOST, DEFAULT_MAX_LENGTH,
    DEFAULT_MODEL_DIR, DEFAULT_MODEL_URL, DEFAULT_PORT, DEFAULT_TOKENIZER_URL,
};
use crate::embeddings::EmbeddingBackend;

/// PDF text extraction and text embedding service
#[derive(Parser, Debug)]
#[command(name = "text-extractor")]
#[command(version)]
#[command(about = "HTTP service for PDF text extraction and text embeddings", long_about = None)]
pub struct Cli {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Local model cache directory (created if absent)
    #[arg(long, env = "MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: PathBuf,

    /// Embedding backend (onnx/sentence)
    #[arg(long, env = "EMBEDDING_BACKEND", default_value = "onnx")]
    pub embedding_backend: EmbeddingBackend,

    /// Embedding model name
    #[arg(long, env = "EMBEDDING_MODEL", default_value = DEFAULT_EMBEDDING_MODEL)]
    pub embedding_model: String,

    /// Where to fetch model.onnx when it is missing locally
    #[arg(long, env = "EMBEDDING_MODEL_URL", default_value = DEFAULT_MODEL_URL)]
    pub model_url: String,

    /// Where to fetch tokenizer.json when it is missing locally
    #[arg(long, env = "EMBEDDING_TOKENIZER_URL", default_value = DEFAULT_TOKENIZER_URL)]
    pub tokenizer_url: String,

    /// Maximum tokens per input; longer texts are truncated
    #[arg(long, env = "EMBEDDING_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// L2-normalize embeddings (onnx backend)
    #[arg(long, env = "EMBEDDING_NORMALIZE")]
    pub normalize: bool,
}

impl Cli {
    pub fn into_config(self) -> ServiceConfig {
        ServiceConfig {
            host: self.host,
            port: self.port,
            embedding: EmbeddingConfig {
                backend: self.embedding_backend,
                model_name: self.embedding_model,
                model_dir: self.model_dir,
                model_url: self.model_url,
                tokenizer_url: self.tokenizer_url,
                max_length: self.max_length,
                normalize: self.normalize,
            },
        }
    }
}
