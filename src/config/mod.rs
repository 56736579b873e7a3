// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::embeddings::EmbeddingBackend;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL_DIR: &str = "./models";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
pub const DEFAULT_MODEL_URL: &str =
    "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main/onnx/model.onnx";
pub const DEFAULT_TOKENIZER_URL: &str =
    "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main/tokenizer.json";
pub const DEFAULT_MAX_LENGTH: usize = 256;

/// Top-level configuration for the text-extractor service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to listen on
    pub port: u16,
    pub embedding: EmbeddingConfig,
}

/// Embedding backend selection and model location
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    /// Model identifier reported to clients and used for the artifact folder
    pub model_name: String,
    /// Root of the local model cache
    pub model_dir: PathBuf,
    /// Remote ONNX graph (onnx backend only)
    pub model_url: String,
    /// Remote tokenizer.json (onnx backend only)
    pub tokenizer_url: String,
    /// Token sequences are truncated to this length (onnx backend only)
    pub max_length: usize,
    /// L2-normalize pooled vectors (onnx backend only)
    pub normalize: bool,
}

impl EmbeddingConfig {
    /// Directory holding this model's artifacts for the onnx backend
    pub fn artifact_dir(&self) -> PathBuf {
        self.model_dir.join(&self.model_name)
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Onnx,
            model_name: DEFAULT_EMBEDDING_MODEL.to_string(),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            model_url: DEFAULT_MODEL_URL.to_string(),
            tokenizer_url: DEFAULT_TOKENIZER_URL.to_string(),
            max_length: DEFAULT_MAX_LENGTH,
            normalize: false,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port must be greater than 0".to_string());
        }
        self.socket_addr()?;

        let embedding = &self.embedding;
        if embedding.model_name.trim().is_empty() {
            return Err("Embedding model name cannot be empty".to_string());
        }
        if embedding.model_dir.as_os_str().is_empty() {
            return Err("Model directory cannot be empty".to_string());
        }
        if embedding.backend == EmbeddingBackend::Onnx {
            if embedding.max_length == 0 {
                return Err("max_length must be greater than 0".to_string());
            }
            for (field, url) in [
                ("model_url", &embedding.model_url),
                ("tokenizer_url", &embedding.tokenizer_url),
            ] {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(format!("{} must be an http(s) URL, got '{}'", field, url));
                }
            }
        }
        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .map_err(|e| format!("Invalid listen address {}:{}: {}", self.host, self.port, e))
    }
}
