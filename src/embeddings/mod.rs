// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding providers
//!
//! Both backends sit behind [`EmbeddingProvider`] so the HTTP layer never
//! knows which one is running:
//! - [`OnnxEmbeddingModel`]: tokenizer + ONNX Runtime session with mean pooling
//! - [`SentenceEmbeddingModel`]: packaged sentence-embedding model (fastembed)
//!
//! The provider is built once at startup by [`model_manager::load_provider`]
//! and shared read-only through an [`EmbeddingHandle`].

pub mod artifacts;
pub mod model_manager;
pub mod onnx_model;
pub mod pooling;
pub mod sentence_model;

pub use artifacts::ModelArtifacts;
pub use model_manager::{load_handle, load_provider};
pub use onnx_model::OnnxEmbeddingModel;
pub use sentence_model::SentenceEmbeddingModel;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Errors produced while computing an embedding
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Unexpected embedding dimension: {actual} (expected {expected})")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding task failed: {0}")]
    Task(String),
}

/// Which embedding implementation the service runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Tokenizer + ONNX session, mean pooled
    Onnx,
    /// Packaged sentence-embedding model
    Sentence,
}

impl EmbeddingBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingBackend::Onnx => "onnx",
            EmbeddingBackend::Sentence => "sentence",
        }
    }
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onnx" => Ok(EmbeddingBackend::Onnx),
            "sentence" => Ok(EmbeddingBackend::Sentence),
            other => Err(format!(
                "unknown embedding backend '{}' (expected 'onnx' or 'sentence')",
                other
            )),
        }
    }
}

/// One text in, one fixed-size vector out
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Computes the embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Model identifier reported to clients
    fn model_name(&self) -> &str;

    /// Length of every vector returned by [`EmbeddingProvider::embed`]
    fn dimension(&self) -> usize;

    fn backend(&self) -> EmbeddingBackend;
}

/// Embedding state owned by the server
///
/// Startup never aborts on a backend failure: the error is kept and reported
/// by the embedding endpoints while the rest of the service keeps running.
#[derive(Clone)]
pub enum EmbeddingHandle {
    Ready(Arc<dyn EmbeddingProvider>),
    Unavailable(Arc<str>),
}

impl EmbeddingHandle {
    pub fn ready(provider: Arc<dyn EmbeddingProvider>) -> Self {
        EmbeddingHandle::Ready(provider)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        EmbeddingHandle::Unavailable(Arc::from(reason.into()))
    }

    /// Returns the provider, or the initialization failure message
    pub fn provider(&self) -> Result<&Arc<dyn EmbeddingProvider>, &str> {
        match self {
            EmbeddingHandle::Ready(provider) => Ok(provider),
            EmbeddingHandle::Unavailable(reason) => Err(reason),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, EmbeddingHandle::Ready(_))
    }
}

impl fmt::Debug for EmbeddingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingHandle::Ready(provider) => f
                .debug_struct("Ready")
                .field("model", &provider.model_name())
                .field("dimension", &provider.dimension())
                .finish(),
            EmbeddingHandle::Unavailable(reason) => {
                f.debug_tuple("Unavailable").field(reason).finish()
            }
        }
    }
}
