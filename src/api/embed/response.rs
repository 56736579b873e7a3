// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response types for the embedding endpoints
//!
//! POST /embed answers with the OpenAI-compatible envelope for every
//! backend:
//!
//! ```json
//! {
//!   "object": "list",
//!   "data": [
//!     { "object": "embedding", "embedding": [0.1, 0.2, ...], "index": 0 }
//!   ],
//!   "model": "all-MiniLM-L6-v2"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::embeddings::{EmbeddingBackend, EmbeddingProvider};

/// One embedding entry in the `data` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingData {
    /// Always "embedding"
    pub object: String,
    pub embedding: Vec<f32>,
    /// Position of the input text (always 0, one text per request)
    pub index: usize,
}

/// Response body for POST /embed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// Always "list"
    pub object: String,
    pub data: Vec<EmbeddingData>,
    pub model: String,
}

impl EmbedResponse {
    /// Wraps a single embedding
    pub fn single(embedding: Vec<f32>, model: impl Into<String>) -> Self {
        Self {
            object: "list".to_string(),
            data: vec![EmbeddingData {
                object: "embedding".to_string(),
                embedding,
                index: 0,
            }],
            model: model.into(),
        }
    }

    /// Length of the first embedding (0 when empty)
    pub fn dimensions(&self) -> usize {
        self.data.first().map(|d| d.embedding.len()).unwrap_or(0)
    }
}

/// Response body for GET /model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub model: String,
    pub dimensions: usize,
    pub backend: EmbeddingBackend,
}

impl ModelInfoResponse {
    pub fn from_provider(provider: &dyn EmbeddingProvider) -> Self {
        Self {
            model: provider.model_name().to_string(),
            dimensions: provider.dimension(),
            backend: provider.backend(),
        }
    }
}
