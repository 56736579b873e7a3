// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod extract;
pub mod version;

pub use api::{create_app, AppState};
pub use config::{EmbeddingConfig, ServiceConfig};
pub use embeddings::{EmbeddingBackend, EmbeddingHandle, EmbeddingProvider};
pub use extract::{PdfTextExtractor, TextExtractor};
