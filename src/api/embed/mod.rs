// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding API Module
//!
//! - POST /embed: one text in, one vector out, OpenAI-compatible envelope
//! - GET /model: the active backend, model name and dimensionality

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{embed_handler, model_info_handler};
pub use request::EmbedRequest;
pub use response::{EmbedResponse, EmbeddingData, ModelInfoResponse};
