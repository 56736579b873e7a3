// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedRequest type for POST /embed

use crate::api::ApiError;
use serde::{Deserialize, Serialize};

/// Request body for POST /embed
///
/// ```json
/// { "text": "The quick brown fox" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// Text to embed; any length, truncated by the tokenizer
    #[serde(default)]
    pub text: Option<String>,
}

impl EmbedRequest {
    /// Returns the text to embed
    ///
    /// Absent and empty texts are rejected with `No text provided`.
    /// Whitespace-only text is accepted as-is.
    pub fn validate(&self) -> Result<&str, ApiError> {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ApiError::no_text()),
        }
    }
}
