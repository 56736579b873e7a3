// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ExtractRequest type for POST /extract

use crate::api::ApiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Request body for POST /extract
///
/// ```json
/// { "filepath": "/data/uploads/report.pdf" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Path on the server's local filesystem
    #[serde(default)]
    pub filepath: Option<String>,
}

impl ExtractRequest {
    /// Returns the requested path, or `File not found` when it is absent or
    /// empty. Existence is checked by the handler.
    pub fn path(&self) -> Result<PathBuf, ApiError> {
        match self.filepath.as_deref() {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Err(ApiError::file_not_found()),
        }
    }
}
