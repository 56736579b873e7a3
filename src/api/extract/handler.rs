// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /extract handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, info, warn};

use super::{ExtractRequest, ExtractResponse};
use crate::api::http_server::AppState;
use crate::api::ApiError;
use crate::extract::ExtractError;

/// POST /extract - Extract the text of a PDF
///
/// # Request
/// - `filepath`: Path to a PDF on the server's filesystem
///
/// # Response
/// - `text`: Text of every page concatenated in page order
///
/// # Errors
/// - 404 Not Found: `filepath` missing, empty, or not on disk
/// - 400 Bad Request: body is not valid JSON
/// - 500 Internal Server Error: the file could not be read or parsed
pub async fn extract_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let Json(request) = payload?;
    let path = request.path()?;

    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        debug!("Extraction requested for missing file: {}", path.display());
        return Err(ApiError::file_not_found());
    }

    match state.extractor.extract(&path).await {
        Ok(text) => {
            info!(
                "Extracted {} characters from {}",
                text.chars().count(),
                path.display()
            );
            Ok(Json(ExtractResponse { text }))
        }
        Err(ExtractError::NotFound) => Err(ApiError::file_not_found()),
        Err(e) => {
            warn!("Extraction failed for {}: {}", path.display(), e);
            Err(ApiError::InternalError(e.to_string()))
        }
    }
}
