// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding endpoint handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, info, warn};

use super::{EmbedRequest, EmbedResponse, ModelInfoResponse};
use crate::api::http_server::AppState;
use crate::api::ApiError;

/// POST /embed handler
///
/// Computes the embedding of one text with the backend chosen at startup.
///
/// # Errors
/// - 400 Bad Request: `text` missing or empty, or body is not valid JSON
/// - 500 Internal Server Error: backend unavailable, tokenization or
///   inference failure
pub async fn embed_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmbedRequest>, JsonRejection>,
) -> Result<Json<EmbedResponse>, ApiError> {
    let Json(request) = payload?;
    let text = request.validate()?;

    let provider = state.embeddings.provider().map_err(|reason| {
        warn!("Embedding requested but backend is unavailable");
        ApiError::InternalError(reason.to_string())
    })?;

    debug!(
        "Embedding {} chars with {}",
        text.len(),
        provider.model_name()
    );

    let embedding = provider.embed(text).await.map_err(|e| {
        warn!("Embedding failed: {}", e);
        ApiError::InternalError(e.to_string())
    })?;

    info!(
        "Generated {}-dimensional embedding with {}",
        embedding.len(),
        provider.model_name()
    );

    Ok(Json(EmbedResponse::single(embedding, provider.model_name())))
}

/// GET /model handler
pub async fn model_info_handler(
    State(state): State<AppState>,
) -> Result<Json<ModelInfoResponse>, ApiError> {
    let provider = state
        .embeddings
        .provider()
        .map_err(|reason| ApiError::InternalError(reason.to_string()))?;
    Ok(Json(ModelInfoResponse::from_provider(provider.as_ref())))
}
