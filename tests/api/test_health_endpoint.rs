// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /health tests
//!
//! Health never depends on the embedding backend: it answers the same
//! fixed body whether or not a model was loaded.

use crate::common::{app_with_embedder, app_without_embedder, get};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health_returns_fixed_body() {
    let (status, body) = get(app_with_embedder(8), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "healthy", "service": "text-extractor"})
    );
}

#[tokio::test]
async fn test_health_without_embedding_backend() {
    let (status, body) = get(app_without_embedder(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "text-extractor");
}

#[tokio::test]
async fn test_health_is_repeatable() {
    for _ in 0..3 {
        let (status, body) = get(app_without_embedder(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}
