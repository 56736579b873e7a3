// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /model tests

use crate::common::{app_with_embedder, app_without_embedder, get};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_model_reports_loaded_provider() {
    let (status, body) = get(app_with_embedder(16), "/model").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"model": "hash-embedder", "dimensions": 16, "backend": "onnx"})
    );
}

#[tokio::test]
async fn test_model_without_backend_is_500() {
    let (status, body) = get(app_without_embedder(), "/model").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}
