// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Startup behavior of the model manager when the backend cannot load

use text_extractor::embeddings::load_handle;
use text_extractor::{EmbeddingBackend, EmbeddingConfig};

#[tokio::test]
async fn test_corrupt_onnx_model_yields_unavailable_handle() {
    let dir = tempfile::tempdir().unwrap();
    let config = EmbeddingConfig {
        model_dir: dir.path().to_path_buf(),
        ..EmbeddingConfig::default()
    };

    // Pre-seed the artifacts so nothing is downloaded
    let artifact_dir = config.artifact_dir();
    std::fs::create_dir_all(&artifact_dir).unwrap();
    std::fs::write(artifact_dir.join("model.onnx"), b"not an onnx graph").unwrap();
    std::fs::write(artifact_dir.join("tokenizer.json"), b"{}").unwrap();

    let handle = load_handle(&config).await;

    assert!(!handle.is_ready());
    let reason = handle.provider().err().unwrap();
    assert!(reason.starts_with("Embedding backend unavailable"), "got {}", reason);
}

#[tokio::test]
async fn test_unknown_sentence_model_yields_unavailable_handle() {
    let dir = tempfile::tempdir().unwrap();
    let config = EmbeddingConfig {
        backend: EmbeddingBackend::Sentence,
        model_name: "definitely-not-a-real-model".to_string(),
        model_dir: dir.path().to_path_buf(),
        ..EmbeddingConfig::default()
    };

    let handle = load_handle(&config).await;

    assert!(!handle.is_ready());
    assert!(handle
        .provider()
        .err()
        .unwrap()
        .contains("definitely-not-a-real-model"));
}
