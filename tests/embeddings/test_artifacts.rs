// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ModelArtifacts download tests
//!
//! A throwaway axum server on 127.0.0.1 stands in for the model hub.

use axum::{extract::State, routing::get, Router};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use text_extractor::embeddings::artifacts::{ArtifactSource, ModelArtifacts};

const PAYLOAD_LEN: usize = 64 * 1024;

async fn payload(State(hits): State<Arc<AtomicUsize>>) -> Vec<u8> {
    hits.fetch_add(1, Ordering::SeqCst);
    (0..PAYLOAD_LEN).map(|i| (i % 251) as u8).collect()
}

/// Serves `/blob` and counts requests; every other path is a 404
async fn start_hub() -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/blob", get(payload))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, hits)
}

#[tokio::test]
async fn test_downloads_missing_files() {
    let (addr, hits) = start_hub().await;
    let dir = tempfile::tempdir().unwrap();
    let artifacts = ModelArtifacts::new(dir.path().join("nested/model"));

    let paths = artifacts
        .ensure(&[
            ArtifactSource::new("model.onnx", format!("http://{}/blob", addr)),
            ArtifactSource::new("tokenizer.json", format!("http://{}/blob", addr)),
        ])
        .await
        .unwrap();

    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0], artifacts.path_of("model.onnx"));
    assert_eq!(paths[1], artifacts.path_of("tokenizer.json"));
    for path in &paths {
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(bytes.len(), PAYLOAD_LEN);
        assert_eq!(bytes[300], (300 % 251) as u8);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(!artifacts.path_of("model.onnx.part").exists());
}

#[tokio::test]
async fn test_present_files_are_not_downloaded_again() {
    let (addr, hits) = start_hub().await;
    let dir = tempfile::tempdir().unwrap();
    let artifacts = ModelArtifacts::new(dir.path());
    let sources = [ArtifactSource::new("model.onnx", format!("http://{}/blob", addr))];

    artifacts.ensure(&sources).await.unwrap();
    artifacts.ensure(&sources).await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_http_error_leaves_no_files() {
    let (addr, _) = start_hub().await;
    let dir = tempfile::tempdir().unwrap();
    let artifacts = ModelArtifacts::new(dir.path());

    let err = artifacts
        .ensure(&[ArtifactSource::new(
            "model.onnx",
            format!("http://{}/missing", addr),
        )])
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("404"), "got {:#}", err);
    assert!(!artifacts.path_of("model.onnx").exists());
    assert!(!artifacts.path_of("model.onnx.part").exists());
}
