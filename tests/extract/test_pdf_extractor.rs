// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! PdfTextExtractor tests against generated PDFs

use crate::common::{build_pdf, write_pdf};
use text_extractor::extract::{pdf::extract_pdf_text, ExtractError};
use text_extractor::{PdfTextExtractor, TextExtractor};

#[tokio::test]
async fn test_extracts_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(&dir, "doc.pdf", &["Alpha", "Beta"]);

    let text = PdfTextExtractor::new().extract(&path).await.unwrap();

    assert_eq!(text, "AlphaBeta");
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();

    let err = PdfTextExtractor::new()
        .extract(&dir.path().join("missing.pdf"))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::NotFound));
    assert_eq!(err.to_string(), "File not found");
}

#[tokio::test]
async fn test_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = PdfTextExtractor::new().extract(dir.path()).await.unwrap_err();

    assert!(matches!(err, ExtractError::Io(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_truncated_pdf_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = build_pdf(&["Cut short"]);
    let path = dir.path().join("truncated.pdf");
    std::fs::write(&path, &bytes[..bytes.len() / 3]).unwrap();

    let result = PdfTextExtractor::new().extract(&path).await;

    assert!(result.is_err(), "truncated PDF should not extract");
}

#[test]
fn test_single_page_is_exact() {
    let text = extract_pdf_text(&build_pdf(&["Hello World"])).unwrap();

    assert_eq!(text, "Hello World");
}

#[test]
fn test_pages_joined_without_separator() {
    let text = extract_pdf_text(&build_pdf(&["First", "Second"])).unwrap();

    assert_eq!(text, "FirstSecond");
}

#[test]
fn test_page_without_text_contributes_nothing() {
    let text = extract_pdf_text(&build_pdf(&["Visible", ""])).unwrap();

    assert_eq!(text, "Visible");
}

#[test]
fn test_extraction_is_repeatable() {
    let bytes = build_pdf(&["Stable output"]);

    assert_eq!(
        extract_pdf_text(&bytes).unwrap(),
        extract_pdf_text(&bytes).unwrap()
    );
}
