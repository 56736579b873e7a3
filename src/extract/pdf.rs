// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PDF text extraction (lopdf)

use async_trait::async_trait;
use lopdf::Document;
use std::path::Path;
use tracing::debug;

use super::{ExtractError, TextExtractor};

/// Extracts the text of every page in document order
///
/// Page texts are concatenated as-is; nothing is inserted between pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        debug!("Extracting PDF: {:?}", path);

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExtractError::NotFound)
            }
            Err(e) => return Err(ExtractError::Io(e)),
        };

        tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
            .await
            .map_err(|e| ExtractError::Task(e.to_string()))?
    }
}

/// Extracts and concatenates the text of each page of an in-memory PDF
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Parse(e.to_string()))?;

    let mut text = String::new();
    let pages = doc.get_pages();
    for page_number in pages.keys() {
        let page_text = doc
            .extract_text(&[*page_number])
            .map_err(|e| ExtractError::Parse(format!("page {}: {}", page_number, e)))?;
        // lopdf ends every text block with '\n'; drop the one closing the page
        text.push_str(page_text.strip_suffix('\n').unwrap_or(&page_text));
    }

    debug!(
        "Extracted {} characters from {} pages",
        text.chars().count(),
        pages.len()
    );
    Ok(text)
}
