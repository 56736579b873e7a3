// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Text Extraction API Module
//!
//! POST /extract: returns the concatenated page text of a PDF on the
//! server's filesystem.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::extract_handler;
pub use request::ExtractRequest;
pub use response::ExtractResponse;
