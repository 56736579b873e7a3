// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod embed;
pub mod errors;
pub mod extract;
pub mod http_server;

pub use embed::{embed_handler, model_info_handler, EmbedRequest, EmbedResponse};
pub use errors::{ApiError, ErrorResponse};
pub use extract::{extract_handler, ExtractRequest, ExtractResponse};
pub use http_server::{create_app, health_handler, start_server, AppState, HealthResponse};
