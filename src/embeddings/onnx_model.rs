// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! Runs a sentence-transformer exported to ONNX (all-MiniLM-L6-v2 by default)
//! through ONNX Runtime.
//!
//! Features:
//! - ONNX model loading from disk
//! - GPU acceleration via CUDA (with automatic CPU fallback)
//! - BERT tokenization with padding/truncation
//! - Mean pooling over token embeddings, optional L2 normalization
//! - Output dimension discovered from the model at load time

use anyhow::{Context, Result};
use async_trait::async_trait;
use ndarray::{Array2, Axis, Ix2};
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Encoding, PaddingParams, Tokenizer, TruncationParams};
use tracing::{debug, info, warn};

use super::pooling::{l2_normalize, mean_pool};
use super::{EmbeddingBackend, EmbeddingError, EmbeddingProvider};

const INTRA_THREADS: usize = 4;
const PROBE_TEXT: &str = "validation test";

/// Load-time options for [`OnnxEmbeddingModel`]
#[derive(Debug, Clone, Copy)]
pub struct OnnxModelOptions {
    /// Token sequences are truncated to this length
    pub max_length: usize,
    /// Scale pooled vectors to unit length
    pub normalize: bool,
}

impl Default for OnnxModelOptions {
    fn default() -> Self {
        Self {
            max_length: 256,
            normalize: false,
        }
    }
}

/// ONNX-based embedding model
///
/// The model is expected to output token-level embeddings
/// (`last_hidden_state`, shape `[batch, seq_len, hidden]`); sentence vectors
/// are produced here by attention-mask-weighted mean pooling.
///
/// # Thread Safety
/// All fields are wrapped in Arc for cheap cloning. `Session::run` needs
/// `&mut`, so the session sits behind a Mutex.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    /// Hidden size reported by the probe inference
    dimension: usize,
    options: OnnxModelOptions,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("max_length", &self.options.max_length)
            .field("normalize", &self.options.normalize)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Creates a new ONNX embedding model from disk paths
    ///
    /// Blocking: builds the ONNX Runtime session and runs one probe inference
    /// to discover the hidden dimension. Call it from `spawn_blocking` when
    /// inside the async runtime.
    ///
    /// # Errors
    /// Returns error if:
    /// - Model or tokenizer file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - Model output is not `[batch, seq_len, hidden]`
    pub fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
        options: OnnxModelOptions,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }
        if options.max_length == 0 {
            anyhow::bail!("max_length must be greater than 0");
        }

        let mut session = build_session(model_path)?;
        info!("ONNX embedding model loaded from {}", model_path.display());

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: options.max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;
        tokenizer.with_padding(Some(PaddingParams::default()));

        // Probe once so a broken export fails at startup, not on first request
        let probe = tokenizer
            .encode(PROBE_TEXT, true)
            .map_err(|e| anyhow::anyhow!("Tokenizer validation failed: {}", e))?;
        let dimension = forward(&mut session, &probe)
            .context("Validation inference failed")?
            .len();
        if dimension == 0 {
            anyhow::bail!("Model produced an empty hidden dimension");
        }

        info!(
            "Embedding model {} ready ({} dimensions, max_length {})",
            model_name, dimension, options.max_length
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension,
            options,
        })
    }

    /// Generates the embedding for a single text on the current thread
    ///
    /// 1. Tokenize (truncation to `max_length`)
    /// 2. Run ONNX inference
    /// 3. Mean pooling weighted by the attention mask
    /// 4. Optional L2 normalization
    pub fn embed_blocking(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EmbeddingError::Tokenization(e.to_string()))?;

        debug!(
            "Tokenized {} chars into {} tokens",
            text.len(),
            encoding.get_ids().len()
        );

        let mut session = self
            .session
            .lock()
            .map_err(|_| EmbeddingError::Inference("session lock poisoned".to_string()))?;
        let mut embedding = forward(&mut session, &encoding)
            .map_err(|e| EmbeddingError::Inference(format!("{:#}", e)))?;
        drop(session);

        if embedding.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        if self.options.normalize {
            l2_normalize(&mut embedding);
        }

        Ok(embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for OnnxEmbeddingModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let model = self.clone();
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || model.embed_blocking(&text))
            .await
            .map_err(|e| EmbeddingError::Task(e.to_string()))?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn backend(&self) -> EmbeddingBackend {
        EmbeddingBackend::Onnx
    }
}

/// Builds a session, trying CUDA first and falling back to CPU
fn build_session(model_path: &Path) -> Result<Session> {
    let cuda_result = Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CUDAExecutionProvider::default().build()])
        .context("Failed to set CUDA execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(INTRA_THREADS)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path);

    match cuda_result {
        Ok(session) => {
            info!("CUDA execution provider initialized");
            Ok(session)
        }
        Err(e) => {
            warn!("CUDA execution provider failed: {}", e);
            warn!("Falling back to CPU execution provider");
            Session::builder()
                .context("Failed to create session builder")?
                .with_execution_providers([CPUExecutionProvider::default().build()])
                .context("Failed to set CPU execution provider")?
                .with_optimization_level(GraphOptimizationLevel::Level3)
                .context("Failed to set optimization level")?
                .with_intra_threads(INTRA_THREADS)
                .context("Failed to set intra threads")?
                .commit_from_file(model_path)
                .with_context(|| {
                    format!("Failed to load ONNX model from {}", model_path.display())
                })
        }
    }
}

/// Runs one encoded sequence through the session and mean-pools the output
fn forward(session: &mut Session, encoding: &Encoding) -> Result<Vec<f32>> {
    let seq_len = encoding.get_ids().len();
    let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
    let attention_mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| m as i64)
        .collect();
    let token_type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| t as i64).collect();

    let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
        .context("Failed to create input_ids array")?;
    let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask.clone())
        .context("Failed to create attention_mask array")?;
    let token_type_ids_array = Array2::from_shape_vec((1, seq_len), token_type_ids)
        .context("Failed to create token_type_ids array")?;

    let outputs = session.run(ort::inputs![
        "input_ids" => Value::from_array(input_ids_array)?,
        "attention_mask" => Value::from_array(attention_mask_array)?,
        "token_type_ids" => Value::from_array(token_type_ids_array)?
    ])?;

    // Index [0] rather than a name: exports disagree on the output name
    let output_array = outputs[0]
        .try_extract_array::<f32>()
        .context("Failed to extract output tensor")?;

    if output_array.ndim() != 3 {
        anyhow::bail!(
            "Model outputs unexpected dimensions: {:?} (expected [batch, seq_len, hidden])",
            output_array.shape()
        );
    }

    let hidden = output_array
        .index_axis(Axis(0), 0)
        .into_dimensionality::<Ix2>()
        .context("Failed to view output as [seq_len, hidden]")?;

    Ok(mean_pool(hidden, &attention_mask))
}
