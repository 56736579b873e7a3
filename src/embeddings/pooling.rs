// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Pooling helpers for token-level model outputs

use ndarray::ArrayView2;

/// Attention-mask-weighted mean over the sequence axis
///
/// `hidden` is `[seq_len, hidden_dim]`, `mask` has one entry per position.
/// Positions with mask 0 contribute nothing; a fully masked input yields a
/// zero vector rather than NaN.
pub fn mean_pool(hidden: ArrayView2<'_, f32>, mask: &[i64]) -> Vec<f32> {
    let (seq_len, hidden_dim) = hidden.dim();
    let mut pooled = vec![0.0f32; hidden_dim];
    let mut sum_mask = 0.0f32;

    for (i, row) in hidden.outer_iter().enumerate().take(seq_len.min(mask.len())) {
        let mask_value = mask[i] as f32;
        if mask_value == 0.0 {
            continue;
        }
        sum_mask += mask_value;
        for (acc, value) in pooled.iter_mut().zip(row.iter()) {
            *acc += value * mask_value;
        }
    }

    for val in &mut pooled {
        *val /= sum_mask.max(1e-9);
    }

    pooled
}

/// Scales `vector` to unit L2 norm in place (no-op for the zero vector)
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}
