// weights.rs - Per-sequence weight resolution

use crate::data::{MiError, WeightMode};

/// Tolerance on the weight sum; weights must normalize to 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Resolve the weight vector for an alignment of `depth` sequences.
///
/// Without explicit weights every sequence contributes 1/N. Explicit
/// weights must be index-aligned with the alignment, non-negative, and
/// sum to 1 within tolerance.
pub fn resolve_weights(
    depth: usize,
    explicit: Option<&[f64]>,
) -> Result<(Vec<f64>, WeightMode), MiError> {
    match explicit {
        None => {
            let uniform = 1.0 / depth as f64;
            Ok((vec![uniform; depth], WeightMode::Uniform))
        }
        Some(weights) => {
            if weights.len() != depth {
                return Err(MiError::InvalidWeights(format!(
                    "expected {} weights, got {}",
                    depth,
                    weights.len()
                )));
            }
            if let Some(value) = weights.iter().find(|w| **w < 0.0) {
                return Err(MiError::InvalidWeights(format!(
                    "negative weight {} not allowed",
                    value
                )));
            }
            let sum: f64 = weights.iter().sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(MiError::InvalidWeights(format!(
                    "weights sum to {} (must sum to 1)",
                    sum
                )));
            }
            Ok((weights.to_vec(), WeightMode::Explicit(weights.to_vec())))
        }
    }
}
