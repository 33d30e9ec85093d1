//! L1 regularization.

use super::{factor, Regularization};
use crate::algebra::Matrix;

/// Moves every weight toward zero by the constant `(λ · η) / n`.
///
/// Negative weights are increased by the factor, all others (zero included)
/// are decreased by it: a subgradient step on the L1 penalty.
#[derive(Debug, Clone, Copy, Default)]
pub struct L1Regularization;

impl Regularization for L1Regularization {
    fn calculate(&self, weights: &Matrix, learning_rate: f64, lambda: f64, n: usize) -> Matrix {
        let step = factor(learning_rate, lambda, n);
        weights.map(|w| if w < 0.0 { w + step } else { w - step })
    }
}
