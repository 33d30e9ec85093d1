//! L2 regularization (weight decay).

use super::{factor, Regularization};
use crate::algebra::Matrix;

/// Scales every weight by `1 - (λ · η) / n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct L2Regularization;

impl Regularization for L2Regularization {
    fn calculate(&self, weights: &Matrix, learning_rate: f64, lambda: f64, n: usize) -> Matrix {
        weights.scale(1.0 - factor(learning_rate, lambda, n))
    }
}
