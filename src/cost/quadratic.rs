//! Quadratic (mean squared error) cost.

use super::Cost;
use crate::activation::Activation;
use crate::algebra::Matrix;

/// `C = 1/(2n) Σ ‖y - a‖²`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticCost;

impl Cost for QuadraticCost {
    fn total_from_outputs(&self, outputs: &Matrix, targets: &Matrix) -> f64 {
        let n = outputs.cols();
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = targets
            .sub_matrix(outputs)
            .columns()
            .iter()
            .map(|diff| diff.norm().powi(2))
            .sum();
        sum / (2.0 * n as f64)
    }

    /// `(a - y) ⊙ f'(z)`.
    fn error(
        &self,
        outputs: &Matrix,
        targets: &Matrix,
        pre_activations: &Matrix,
        activation: &dyn Activation,
    ) -> Matrix {
        outputs
            .sub_matrix(targets)
            .hadamard(&activation.derivative_matrix(pre_activations))
    }
}
