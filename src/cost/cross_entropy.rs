//! Cross-entropy cost.

use super::Cost;
use crate::activation::Activation;
use crate::algebra::Matrix;

/// `C = -1/n Σ [y ln(a) + (1 - y) ln(1 - a)]`.
///
/// The output error is `a - y` with no activation-derivative factor. That
/// cancellation only holds for sigmoid output units; [`Cost::error`] ignores
/// the activation it is given, so pairing this cost with any other output
/// activation yields incorrect gradients.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyCost;

impl Cost for CrossEntropyCost {
    fn total_from_outputs(&self, outputs: &Matrix, targets: &Matrix) -> f64 {
        assert_eq!(
            outputs.shape(),
            targets.shape(),
            "CrossEntropyCost: outputs and targets differ in shape"
        );
        let n = outputs.cols();
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = outputs
            .as_slice()
            .iter()
            .zip(targets.as_slice())
            .map(|(&a, &y)| y * a.ln() + (1.0 - y) * (1.0 - a).ln())
            .sum();
        -sum / n as f64
    }

    fn error(
        &self,
        outputs: &Matrix,
        targets: &Matrix,
        _pre_activations: &Matrix,
        _activation: &dyn Activation,
    ) -> Matrix {
        outputs.sub_matrix(targets)
    }
}
