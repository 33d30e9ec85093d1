//! Fan-in normalized initialization.

use super::{normal_weights, WeightInitialization};
use crate::algebra::Matrix;
use rand::RngCore;

/// Normal weights divided by `sqrt(fan_in)`, where `fan_in` is the size of the
/// preceding layer. Keeping the weighted sums small stops sigmoid units from
/// saturating early in training. Biases stay unscaled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedInitialization;

impl WeightInitialization for NormalizedInitialization {
    fn init_weights(&self, sizes: &[usize], rng: &mut dyn RngCore) -> Vec<Matrix> {
        normal_weights(sizes, rng, |fan_in| 1.0 / (fan_in as f64).sqrt())
    }
}
