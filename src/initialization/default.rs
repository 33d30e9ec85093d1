//! Raw standard-normal initialization.

use super::{normal_weights, WeightInitialization};
use crate::algebra::Matrix;
use rand::RngCore;

/// Weights and biases drawn from `N(0, 1)` with no further scaling.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInitialization;

impl WeightInitialization for DefaultInitialization {
    fn init_weights(&self, sizes: &[usize], rng: &mut dyn RngCore) -> Vec<Matrix> {
        normal_weights(sizes, rng, |_| 1.0)
    }
}
