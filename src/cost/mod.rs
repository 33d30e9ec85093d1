//! Cost functions measuring how far network outputs are from their targets.
//!
//! A cost plays two roles: it scores a whole dataset ([`Cost::total`]) and it
//! seeds backpropagation with the output-layer error ([`Cost::error`]).

mod cross_entropy;
mod quadratic;

pub use cross_entropy::CrossEntropyCost;
pub use quadratic::QuadraticCost;

use crate::activation::Activation;
use crate::algebra::{Matrix, Vector};
use crate::network::NeuralNetwork;
use serde::Deserialize;
use std::fmt;

/// Core trait for cost functions.
///
/// Matrices follow the batch convention of the network: one sample per column.
pub trait Cost: fmt::Debug {
    /// Total cost of an already computed output batch against its targets,
    /// averaged over the number of samples (columns).
    fn total_from_outputs(&self, outputs: &Matrix, targets: &Matrix) -> f64;

    /// Output-layer error `δ_L` for one batch.
    ///
    /// # Arguments
    ///
    /// * `outputs` - Network output `a` for the batch
    /// * `targets` - Expected output `y`
    /// * `pre_activations` - Output-layer pre-activation values `z`
    /// * `activation` - Activation used by the network
    fn error(
        &self,
        outputs: &Matrix,
        targets: &Matrix,
        pre_activations: &Matrix,
        activation: &dyn Activation,
    ) -> Matrix;

    /// Runs `inputs` through `network` and scores the result against `targets`.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` and `targets` differ in length.
    fn total(&self, network: &NeuralNetwork, inputs: &[Vector], targets: &[Vector]) -> f64 {
        assert_eq!(
            inputs.len(),
            targets.len(),
            "Cost total: {} inputs but {} targets",
            inputs.len(),
            targets.len()
        );
        if inputs.is_empty() {
            return 0.0;
        }
        let outputs = network.predict(&Matrix::from_columns(inputs));
        self.total_from_outputs(&outputs, &Matrix::from_columns(targets))
    }
}

/// Cost selector used by configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    #[default]
    Quadratic,
    CrossEntropy,
}

impl CostKind {
    pub fn build(self) -> Box<dyn Cost> {
        match self {
            CostKind::Quadratic => Box::new(QuadraticCost),
            CostKind::CrossEntropy => Box::new(CrossEntropyCost),
        }
    }
}
