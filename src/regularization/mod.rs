//! Weight regularization applied during the gradient-descent update.
//!
//! Regularization only ever touches weight matrices; biases bypass it. The
//! trainer calls [`Regularization::calculate`] on the current weights and then
//! subtracts the scaled gradient from the result.

mod l1;
mod l2;

pub use l1::L1Regularization;
pub use l2::L2Regularization;

use crate::algebra::Matrix;
use serde::Deserialize;
use std::fmt;

/// Core trait for regularization strategies.
pub trait Regularization: fmt::Debug {
    /// Returns the regularized copy of `weights`.
    ///
    /// # Arguments
    ///
    /// * `weights` - Current weights of one layer
    /// * `learning_rate` - Learning rate of the current update
    /// * `lambda` - Regularization strength
    /// * `n` - Total number of training samples
    fn calculate(&self, weights: &Matrix, learning_rate: f64, lambda: f64, n: usize) -> Matrix;
}

/// `(λ · η) / n`, the per-update regularization factor.
pub(crate) fn factor(learning_rate: f64, lambda: f64, n: usize) -> f64 {
    assert!(n > 0, "Regularization needs a non-empty training set");
    (lambda * learning_rate) / n as f64
}

/// Regularization selector used by configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegularizationKind {
    L1,
    #[default]
    L2,
}

impl RegularizationKind {
    pub fn build(self) -> Box<dyn Regularization> {
        match self {
            RegularizationKind::L1 => Box::new(L1Regularization),
            RegularizationKind::L2 => Box::new(L2Regularization),
        }
    }
}
