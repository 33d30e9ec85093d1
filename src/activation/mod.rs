//! Activation functions applied to every neuron of a layer.
//!
//! The network holds one shared [`Activation`] and calls it once per layer on
//! the whole pre-activation batch. Derivatives are always evaluated on the
//! stored pre-activation values `z`, never on the cached outputs.

mod sigmoid;

pub use sigmoid::Sigmoid;

use crate::algebra::{Matrix, Vector};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Core trait for activation functions.
///
/// Implementors supply the scalar function and its derivative; the vector and
/// matrix forms lift them elementwise.
pub trait Activation: fmt::Debug + Send + Sync {
    /// `f(z)`.
    fn apply(&self, z: f64) -> f64;

    /// `f'(z)`, evaluated from the pre-activation value.
    fn derivative(&self, z: f64) -> f64;

    /// Marker line written to model files, if the activation has one.
    fn marker(&self) -> Option<&'static str> {
        None
    }

    fn apply_vector(&self, v: &Vector) -> Vector {
        v.map(|z| self.apply(z))
    }

    fn apply_matrix(&self, m: &Matrix) -> Matrix {
        m.map(|z| self.apply(z))
    }

    fn derivative_vector(&self, v: &Vector) -> Vector {
        v.map(|z| self.derivative(z))
    }

    fn derivative_matrix(&self, m: &Matrix) -> Matrix {
        m.map(|z| self.derivative(z))
    }
}

/// Activation selector used by configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationKind {
    #[default]
    Sigmoid,
}

impl ActivationKind {
    pub fn build(self) -> Arc<dyn Activation> {
        match self {
            ActivationKind::Sigmoid => Arc::new(Sigmoid),
        }
    }

    /// Resolves a model-file marker line.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            Sigmoid::MARKER => Some(ActivationKind::Sigmoid),
            _ => None,
        }
    }
}
