//! Weight initialization strategies.
//!
//! Given layer sizes `L0..Lk`, a strategy produces `k` weight matrices
//! (`L(i+1) × L(i)`) and `k` bias vectors (`L(i+1)`), sampled from a standard
//! normal distribution. The random source is always passed in so callers can
//! choose between a seeded generator and OS-seeded randomness.

mod default;
mod normalized;

pub use default::DefaultInitialization;
pub use normalized::NormalizedInitialization;

use crate::algebra::{Matrix, Vector};
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};
use serde::Deserialize;
use std::fmt;

/// Core trait for weight initialization.
pub trait WeightInitialization: fmt::Debug {
    /// Initial weight matrices, one per consecutive pair of layer sizes.
    fn init_weights(&self, sizes: &[usize], rng: &mut dyn RngCore) -> Vec<Matrix>;

    /// Initial bias vectors, one per non-input layer. Biases are never scaled.
    fn init_biases(&self, sizes: &[usize], rng: &mut dyn RngCore) -> Vec<Vector> {
        sizes
            .windows(2)
            .map(|pair| Vector::new(sample_normal(rng, pair[1], 1.0)))
            .collect()
    }
}

/// Draws `count` standard-normal samples, each multiplied by `scale`.
pub(crate) fn sample_normal(rng: &mut dyn RngCore, count: usize, scale: f64) -> Vec<f64> {
    (0..count)
        .map(|_| {
            let sample: f64 = StandardNormal.sample(&mut *rng);
            sample * scale
        })
        .collect()
}

/// Builds `L(i+1) × L(i)` matrices whose entries are normal samples times
/// `scale(fan_in)`.
pub(crate) fn normal_weights<F: Fn(usize) -> f64>(
    sizes: &[usize],
    rng: &mut dyn RngCore,
    scale: F,
) -> Vec<Matrix> {
    sizes
        .windows(2)
        .map(|pair| {
            let (fan_in, fan_out) = (pair[0], pair[1]);
            Matrix::new(fan_out, fan_in, sample_normal(rng, fan_out * fan_in, scale(fan_in)))
        })
        .collect()
}

/// Initialization selector used by configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializationKind {
    Default,
    #[default]
    Normalized,
}

impl InitializationKind {
    pub fn build(self) -> Box<dyn WeightInitialization> {
        match self {
            InitializationKind::Default => Box::new(DefaultInitialization),
            InitializationKind::Normalized => Box::new(NormalizedInitialization),
        }
    }
}
