//! Dataset containers and batching helpers.

use crate::algebra::{Matrix, Vector};
use rand::Rng;

/// Parallel arrays of input and target vectors.
///
/// `inputs[i]` is paired with `targets[i]`; every reordering keeps the pairs
/// together.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: Vec<Vector>,
    targets: Vec<Vector>,
}

impl Dataset {
    /// # Panics
    ///
    /// Panics if `inputs` and `targets` differ in length.
    pub fn new(inputs: Vec<Vector>, targets: Vec<Vector>) -> Self {
        assert_eq!(
            inputs.len(),
            targets.len(),
            "Dataset has {} inputs but {} targets",
            inputs.len(),
            targets.len()
        );
        Self { inputs, targets }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn inputs(&self) -> &[Vector] {
        &self.inputs
    }

    pub fn targets(&self) -> &[Vector] {
        &self.targets
    }

    /// Shuffles inputs and targets with the same permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle(&mut self.inputs, &mut self.targets, rng);
    }

    /// Consecutive `(inputs, targets)` mini-batches, one sample per column.
    /// The last batch is short when `batch_size` does not divide the length.
    pub fn batches(&self, batch_size: usize) -> Vec<(Matrix, Matrix)> {
        subdivide(&self.inputs, batch_size)
            .into_iter()
            .zip(subdivide(&self.targets, batch_size))
            .collect()
    }
}

/// Fisher-Yates shuffle applied in lockstep to two slices.
///
/// Every swap is performed on both slices, so `first[i]` and `second[i]` stay
/// paired.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn shuffle<A, B, R: Rng + ?Sized>(first: &mut [A], second: &mut [B], rng: &mut R) {
    assert_eq!(
        first.len(),
        second.len(),
        "Cannot shuffle slices of different lengths ({} vs {})",
        first.len(),
        second.len()
    );
    if first.len() <= 1 {
        return;
    }
    for i in (1..first.len()).rev() {
        let j = rng.random_range(0..=i);
        first.swap(i, j);
        second.swap(i, j);
    }
}

/// Splits `items` into chunks of `size` vectors, each stacked as the columns
/// of a matrix. The final chunk may be shorter.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn subdivide(items: &[Vector], size: usize) -> Vec<Matrix> {
    assert!(size > 0, "Chunk size must be positive");
    items.chunks(size).map(Matrix::from_columns).collect()
}
