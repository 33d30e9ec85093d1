//! Dense column vector of `f64` values.

use std::fmt;
use std::hash::{Hash, Hasher};

/// An ordered sequence of real numbers.
///
/// Vectors are immutable once built: every operation allocates and returns a
/// new `Vector`, leaving its operands untouched.
#[derive(Debug, Clone)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Creates a vector that takes ownership of `data`.
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Creates a vector of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> f64 {
        self.data[index]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// Applies `f` to every entry.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Vector {
        Vector::new(self.data.iter().map(|&x| f(x)).collect())
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Index of the largest entry (first one on ties), or `None` if empty.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, &value) in self.data.iter().enumerate() {
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((idx, value)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Entrywise sum.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn add(&self, other: &Vector) -> Vector {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Entrywise difference.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn sub(&self, other: &Vector) -> Vector {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    /// Hadamard product.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn hadamard(&self, other: &Vector) -> Vector {
        self.zip_with(other, "hadamard", |a, b| a * b)
    }

    /// Multiplies every entry by `scalar`.
    pub fn scale(&self, scalar: f64) -> Vector {
        self.map(|x| x * scalar)
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(&self, other: &Vector, op: &str, f: F) -> Vector {
        assert_eq!(
            self.len(),
            other.len(),
            "Vector {op}: length mismatch ({} vs {})",
            self.len(),
            other.len()
        );
        Vector::new(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        )
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Vector::new(data)
    }
}

impl From<&[f64]> for Vector {
    fn from(data: &[f64]) -> Self {
        Vector::new(data.to_vec())
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.data.len() == other.data.len()
            && self.data.iter().zip(&other.data).all(|(a, b)| a == b)
    }
}

// Entries holding NaN never compare equal, so keep NaN out of hashed sets.
impl Eq for Vector {}

impl Hash for Vector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.len().hash(state);
        for &value in &self.data {
            hash_entry(value, state);
        }
    }
}

/// Hashes an entry so that values comparing equal (`0.0 == -0.0`) hash equal.
pub(crate) fn hash_entry<H: Hasher>(value: f64, state: &mut H) {
    let normalized = if value == 0.0 { 0.0f64 } else { value };
    normalized.to_bits().hash(state);
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, value) in self.data.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
