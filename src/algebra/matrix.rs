//! Dense row-major matrix of `f64` values.
//!
//! Batches travel through the network as matrices whose columns are
//! independent samples, so most helpers here are phrased in terms of columns.

use super::vector::{hash_entry, Vector};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

/// An `rows × cols` matrix of real numbers.
///
/// Storage is a flat row-major buffer. Like [`Vector`], a `Matrix` is never
/// mutated after construction; every operation returns a freshly allocated
/// result.
///
/// Binary operations assert their shape constraints. A mismatch means the
/// caller wired layers together incorrectly, so it panics instead of returning
/// an error.
#[derive(Debug, Clone)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a matrix from a row-major buffer.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "Matrix buffer length {} does not match shape {rows}x{cols}",
            data.len()
        );
        Self { rows, cols, data }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from explicit rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows are ragged.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                cols,
                "Matrix row {idx} has {} entries, expected {cols}",
                row.len()
            );
            data.extend_from_slice(row);
        }
        Self {
            rows: rows.len(),
            cols,
            data,
        }
    }

    /// Stacks vectors side by side, one vector per column.
    ///
    /// # Panics
    ///
    /// Panics if the vectors differ in length.
    pub fn from_columns(columns: &[Vector]) -> Self {
        let rows = columns.first().map_or(0, Vector::len);
        let cols = columns.len();
        let mut data = vec![0.0; rows * cols];
        for (j, column) in columns.iter().enumerate() {
            assert_eq!(
                column.len(),
                rows,
                "Matrix column {j} has {} entries, expected {rows}",
                column.len()
            );
            for (i, &value) in column.iter().enumerate() {
                data[i * cols + j] = value;
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.rows && col < self.cols,
            "Matrix index ({row}, {col}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns a copy with the entry at `(row, col)` replaced.
    pub fn with_entry(&self, row: usize, col: usize, value: f64) -> Matrix {
        assert!(
            row < self.rows && col < self.cols,
            "Matrix index ({row}, {col}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        let mut data = self.data.clone();
        data[row * self.cols + col] = value;
        Matrix::new(self.rows, self.cols, data)
    }

    /// Applies `f` to every entry.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Matrix {
        Matrix::new(self.rows, self.cols, self.data.iter().map(|&x| f(x)).collect())
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = vec![0.0; self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Matrix::new(self.cols, self.rows, data)
    }

    /// Adds `bias` to every column.
    ///
    /// # Panics
    ///
    /// Panics if `bias.len() != self.rows()`.
    pub fn add_vector(&self, bias: &Vector) -> Matrix {
        assert_eq!(
            bias.len(),
            self.rows,
            "Matrix add_vector: vector length {} does not match {} rows",
            bias.len(),
            self.rows
        );
        let mut data = Vec::with_capacity(self.data.len());
        for (i, row) in self.data.chunks_exact(self.cols.max(1)).enumerate().take(self.rows) {
            let b = bias.get(i);
            data.extend(row.iter().map(|&x| x + b));
        }
        Matrix::new(self.rows, self.cols, data)
    }

    /// Entrywise sum.
    pub fn add_matrix(&self, other: &Matrix) -> Matrix {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Entrywise difference.
    pub fn sub_matrix(&self, other: &Matrix) -> Matrix {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    /// Entrywise (Hadamard) product.
    pub fn hadamard(&self, other: &Matrix) -> Matrix {
        self.zip_with(other, "hadamard", |a, b| a * b)
    }

    /// Matrix product `self × other`.
    ///
    /// Uses the i-k-j loop order: each output row is accumulated by streaming
    /// over rows of `other`, which keeps both inner accesses contiguous.
    ///
    /// # Panics
    ///
    /// Panics if `self.cols() != other.rows()`.
    pub fn mul_matrix(&self, other: &Matrix) -> Matrix {
        assert_eq!(
            self.cols, other.rows,
            "Matrix multiply: inner dimensions differ ({}x{} * {}x{})",
            self.rows, self.cols, other.rows, other.cols
        );
        let (n, k, m) = (self.rows, self.cols, other.cols);
        let mut out = vec![0.0; n * m];
        for i in 0..n {
            let out_row = &mut out[i * m..(i + 1) * m];
            for p in 0..k {
                let a = self.data[i * k + p];
                let other_row = &other.data[p * m..(p + 1) * m];
                for (acc, &b) in out_row.iter_mut().zip(other_row) {
                    *acc += a * b;
                }
            }
        }
        Matrix::new(n, m, out)
    }

    /// Matrix-vector product.
    ///
    /// # Panics
    ///
    /// Panics if `v.len() != self.cols()`.
    pub fn mul_vector(&self, v: &Vector) -> Vector {
        assert_eq!(
            v.len(),
            self.cols,
            "Matrix mul_vector: vector length {} does not match {} columns",
            v.len(),
            self.cols
        );
        let mut out = vec![0.0; self.rows];
        for (i, value) in out.iter_mut().enumerate() {
            *value = self
                .row(i)
                .iter()
                .zip(v.iter())
                .map(|(a, b)| a * b)
                .sum();
        }
        Vector::new(out)
    }

    /// Multiplies every entry by `scalar`.
    pub fn scale(&self, scalar: f64) -> Matrix {
        self.map(|x| x * scalar)
    }

    /// Sums across columns: entry `i` of the result is the sum of row `i`.
    ///
    /// For a batch this folds the per-sample columns into one aggregate vector.
    pub fn sum_cols(&self) -> Vector {
        let mut out = vec![0.0; self.rows];
        for (i, value) in out.iter_mut().enumerate() {
            *value = self.row(i).iter().sum();
        }
        Vector::new(out)
    }

    /// Splits the matrix into its column vectors.
    pub fn columns(&self) -> Vec<Vector> {
        (0..self.cols)
            .map(|j| Vector::new((0..self.rows).map(|i| self.data[i * self.cols + j]).collect()))
            .collect()
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(&self, other: &Matrix, op: &str, f: F) -> Matrix {
        assert_eq!(
            self.shape(),
            other.shape(),
            "Matrix {op}: shape mismatch ({}x{} vs {}x{})",
            self.rows,
            self.cols,
            other.rows,
            other.cols
        );
        Matrix::new(
            self.rows,
            self.cols,
            self.data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        )
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        self.add_matrix(rhs)
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        self.sub_matrix(rhs)
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        self.mul_matrix(rhs)
    }
}

impl Mul<&Vector> for &Matrix {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        self.mul_vector(rhs)
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs.scale(self)
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data.iter().zip(&other.data).all(|(a, b)| a == b)
    }
}

// Same caveat as `Vector`: NaN entries break reflexivity.
impl Eq for Matrix {}

impl Hash for Matrix {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
        self.cols.hash(state);
        for &value in &self.data {
            hash_entry(value, state);
        }
    }
}

impl fmt::Display for Matrix {
    /// One row per line, entries separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, value) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}
