//! Dense linear algebra used by the network and its strategies.
//!
//! - [`Vector`]: a column of real numbers
//! - [`Matrix`]: row-major `rows × cols` matrix; batches store one sample per column

pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
