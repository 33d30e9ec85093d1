//! Logistic sigmoid activation.

use super::Activation;

/// `f(z) = 1 / (1 + e^(-z))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl Sigmoid {
    /// Marker identifying the sigmoid in saved model files.
    pub const MARKER: &'static str = "SIGMOID_ACTIVATION_FUNCTION";
}

impl Activation for Sigmoid {
    fn apply(&self, z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    /// `f(z) * (1 - f(z))`, computed from `z` rather than from a cached output.
    fn derivative(&self, z: f64) -> f64 {
        let s = self.apply(z);
        s * (1.0 - s)
    }

    fn marker(&self) -> Option<&'static str> {
        Some(Self::MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Matrix, Vector};

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_sigmoid_zero() {
        assert!((Sigmoid.apply(0.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!(Sigmoid.apply(2.0) > 0.5 && Sigmoid.apply(2.0) < 1.0);
        assert!(Sigmoid.apply(-2.0) > 0.0 && Sigmoid.apply(-2.0) < 0.5);
    }

    #[test]
    fn test_derivative_takes_pre_activation() {
        // At z = 0 the slope is 0.25. Feeding the output 0.5 back in must not
        // produce the same value.
        assert!((Sigmoid.derivative(0.0) - 0.25).abs() < EPSILON);
        assert!((Sigmoid.derivative(0.5) - 0.25).abs() > 1e-3);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let h = 1e-6;
        for &z in &[-3.0, -0.7, 0.0, 1.2, 4.0] {
            let numeric = (Sigmoid.apply(z + h) - Sigmoid.apply(z - h)) / (2.0 * h);
            assert!((Sigmoid.derivative(z) - numeric).abs() < 1e-8);
        }
    }

    #[test]
    fn test_lifted_forms() {
        let v = Sigmoid.apply_vector(&Vector::new(vec![0.0, 0.0]));
        assert_eq!(v, Vector::new(vec![0.5, 0.5]));

        let m = Sigmoid.derivative_matrix(&Matrix::zeros(2, 3));
        assert!(m.as_slice().iter().all(|&d| (d - 0.25).abs() < EPSILON));
    }

    #[test]
    fn test_marker() {
        assert_eq!(Sigmoid.marker(), Some("SIGMOID_ACTIVATION_FUNCTION"));
    }
}
