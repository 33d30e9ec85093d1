//! Layered feedforward network: forward inference and backpropagation.
//!
//! A network with layer sizes `L0..Lk` owns `k` weight matrices (`W_i` is
//! `L(i+1) × L(i)`), `k` bias vectors and one activation shared by every
//! layer. Inputs are batches stored as matrices with one sample per column.
//!
//! The forward pass does not cache anything inside the network. It returns a
//! [`ForwardTrace`] holding every pre-activation and activation, and
//! [`NeuralNetwork::backpropagate_trace`] consumes that trace explicitly, so a
//! shared `&NeuralNetwork` can serve several batches at once.

use crate::activation::{Activation, Sigmoid};
use crate::algebra::{Matrix, Vector};
use crate::cost::Cost;
use crate::initialization::{NormalizedInitialization, WeightInitialization};
use rand::RngCore;
use std::sync::Arc;

/// Feedforward neural network.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    weights: Vec<Matrix>,
    biases: Vec<Vector>,
    activation: Arc<dyn Activation>,
}

/// Intermediate values of one forward pass.
///
/// `pre_activations[i]` is `z_i = W_i · a_i + b_i`; `activations[0]` is the
/// input batch and `activations[i + 1] = f(z_i)`.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    pre_activations: Vec<Matrix>,
    activations: Vec<Matrix>,
}

impl ForwardTrace {
    pub fn pre_activations(&self) -> &[Matrix] {
        &self.pre_activations
    }

    pub fn activations(&self) -> &[Matrix] {
        &self.activations
    }

    /// Output of the last layer.
    pub fn output(&self) -> &Matrix {
        // A trace always holds at least the input batch.
        &self.activations[self.activations.len() - 1]
    }

    pub fn into_output(mut self) -> Matrix {
        self.activations.swap_remove(self.activations.len() - 1)
    }
}

/// Per-layer cost gradients, summed (not averaged) over a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Vector>,
}

impl NeuralNetwork {
    /// Builds a network from explicit parameters.
    ///
    /// # Panics
    ///
    /// Panics if the weights and biases do not describe a chain of layers
    /// (see [`layer_shape_problem`]).
    pub fn from_parameters(
        weights: Vec<Matrix>,
        biases: Vec<Vector>,
        activation: Arc<dyn Activation>,
    ) -> Self {
        if let Some(problem) = layer_shape_problem(&weights, &biases) {
            panic!("Invalid network parameters: {problem}");
        }
        Self {
            weights,
            biases,
            activation,
        }
    }

    /// Builds a network with the given layer sizes, drawing the initial
    /// parameters from `initialization` with randomness from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two sizes are given or any size is zero.
    pub fn new(
        sizes: &[usize],
        activation: Arc<dyn Activation>,
        initialization: &dyn WeightInitialization,
        rng: &mut dyn RngCore,
    ) -> Self {
        assert!(
            sizes.len() >= 2,
            "A network needs at least an input and an output layer, got {} sizes",
            sizes.len()
        );
        assert!(
            sizes.iter().all(|&s| s > 0),
            "Layer sizes must be positive: {sizes:?}"
        );
        let weights = initialization.init_weights(sizes, rng);
        let biases = initialization.init_biases(sizes, rng);
        Self::from_parameters(weights, biases, activation)
    }

    /// Sigmoid network with normalized initialization and OS-seeded randomness.
    pub fn with_sizes(sizes: &[usize]) -> Self {
        let mut rng = rand::rng();
        Self::new(sizes, Arc::new(Sigmoid), &NormalizedInitialization, &mut rng)
    }

    /// Number of activation layers, input layer included.
    pub fn layer_count(&self) -> usize {
        self.weights.len() + 1
    }

    /// Layer sizes `L0..Lk`.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.layer_count());
        sizes.push(self.weights[0].cols());
        sizes.extend(self.weights.iter().map(Matrix::rows));
        sizes
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Vector] {
        &self.biases
    }

    pub fn activation(&self) -> &dyn Activation {
        self.activation.as_ref()
    }

    /// Replaces every weight matrix.
    ///
    /// # Panics
    ///
    /// Panics if any new matrix changes its layer's shape.
    pub fn set_weights(&mut self, weights: Vec<Matrix>) {
        assert_eq!(
            weights.len(),
            self.weights.len(),
            "Expected {} weight matrices, got {}",
            self.weights.len(),
            weights.len()
        );
        for (idx, (old, new)) in self.weights.iter().zip(&weights).enumerate() {
            assert_eq!(
                old.shape(),
                new.shape(),
                "Weight matrix {idx} changes shape"
            );
        }
        self.weights = weights;
    }

    /// Replaces every bias vector.
    ///
    /// # Panics
    ///
    /// Panics if any new vector changes its layer's length.
    pub fn set_biases(&mut self, biases: Vec<Vector>) {
        assert_eq!(
            biases.len(),
            self.biases.len(),
            "Expected {} bias vectors, got {}",
            self.biases.len(),
            biases.len()
        );
        for (idx, (old, new)) in self.biases.iter().zip(&biases).enumerate() {
            assert_eq!(old.len(), new.len(), "Bias vector {idx} changes length");
        }
        self.biases = biases;
    }

    /// Runs a batch through every layer and records the intermediate values.
    ///
    /// # Panics
    ///
    /// Panics if `input.rows()` differs from the input layer size.
    pub fn feedforward(&self, input: &Matrix) -> ForwardTrace {
        let mut pre_activations = Vec::with_capacity(self.weights.len());
        let mut activations = Vec::with_capacity(self.weights.len() + 1);
        activations.push(input.clone());

        for (w, b) in self.weights.iter().zip(&self.biases) {
            let z = w.mul_matrix(&activations[activations.len() - 1]).add_vector(b);
            activations.push(self.activation.apply_matrix(&z));
            pre_activations.push(z);
        }

        ForwardTrace {
            pre_activations,
            activations,
        }
    }

    /// Forward pass returning only the output batch.
    pub fn predict(&self, input: &Matrix) -> Matrix {
        self.feedforward(input).into_output()
    }

    /// Forward pass for a single sample.
    pub fn predict_vector(&self, input: &Vector) -> Vector {
        let output = self.predict(&Matrix::from_columns(std::slice::from_ref(input)));
        Vector::new(output.as_slice().to_vec())
    }

    /// Runs the forward pass on `input` and backpropagates the error against
    /// `targets`.
    pub fn backpropagate(&self, input: &Matrix, targets: &Matrix, cost: &dyn Cost) -> Gradients {
        let trace = self.feedforward(input);
        self.backpropagate_trace(&trace, targets, cost)
    }

    /// Computes the summed gradients for the batch recorded in `trace`.
    ///
    /// Walking from the last layer to the first:
    /// - weight gradient `δ_i · a_iᵀ` (the product sums over samples)
    /// - bias gradient: row sums of `δ_i`
    /// - `δ_(i-1) = (W_iᵀ · δ_i) ⊙ f'(z_(i-1))`
    ///
    /// # Panics
    ///
    /// Panics if `trace` was not produced by a network of this shape or if
    /// `targets` does not match the output shape.
    pub fn backpropagate_trace(
        &self,
        trace: &ForwardTrace,
        targets: &Matrix,
        cost: &dyn Cost,
    ) -> Gradients {
        let layers = self.weights.len();
        assert_eq!(
            trace.pre_activations.len(),
            layers,
            "Forward trace has {} layers, network has {layers}",
            trace.pre_activations.len()
        );
        assert_eq!(
            trace.output().shape(),
            targets.shape(),
            "Targets do not match the output batch shape"
        );

        let activation = self.activation.as_ref();
        let mut error = cost.error(
            trace.output(),
            targets,
            &trace.pre_activations[layers - 1],
            activation,
        );

        let mut weight_grads = Vec::with_capacity(layers);
        let mut bias_grads = Vec::with_capacity(layers);
        for i in (0..layers).rev() {
            weight_grads.push(error.mul_matrix(&trace.activations[i].transpose()));
            bias_grads.push(error.sum_cols());
            if i > 0 {
                error = self.weights[i]
                    .transpose()
                    .mul_matrix(&error)
                    .hadamard(&activation.derivative_matrix(&trace.pre_activations[i - 1]));
            }
        }
        weight_grads.reverse();
        bias_grads.reverse();

        Gradients {
            weights: weight_grads,
            biases: bias_grads,
        }
    }
}

/// Describes why `weights` and `biases` cannot form a layered network, or
/// returns `None` when they can.
///
/// Valid parameters have at least one layer, equal counts of weights and
/// biases, `biases[i].len() == weights[i].rows()` and
/// `weights[i].cols() == weights[i - 1].rows()`.
pub fn layer_shape_problem(weights: &[Matrix], biases: &[Vector]) -> Option<String> {
    if weights.is_empty() {
        return Some("a network needs at least one weight matrix".to_string());
    }
    if weights.len() != biases.len() {
        return Some(format!(
            "{} weight matrices but {} bias vectors",
            weights.len(),
            biases.len()
        ));
    }
    for (idx, (w, b)) in weights.iter().zip(biases).enumerate() {
        if w.rows() == 0 || w.cols() == 0 {
            return Some(format!("weight matrix {idx} is empty"));
        }
        if b.len() != w.rows() {
            return Some(format!(
                "bias vector {idx} has length {} but weight matrix {idx} has {} rows",
                b.len(),
                w.rows()
            ));
        }
        if idx > 0 && w.cols() != weights[idx - 1].rows() {
            return Some(format!(
                "weight matrix {idx} has {} columns but layer {idx} has {} neurons",
                w.cols(),
                weights[idx - 1].rows()
            ));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::QuadraticCost;
    use crate::initialization::DefaultInitialization;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(sizes: &[usize], seed: u64) -> NeuralNetwork {
        let mut rng = StdRng::seed_from_u64(seed);
        NeuralNetwork::new(sizes, Arc::new(Sigmoid), &DefaultInitialization, &mut rng)
    }

    #[test]
    fn test_shapes_from_sizes() {
        let net = seeded(&[2, 3, 1], 1);
        assert_eq!(net.layer_count(), 3);
        assert_eq!(net.sizes(), vec![2, 3, 1]);
        assert_eq!(net.weights()[0].shape(), (3, 2));
        assert_eq!(net.weights()[1].shape(), (1, 3));
        assert_eq!(net.biases()[0].len(), 3);
        assert_eq!(net.biases()[1].len(), 1);
    }

    #[test]
    fn test_trace_layout() {
        let net = seeded(&[2, 3, 1], 2);
        let input = Matrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]);
        let trace = net.feedforward(&input);

        assert_eq!(trace.pre_activations().len(), 2);
        assert_eq!(trace.activations().len(), 3);
        assert_eq!(trace.activations()[0], input);
        assert_eq!(trace.output().shape(), (1, 2));
    }

    #[test]
    fn test_gradient_shapes() {
        let net = seeded(&[3, 4, 2], 3);
        let input = Matrix::zeros(3, 5);
        let targets = Matrix::zeros(2, 5);
        let grads = net.backpropagate(&input, &targets, &QuadraticCost);

        assert_eq!(grads.weights[0].shape(), (4, 3));
        assert_eq!(grads.weights[1].shape(), (2, 4));
        assert_eq!(grads.biases[0].len(), 4);
        assert_eq!(grads.biases[1].len(), 2);
    }

    #[test]
    fn test_with_sizes_uses_sigmoid() {
        let net = NeuralNetwork::with_sizes(&[4, 2]);
        assert_eq!(net.activation().marker(), Some(Sigmoid::MARKER));
    }

    #[test]
    fn test_shape_problem_detection() {
        let w = vec![Matrix::zeros(3, 2), Matrix::zeros(1, 4)];
        let b = vec![Vector::zeros(3), Vector::zeros(1)];
        let problem = layer_shape_problem(&w, &b);
        assert!(problem.is_some_and(|p| p.contains("columns")));
    }

    #[test]
    #[should_panic(expected = "at least an input and an output layer")]
    fn test_single_layer_rejected() {
        let _ = seeded(&[3], 0);
    }

    #[test]
    #[should_panic(expected = "changes shape")]
    fn test_set_weights_shape_checked() {
        let mut net = seeded(&[2, 2], 0);
        net.set_weights(vec![Matrix::zeros(3, 2)]);
    }
}
