// Tests for forward propagation: output dimensions, hand-computed values and
// determinism.

use approx::assert_relative_eq;
use feedforward_nn::activation::Sigmoid;
use feedforward_nn::initialization::NormalizedInitialization;
use feedforward_nn::{Matrix, NeuralNetwork, Vector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn seeded_network(sizes: &[usize], seed: u64) -> NeuralNetwork {
    let mut rng = StdRng::seed_from_u64(seed);
    NeuralNetwork::new(sizes, Arc::new(Sigmoid), &NormalizedInitialization, &mut rng)
}

#[test]
fn test_single_layer_hand_computed() {
    // W = [[1, 2], [3, 4]], b = [0.5, -0.5], x = [1, 0]
    let weights = vec![Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]])];
    let biases = vec![Vector::new(vec![0.5, -0.5])];
    let network = NeuralNetwork::from_parameters(weights, biases, Arc::new(Sigmoid));

    let output = network.predict_vector(&Vector::new(vec![1.0, 0.0]));
    assert_eq!(output.len(), 2);
    assert_relative_eq!(output.get(0), sigmoid(1.5), epsilon = 1e-12);
    assert_relative_eq!(output.get(1), sigmoid(2.5), epsilon = 1e-12);
}

#[test]
fn test_trace_records_every_layer() {
    let network = seeded_network(&[3, 4, 2], 11);
    let input = Matrix::from_columns(&[
        Vector::new(vec![0.1, 0.2, 0.3]),
        Vector::new(vec![1.0, 0.0, -1.0]),
    ]);
    let trace = network.feedforward(&input);

    assert_eq!(trace.pre_activations().len(), 2);
    assert_eq!(trace.activations().len(), 3);
    assert_eq!(trace.activations()[0], input);
    assert_eq!(trace.pre_activations()[0].shape(), (4, 2));
    assert_eq!(trace.output().shape(), (2, 2));

    // a_i = sigmoid(z_i)
    for (z, a) in trace.pre_activations().iter().zip(&trace.activations()[1..]) {
        for (&zv, &av) in z.as_slice().iter().zip(a.as_slice()) {
            assert_relative_eq!(av, sigmoid(zv), epsilon = 1e-12);
        }
    }
}

#[test]
fn test_outputs_are_in_unit_interval() {
    let network = seeded_network(&[4, 8, 3], 3);
    let output = network.predict_vector(&Vector::new(vec![5.0, -3.0, 0.5, 2.0]));
    assert_eq!(output.len(), 3);
    assert!(output.iter().all(|&v| v > 0.0 && v < 1.0));
}

#[test]
fn test_forward_pass_is_deterministic() {
    let network = seeded_network(&[2, 3, 1], 7);
    let input = Vector::new(vec![0.3, -0.7]);
    assert_eq!(network.predict_vector(&input), network.predict_vector(&input));
}

#[test]
fn test_batch_matches_single_samples() {
    let network = seeded_network(&[2, 5, 2], 21);
    let samples = vec![
        Vector::new(vec![0.0, 1.0]),
        Vector::new(vec![1.0, 1.0]),
        Vector::new(vec![-0.5, 0.25]),
    ];
    let batch = network.predict(&Matrix::from_columns(&samples));
    for (column, sample) in batch.columns().iter().zip(&samples) {
        let single = network.predict_vector(sample);
        for (a, b) in column.iter().zip(single.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_same_seed_same_network() {
    let a = seeded_network(&[3, 2, 2], 99);
    let b = seeded_network(&[3, 2, 2], 99);
    assert_eq!(a.weights(), b.weights());
    assert_eq!(a.biases(), b.biases());
    assert_eq!(a.sizes(), vec![3, 2, 2]);
}

#[test]
#[should_panic]
fn test_wrong_input_size_panics() {
    let network = seeded_network(&[3, 2], 1);
    let _ = network.predict_vector(&Vector::new(vec![1.0, 2.0]));
}
