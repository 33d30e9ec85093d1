//! Mini-batch stochastic gradient descent.
//!
//! Each epoch shuffles the training set, splits it into mini-batches and, for
//! every batch, backpropagates once and applies the averaged gradient step:
//!
//! ```text
//! W ← R(W, η, λ, n) - (η / m) · ∇W
//! b ← b - (η / m) · ∇b
//! ```
//!
//! where `R` is the regularization, `n` the training-set size and `m` the
//! number of samples in the batch. Training stops after the requested number
//! of epochs; there is no early stopping.

use crate::algebra::{Matrix, Vector};
use crate::cost::Cost;
use crate::data::Dataset;
use crate::network::NeuralNetwork;
use crate::regularization::Regularization;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Hyperparameters for one call to [`Trainer::train`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrainingOptions {
    pub epochs: usize,
    pub learning_rate: f64,
    /// Regularization strength λ.
    #[serde(default)]
    pub lambda: f64,
    pub mini_batch_size: usize,
    /// Evaluate on the test set and log progress after every epoch.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            epochs: 30,
            learning_rate: 0.5,
            lambda: 0.0,
            mini_batch_size: 10,
            verbose: false,
        }
    }
}

/// Score of the network on a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub cost: f64,
    /// Samples whose output matches the target.
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {
    /// Fraction of correct samples, 0 for an empty dataset.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Outcome of one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochSummary {
    /// 1-based epoch index.
    pub epoch: usize,
    /// Test-set score, present only for verbose runs with a test set.
    pub evaluation: Option<Evaluation>,
}

/// Drives SGD on a shared network.
///
/// The network is held through `Rc<RefCell<_>>`: every holder of the same
/// `Rc` observes the updated parameters. [`Trainer::train`] borrows the
/// network mutably for the duration of each epoch, so no other borrow may be
/// held while training runs.
pub struct Trainer {
    network: Rc<RefCell<NeuralNetwork>>,
    cost: Box<dyn Cost>,
    regularization: Box<dyn Regularization>,
    training: Dataset,
    test: Option<Dataset>,
    rng: Box<dyn RngCore>,
}

impl Trainer {
    /// Creates a trainer that shuffles with OS-seeded randomness.
    pub fn new(
        network: Rc<RefCell<NeuralNetwork>>,
        cost: Box<dyn Cost>,
        regularization: Box<dyn Regularization>,
        training: Dataset,
    ) -> Self {
        Self {
            network,
            cost,
            regularization,
            training,
            test: None,
            rng: Box::new(StdRng::from_os_rng()),
        }
    }

    /// Dataset used for per-epoch evaluation.
    pub fn with_test_data(mut self, test: Dataset) -> Self {
        self.test = Some(test);
        self
    }

    /// Replaces the shuffling random source, e.g. with a seeded generator.
    pub fn with_rng<R: RngCore + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn network(&self) -> Rc<RefCell<NeuralNetwork>> {
        Rc::clone(&self.network)
    }

    pub fn cost(&self) -> &dyn Cost {
        self.cost.as_ref()
    }

    pub fn training_data(&self) -> &Dataset {
        &self.training
    }

    pub fn test_data(&self) -> Option<&Dataset> {
        self.test.as_ref()
    }

    /// Runs `options.epochs` epochs of mini-batch SGD.
    ///
    /// # Panics
    ///
    /// Panics if the mini-batch size is zero, the training set is empty, or
    /// the network is borrowed elsewhere while training.
    pub fn train(&mut self, options: &TrainingOptions) -> Vec<EpochSummary> {
        assert!(options.mini_batch_size > 0, "Mini-batch size must be positive");
        assert!(!self.training.is_empty(), "Training set is empty");

        let n = self.training.len();
        let mut summaries = Vec::with_capacity(options.epochs);

        for epoch in 1..=options.epochs {
            self.training.shuffle(&mut *self.rng);
            let batches = self.training.batches(options.mini_batch_size);
            debug!("epoch {epoch}: {} mini-batches of up to {}", batches.len(), options.mini_batch_size);

            {
                let mut network = self.network.borrow_mut();
                for (inputs, targets) in &batches {
                    self.update_mini_batch(&mut network, inputs, targets, options, n);
                }
            }

            let evaluation = match (&self.test, options.verbose) {
                (Some(test), true) => Some(self.evaluate(test)),
                _ => None,
            };
            if options.verbose {
                match &evaluation {
                    Some(eval) => info!(
                        "epoch {epoch}/{}: cost {:.6}, {}/{} correct",
                        options.epochs, eval.cost, eval.correct, eval.total
                    ),
                    None => info!("epoch {epoch}/{} complete", options.epochs),
                }
            }

            summaries.push(EpochSummary { epoch, evaluation });
        }

        summaries
    }

    /// Scores the network on `dataset` without touching any training state.
    ///
    /// A sample counts as correct when the largest output unit matches the
    /// largest target unit; single-unit outputs are correct when they lie
    /// within 0.5 of the target.
    pub fn evaluate(&self, dataset: &Dataset) -> Evaluation {
        if dataset.is_empty() {
            return Evaluation {
                cost: 0.0,
                correct: 0,
                total: 0,
            };
        }

        let network = self.network.borrow();
        let outputs = network.predict(&Matrix::from_columns(dataset.inputs()));
        let targets = Matrix::from_columns(dataset.targets());
        let cost = self.cost.total_from_outputs(&outputs, &targets);
        let correct = outputs
            .columns()
            .iter()
            .zip(dataset.targets())
            .filter(|(output, target)| is_match(output, target))
            .count();

        Evaluation {
            cost,
            correct,
            total: dataset.len(),
        }
    }

    fn update_mini_batch(
        &self,
        network: &mut NeuralNetwork,
        inputs: &Matrix,
        targets: &Matrix,
        options: &TrainingOptions,
        n: usize,
    ) {
        let gradients = network.backpropagate(inputs, targets, self.cost.as_ref());
        let step = options.learning_rate / inputs.cols() as f64;

        let weights = network
            .weights()
            .iter()
            .zip(&gradients.weights)
            .map(|(w, grad)| {
                self.regularization
                    .calculate(w, options.learning_rate, options.lambda, n)
                    .sub_matrix(&grad.scale(step))
            })
            .collect();
        let biases = network
            .biases()
            .iter()
            .zip(&gradients.biases)
            .map(|(b, grad)| b.sub(&grad.scale(step)))
            .collect();

        network.set_weights(weights);
        network.set_biases(biases);
    }
}

fn is_match(output: &Vector, target: &Vector) -> bool {
    if output.len() == 1 {
        (output.get(0) - target.get(0)).abs() < 0.5
    } else {
        output.argmax() == target.argmax()
    }
}
