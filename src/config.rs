//! Configuration structures for training
//!
//! This module parses a JSON training configuration describing the network
//! shape, the strategies to use and the SGD hyperparameters.

use crate::activation::ActivationKind;
use crate::cost::CostKind;
use crate::error::ConfigError;
use crate::initialization::InitializationKind;
use crate::network::NeuralNetwork;
use crate::regularization::RegularizationKind;
use crate::trainer::TrainingOptions;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Configuration for a training run.
///
/// Strategy fields are optional and fall back to sigmoid activation, quadratic
/// cost, normalized initialization and L2 regularization. `seed` fixes the
/// random source for initialization and shuffling; without it every run draws
/// fresh OS randomness.
///
/// # Example
///
/// ```json
/// {
///   "layers": [2, 3, 1],
///   "cost": "cross_entropy",
///   "initialization": "normalized",
///   "regularization": "l2",
///   "epochs": 1000,
///   "learning_rate": 2.0,
///   "lambda": 0.0,
///   "mini_batch_size": 4,
///   "verbose": true,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Layer sizes, input layer first.
    pub layers: Vec<usize>,

    #[serde(default)]
    pub activation: ActivationKind,

    #[serde(default)]
    pub cost: CostKind,

    #[serde(default)]
    pub initialization: InitializationKind,

    #[serde(default)]
    pub regularization: RegularizationKind,

    /// Epochs, learning rate, λ, mini-batch size and verbosity.
    #[serde(flatten)]
    pub training: TrainingOptions,

    pub seed: Option<u64>,
}

impl TrainingConfig {
    /// Hyperparameters for [`Trainer::train`](crate::trainer::Trainer::train).
    pub fn training_options(&self) -> TrainingOptions {
        self.training
    }

    /// Random source honouring `seed`.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Builds a freshly initialized network of the configured shape.
    pub fn build_network(&self, rng: &mut dyn RngCore) -> NeuralNetwork {
        NeuralNetwork::new(
            &self.layers,
            self.activation.build(),
            self.initialization.build().as_ref(),
            rng,
        )
    }
}

/// Loads a training configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into a `TrainingConfig` and
/// validates the values.
///
/// # Examples
///
/// ```no_run
/// use feedforward_nn::config::load_config;
///
/// let cfg = load_config("config/xor.json").unwrap();
/// assert_eq!(cfg.layers, vec![2, 3, 1]);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrainingConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses and validates a configuration held in memory.
pub fn parse_config(contents: &str) -> Result<TrainingConfig, ConfigError> {
    let config: TrainingConfig = serde_json::from_str(contents)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &TrainingConfig) -> Result<(), ConfigError> {
    if config.layers.len() < 2 {
        return Err(ConfigError::Invalid(format!(
            "layers needs at least an input and an output size, got {}",
            config.layers.len()
        )));
    }

    if config.layers.contains(&0) {
        return Err(ConfigError::Invalid(
            "layer sizes must be positive".to_string(),
        ));
    }

    let options = &config.training;
    if options.epochs == 0 {
        return Err(ConfigError::Invalid("epochs must be positive".to_string()));
    }

    if !(options.learning_rate.is_finite() && options.learning_rate > 0.0) {
        return Err(ConfigError::Invalid(
            "learning_rate must be a positive number".to_string(),
        ));
    }

    if !(options.lambda.is_finite() && options.lambda >= 0.0) {
        return Err(ConfigError::Invalid(
            "lambda must be non-negative".to_string(),
        ));
    }

    if options.mini_batch_size == 0 {
        return Err(ConfigError::Invalid(
            "mini_batch_size must be positive".to_string(),
        ));
    }

    Ok(())
}
