//! Tests for configuration parsing
//!
//! This file tests the config module including:
//! - Loading the bundled XOR config
//! - Strategy selection and defaults
//! - Handling invalid JSON and invalid values
//! - Handling missing files

use feedforward_nn::activation::ActivationKind;
use feedforward_nn::config::{load_config, parse_config};
use feedforward_nn::cost::CostKind;
use feedforward_nn::error::ConfigError;
use feedforward_nn::initialization::InitializationKind;
use feedforward_nn::regularization::RegularizationKind;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Valid Config Loading Tests
// ============================================================================

mod valid_config_tests {
    use super::*;

    #[test]
    fn test_load_xor_config() {
        let config = load_config("config/xor.json").expect("Failed to load XOR config");

        assert_eq!(config.layers, vec![2, 3, 1]);
        assert_eq!(config.cost, CostKind::CrossEntropy);
        assert_eq!(config.initialization, InitializationKind::Normalized);
        assert_eq!(config.regularization, RegularizationKind::L2);
        assert_eq!(config.training.mini_batch_size, 4);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_load_from_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "l1.json",
            r#"{
  "layers": [4, 8, 8, 2],
  "activation": "sigmoid",
  "cost": "quadratic",
  "initialization": "default",
  "regularization": "l1",
  "epochs": 5,
  "learning_rate": 0.25,
  "lambda": 0.5,
  "mini_batch_size": 16,
  "verbose": true
}"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.activation, ActivationKind::Sigmoid);
        assert_eq!(config.cost, CostKind::Quadratic);
        assert_eq!(config.initialization, InitializationKind::Default);
        assert_eq!(config.regularization, RegularizationKind::L1);

        let options = config.training_options();
        assert_eq!(options.epochs, 5);
        assert!((options.learning_rate - 0.25).abs() < 1e-12);
        assert!((options.lambda - 0.5).abs() < 1e-12);
        assert!(options.verbose);
    }

    #[test]
    fn test_built_network_has_configured_shape() {
        let config = parse_config(
            r#"{"layers": [3, 5, 2], "epochs": 1, "learning_rate": 1, "mini_batch_size": 1, "seed": 3}"#,
        )
        .unwrap();
        let network = config.build_network(&mut config.rng());
        assert_eq!(network.sizes(), vec![3, 5, 2]);
        assert_eq!(network.weights()[0].shape(), (5, 3));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_config(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "broken.json", "{ \"layers\": [2, 1], ");
        assert!(matches!(load_config(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_required_field() {
        let result = parse_config(r#"{"layers": [2, 1], "epochs": 3, "mini_batch_size": 1}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_zero_layer_size() {
        let result = parse_config(
            r#"{"layers": [2, 0, 1], "epochs": 1, "learning_rate": 0.1, "mini_batch_size": 1}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_lambda() {
        let result = parse_config(
            r#"{"layers": [2, 1], "epochs": 1, "learning_rate": 0.1, "lambda": -1.0, "mini_batch_size": 1}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_batch_size() {
        let result = parse_config(
            r#"{"layers": [2, 1], "epochs": 1, "learning_rate": 0.1, "mini_batch_size": 0}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
