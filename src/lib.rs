//! Feedforward Neural Network Library
//!
//! A dense feedforward network trained with mini-batch stochastic gradient
//! descent, built on a small from-scratch linear algebra layer.
//!
//! # Modules
//!
//! - `algebra`: `Vector` and `Matrix` with value semantics
//! - `activation`, `cost`, `initialization`, `regularization`: pluggable strategies
//! - `network`: forward pass and backpropagation
//! - `trainer`: the SGD loop
//! - `data`: datasets, lockstep shuffling and mini-batching
//! - `persistence`: text model files
//! - `config`: JSON training configuration
//! - `error`: recoverable error types

pub mod activation;
pub mod algebra;
pub mod config;
pub mod cost;
pub mod data;
pub mod error;
pub mod initialization;
pub mod network;
pub mod persistence;
pub mod regularization;
pub mod trainer;

pub use algebra::{Matrix, Vector};
pub use network::{ForwardTrace, Gradients, NeuralNetwork};
pub use trainer::{Trainer, TrainingOptions};
