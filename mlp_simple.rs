use feedforward_nn::config::{load_config, TrainingConfig};
use feedforward_nn::data::Dataset;
use feedforward_nn::persistence::{load_network, save_network};
use feedforward_nn::{Matrix, NeuralNetwork, Trainer, Vector};
use log::{error, info};
use std::cell::RefCell;
use std::env;
use std::process;
use std::rc::Rc;

// Small MLP learning XOR (educational example).
//
// Usage: mlp_simple [config.json] [model-output-path]
const DEFAULT_CONFIG: &str = "config/xor.json";
const DEFAULT_MODEL: &str = "xor_model.dat";

// XOR dataset (binary inputs and expected outputs).
fn xor_dataset() -> Dataset {
    let inputs = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let targets = [0.0, 1.0, 1.0, 0.0];
    Dataset::new(
        inputs.iter().map(|x| Vector::new(x.to_vec())).collect(),
        targets.iter().map(|&y| Vector::new(vec![y])).collect(),
    )
}

fn config_from_args(args: &[String]) -> TrainingConfig {
    let path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CONFIG);
    load_config(path).unwrap_or_else(|err| {
        error!("could not load {path}: {err}");
        process::exit(1);
    })
}

// Print the prediction for every XOR sample.
fn report(network: &NeuralNetwork, data: &Dataset) {
    let outputs = network.predict(&Matrix::from_columns(data.inputs()));
    for ((input, target), output) in data.inputs().iter().zip(data.targets()).zip(outputs.columns()) {
        println!(
            "Input: {:.1}, {:.1}, Expected Output: {:.1}, Predicted Output: {:.3}",
            input.get(0),
            input.get(1),
            target.get(0),
            output.get(0)
        );
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = config_from_args(&args);
    let model_path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_MODEL);

    let mut rng = config.rng();
    let network = Rc::new(RefCell::new(config.build_network(&mut rng)));
    let data = xor_dataset();

    let mut trainer = Trainer::new(
        Rc::clone(&network),
        config.cost.build(),
        config.regularization.build(),
        data.clone(),
    )
    .with_test_data(data.clone())
    .with_rng(rng);

    let before = trainer.evaluate(&data);
    info!("initial cost {:.6}", before.cost);
    trainer.train(&config.training_options());
    let after = trainer.evaluate(&data);
    info!("final cost {:.6}, {}/{} correct", after.cost, after.correct, after.total);

    println!("\nTesting the trained network:");
    report(&network.borrow(), &data);

    if let Err(err) = save_network(model_path, &network.borrow()) {
        error!("could not save model to {model_path}: {err}");
        process::exit(1);
    }
    match load_network(model_path) {
        Ok(reloaded) => {
            println!("\nReloaded from {model_path}:");
            report(&reloaded, &data);
        }
        Err(err) => {
            error!("could not reload model from {model_path}: {err}");
            process::exit(1);
        }
    }
}
