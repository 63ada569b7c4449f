//! Trains tiny networks to add two numbers.

use backprop::computation::{identity, identity_prime};
use backprop::error::Result;
use backprop::layers::DenseLayer;
use backprop::network::Network;
use backprop::random::UniformSource;
use backprop::trainer::{Logging, StopCondition, Trainer};

use rand::distributions::{IndependentSample, Range};

type Example = (Vec<f64>, Vec<f64>);

fn generate_examples<F>(num_examples: usize, target: F) -> Vec<Example>
where
    F: Fn(f64, f64) -> f64,
{
    let mut rng = rand::thread_rng();
    let range = Range::new(-50, 51);

    let mut data = Vec::with_capacity(num_examples);
    for _ in 0..num_examples {
        let x0 = range.ind_sample(&mut rng) as f64;
        let x1 = range.ind_sample(&mut rng) as f64;
        data.push((vec![x0, x1], vec![target(x0, x1)]));
    }
    data
}

fn train_task(name: &str, target: fn(f64, f64) -> f64) -> Result<()> {
    println!("Learning {}", name);

    let mut network = Network::new(2)?;
    network.add_layer(DenseLayer::new(
        1,
        identity,
        identity_prime,
        Box::new(UniformSource::new()),
    )?)?;

    let network = Trainer::new(network)
        .learning_rate(0.0001)
        .logging(Logging::Iterations(1))
        .stop_condition(StopCondition::Iterations(10))
        .train(&generate_examples(10_000, target))?;

    let layer = network.layer(1);
    println!("Learned weights: {:?}", layer.get_weights()?);
    println!("Learned bias: {:?}", layer.bias());
    println!();
    Ok(())
}

fn main() -> Result<()> {
    // Converges to weights near [1, 1] and bias near 0.
    train_task("x0 + x1", |x0, x1| x0 + x1)?;
    // An affine target; not expected to recover the exact coefficients.
    train_task("0.5 * x0 + x1 + 1", |x0, x1| 0.5 * x0 + x1 + 1.0)?;
    Ok(())
}
