//! Utilities for driving repeated training steps over a network.

use crate::backpropagation::Backpropagation;
use crate::computation::{delta_quadratic_loss, quadratic_loss, LossFunction};
use crate::error::{Error, Result};
use crate::network::Network;

/// A builder that trains an owned network by online gradient descent.
#[derive(Debug)]
pub struct Trainer {
    network: Network,
    loss: LossFunction,
    loss_delta: LossFunction,
    learning_rate: f64,
    logging: Logging,
    stop_condition: StopCondition,
}

impl Trainer {
    /// Creates a new Trainer instance.
    ///
    /// The trainer is initialized with some default values. These defaults
    /// are:
    ///
    /// * The quadratic loss pair.
    /// * A learning rate of 0.1.
    /// * Stops after 1000 training iterations.
    /// * Logs on training completion.
    pub fn new(network: Network) -> Self {
        Trainer {
            network,
            loss: quadratic_loss,
            loss_delta: delta_quadratic_loss,
            learning_rate: 0.1,
            logging: Logging::Completion,
            stop_condition: StopCondition::Iterations(1000),
        }
    }

    /// Sets the loss function and its derivative, both expected-first.
    pub fn loss(mut self, loss: LossFunction, loss_delta: LossFunction) -> Self {
        self.loss = loss;
        self.loss_delta = loss_delta;
        self
    }

    /// Sets the learning rate to use during gradient descent.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Sets the type of logging to be emitted during training.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Sets the condition to finish training.
    pub fn stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = condition;
        self
    }

    /// Trains the network over the provided labelled data.
    ///
    /// `examples` is a list of `(input, expected output)` pairs. Every
    /// iteration visits each example once, taking a single gradient step
    /// per example. Returns the trained network, or the first error any
    /// step surfaced.
    pub fn train<I, O>(mut self, examples: &[(I, O)]) -> Result<Network>
    where
        I: AsRef<[f64]>,
        O: AsRef<[f64]>,
    {
        self.validate(examples)?;

        let mut backpropagation = Backpropagation::new(
            &mut self.network,
            self.loss,
            self.loss_delta,
            self.learning_rate,
        )?;
        let mut iteration = 0;
        let mut training_error;
        loop {
            training_error = 0.0;
            for (input, expected) in examples {
                let loss = backpropagation.train(input.as_ref(), expected.as_ref())?;
                training_error += mean(&loss);
            }
            training_error /= examples.len() as f64;
            iteration += 1;

            self.logging.iteration(iteration, training_error);
            if self.stop_condition.should_stop(iteration, training_error) {
                break;
            }
        }
        self.logging.completion(iteration, training_error);
        Ok(self.network)
    }

    /// Verifies the examples against the network's widths, returning an
    /// error if something is wrong.
    fn validate<I, O>(&self, examples: &[(I, O)]) -> Result<()>
    where
        I: AsRef<[f64]>,
        O: AsRef<[f64]>,
    {
        if examples.is_empty() {
            return Err(Error::InvalidConstruction(
                "at least one training example is required",
            ));
        }
        for (input, output) in examples {
            if input.as_ref().len() != self.network.input_len() {
                return Err(Error::ShapeMismatch {
                    expected: self.network.input_len(),
                    actual: input.as_ref().len(),
                });
            }
            if output.as_ref().len() != self.network.output_len() {
                return Err(Error::ShapeMismatch {
                    expected: self.network.output_len(),
                    actual: output.as_ref().len(),
                });
            }
        }
        Ok(())
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug)]
pub enum Logging {
    /// No logs will be printed
    Silent,
    /// A summary will be printed at completion
    Completion,
    /// A summary will be printed after every `n` training iterations
    Iterations(usize),
}

impl Logging {
    /// Performs logging at the current `iteration` of training.
    fn iteration(&self, iteration: usize, training_error: f64) {
        use self::Logging::*;
        if let Iterations(freq) = *self {
            if freq > 0 && iteration % freq == 0 {
                println!("Iteration {}:\tloss={}", iteration, training_error);
            }
        }
    }

    /// Performs logging at the end of training.
    fn completion(&self, iterations: usize, training_error: f64) {
        if let Logging::Silent = *self {
            return;
        }
        println!("Training completed after {} iterations.", iterations);
        println!("Final loss: {}", training_error);
    }
}

/// When to stop training
#[derive(Copy, Clone, Debug)]
pub enum StopCondition {
    /// Stops after the provided number of training iterations
    Iterations(usize),
    /// Stops when the training error drops below the provided threshold
    ErrorThreshold(f64),
}

impl StopCondition {
    /// Returns true if training is complete.
    fn should_stop(&self, iteration: usize, training_error: f64) -> bool {
        use self::StopCondition::*;
        match *self {
            Iterations(iterations) => iteration >= iterations,
            ErrorThreshold(threshold) => training_error < threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::computation::{identity, identity_prime};
    use crate::layers::DenseLayer;
    use crate::random::ScriptedSource;

    /// A single identity neuron over two inputs with weights [1, 1].
    fn adder_network() -> Network {
        let mut network = Network::new(2).unwrap();
        network
            .add_layer(
                DenseLayer::new(
                    1,
                    identity,
                    identity_prime,
                    Box::new(ScriptedSource::new(vec![100.0, 100.0])),
                )
                .unwrap(),
            )
            .unwrap();
        network
    }

    #[test]
    fn rejects_empty_examples() {
        let examples: &[(Vec<f64>, Vec<f64>)] = &[];
        assert!(Trainer::new(adder_network())
            .logging(Logging::Silent)
            .train(examples)
            .is_err());
    }

    #[test]
    fn rejects_wrong_input_size() {
        let examples = [(vec![0.0], vec![0.0])];
        assert!(Trainer::new(adder_network())
            .logging(Logging::Silent)
            .train(&examples[..])
            .is_err());
    }

    #[test]
    fn rejects_wrong_output_size() {
        let examples = [(vec![0.0, 0.0], vec![0.0, 0.0])];
        assert!(Trainer::new(adder_network())
            .logging(Logging::Silent)
            .train(&examples[..])
            .is_err());
    }

    #[test]
    fn trains_to_the_error_threshold() {
        let examples = [
            (vec![3.0, 4.0], vec![7.0]),
            (vec![-2.0, 5.0], vec![3.0]),
            (vec![1.0, 1.0], vec![2.0]),
        ];
        // Already at the optimum, so the first iteration hits the
        // threshold and the weights stay put.
        let network = Trainer::new(adder_network())
            .learning_rate(0.001)
            .logging(Logging::Silent)
            .stop_condition(StopCondition::ErrorThreshold(1e-12))
            .train(&examples[..])
            .unwrap();

        let weights = network.layer(1).get_weights().unwrap();
        assert_eq!(weights.get(0, 0), 1.0);
        assert_eq!(weights.get(0, 1), 1.0);
    }
}
