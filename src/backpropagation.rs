//! The backpropagation training algorithm.
//!
//! One [`train`](Backpropagation::train) call performs a full forward pass,
//! then walks the recorded per-layer results in reverse, propagating the
//! error signal through the chain rule and mutating each layer's bias and
//! the one-step-lagged layer's weights as it goes.

use itertools::multizip;

use crate::computation::LossFunction;
use crate::error::{Error, Result};
use crate::matrix::Mat;
use crate::network::Network;

/// Performs single-example gradient descent steps over a borrowed network.
///
/// The network is borrowed mutably for the lifetime of this value, so a
/// network can never be trained from two call sites at once. Holds no
/// per-example state: everything intermediate is local to one `train`
/// call.
#[derive(Debug)]
pub struct Backpropagation<'a> {
    network: &'a mut Network,
    loss: LossFunction,
    loss_delta: LossFunction,
    alpha: f64,
}

impl<'a> Backpropagation<'a> {
    /// Creates a training environment over `network`.
    ///
    /// `loss` and `loss_delta` are the loss function and its derivative
    /// with respect to the network output, both called expected-first.
    /// The learning rate `alpha` must be positive.
    pub fn new(
        network: &'a mut Network,
        loss: LossFunction,
        loss_delta: LossFunction,
        alpha: f64,
    ) -> Result<Self> {
        if alpha <= 0.0 {
            return Err(Error::InvalidConstruction(
                "the learning rate must be positive",
            ));
        }
        Ok(Backpropagation {
            network,
            loss,
            loss_delta,
            alpha,
        })
    }

    /// Performs one gradient step for the example `(x, y)` and returns the
    /// loss of the prediction. The loss plays no part in the update; it is
    /// returned for the caller's bookkeeping.
    ///
    /// A failure part-way through the backward walk leaves the updates of
    /// already-visited layers in place; treat the network as unverified
    /// after an error.
    pub fn train(&mut self, x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
        let result = self.network.compute(x)?;

        // Seed the backward walk with the error signal at the output
        // layer: the rate of change of the loss times the rate of change
        // of the activation.
        let delta_loss = (self.loss_delta)(y, &result.output)?;
        let last = result.results.len() - 1;
        let mut delta_next = elementwise(
            &delta_loss,
            &self
                .network
                .layer(last)
                .activation_prime(&result.results[last].weighted_output),
        );

        // The most recently visited (shallower) layer, if any.
        let mut visited: Option<usize> = None;

        for (index, layer_result) in result.results.iter().enumerate().rev() {
            // The error signal at this layer.
            let prime = self
                .network
                .layer(index)
                .activation_prime(&layer_result.weighted_output);
            let delta_layer = elementwise(&delta_next, &prime);

            // The rate of change with respect to the bias is the error at
            // the layer. A no-op on the input layer.
            let bias_delta: Vec<f64> = delta_layer.iter().map(|d| self.alpha * d).collect();
            self.network.layer_mut(index).update_bias(&bias_delta)?;

            // The weight gradient of the previously visited layer depends
            // on this layer's output (that layer's input), so its update
            // lags the walk by one step.
            if let Some(previous) = visited {
                let scale = self.alpha * inner(&layer_result.output, &delta_next);
                let (rows, cols) = {
                    let weights = self.network.layer(previous).get_weights()?;
                    (weights.rows(), weights.cols())
                };
                self.network
                    .layer_mut(previous)
                    .update_weights(&Mat::filled(rows, cols, scale))?;
            }

            // Precompute the error to propagate one layer further back.
            delta_next = self
                .network
                .layer(index)
                .get_weights()?
                .transpose_dot(&delta_layer)?;
            visited = Some(index);
        }

        (self.loss)(y, &result.output)
    }
}

fn elementwise(left: &[f64], right: &[f64]) -> Vec<f64> {
    multizip((left, right)).map(|(&l, &r)| l * r).collect()
}

fn inner(left: &[f64], right: &[f64]) -> f64 {
    multizip((left, right)).map(|(&l, &r)| l * r).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::computation::{
        delta_quadratic_loss, identity, identity_prime, quadratic_loss, relu, relu_prime,
    };
    use crate::layers::DenseLayer;
    use crate::random::ScriptedSource;

    fn dense(
        neuron_count: usize,
        activation: crate::computation::Activation,
        activation_prime: crate::computation::Activation,
        values: Vec<f64>,
    ) -> DenseLayer {
        DenseLayer::new(
            neuron_count,
            activation,
            activation_prime,
            Box::new(ScriptedSource::new(values)),
        )
        .unwrap()
    }

    /// A single identity neuron over two inputs, with weights [w, w] and
    /// zero bias.
    fn adder_network(initial_weight: f64) -> Network {
        let mut network = Network::new(2).unwrap();
        let scripted = vec![initial_weight * 100.0, initial_weight * 100.0];
        network
            .add_layer(dense(1, identity, identity_prime, scripted))
            .unwrap();
        network
    }

    #[test]
    fn rejects_non_positive_learning_rate() {
        let mut network = Network::new(1).unwrap();
        for &alpha in &[0.0, -0.5] {
            assert!(Backpropagation::new(
                &mut network,
                quadratic_loss,
                delta_quadratic_loss,
                alpha
            )
            .is_err());
        }
    }

    #[test]
    fn reference_losses_decrease_as_recorded() {
        // Two ReLU layers with scripted weights 0.1..0.9; three training
        // steps on the same example must replay the recorded loss
        // sequence.
        let mut network = Network::new(2).unwrap();
        network
            .add_layer(dense(
                3,
                relu,
                relu_prime,
                vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
            ))
            .unwrap();
        network
            .add_layer(dense(1, relu, relu_prime, vec![0.7, 0.8, 0.9]))
            .unwrap();

        let mut backpropagation =
            Backpropagation::new(&mut network, quadratic_loss, delta_quadratic_loss, 0.001)
                .unwrap();

        for &expected in &[6048.816458, 6036.160353, 6023.077231] {
            let loss = backpropagation
                .train(&[10.0, 100.0], &[110.0])
                .unwrap();
            assert_eq!(loss.len(), 1);
            assert!(
                (loss[0] - expected).abs() < 1e-5,
                "loss {} != expected {}",
                loss[0],
                expected
            );
        }
    }

    #[test]
    fn training_a_bare_network_is_a_noop() {
        let mut network = Network::new(2).unwrap();
        let mut backpropagation =
            Backpropagation::new(&mut network, quadratic_loss, delta_quadratic_loss, 0.5)
                .unwrap();
        // No weights to update; the loss is computed on the raw input.
        let loss = backpropagation.train(&[1.0, 2.0], &[3.0, 2.0]).unwrap();
        assert_eq!(loss, vec![2.0, 0.0]);
        let repeat = backpropagation.train(&[1.0, 2.0], &[3.0, 2.0]).unwrap();
        assert_eq!(repeat, vec![2.0, 0.0]);
    }

    #[test]
    fn propagates_loss_shape_mismatch() {
        let mut network = adder_network(1.0);
        let mut backpropagation =
            Backpropagation::new(&mut network, quadratic_loss, delta_quadratic_loss, 0.001)
                .unwrap();
        assert_eq!(
            backpropagation.train(&[1.0, 2.0], &[3.0, 4.0]),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn a_network_at_the_optimum_stays_there() {
        let mut network = adder_network(1.0);
        {
            let mut backpropagation = Backpropagation::new(
                &mut network,
                quadratic_loss,
                delta_quadratic_loss,
                0.001,
            )
            .unwrap();
            for _ in 0..10 {
                let loss = backpropagation.train(&[3.0, 4.0], &[7.0]).unwrap();
                assert_eq!(loss, vec![0.0]);
            }
        }
        let weights = network.layer(1).get_weights().unwrap();
        assert_eq!(weights.get(0, 0), 1.0);
        assert_eq!(weights.get(0, 1), 1.0);
        assert_eq!(network.layer(1).bias(), &[0.0]);
    }

    #[test]
    fn learns_to_add_two_numbers() {
        // Start from small symmetric weights and train on x0 + x1.
        let mut network = adder_network(0.005);
        let examples: &[(f64, f64)] = &[
            (3.0, 4.0),
            (-2.0, 5.0),
            (7.0, -1.0),
            (1.0, 1.0),
            (-4.0, -3.0),
            (6.0, 2.0),
            (0.0, 5.0),
            (-7.0, 8.0),
        ];

        let mut final_loss = vec![f64::INFINITY];
        {
            let mut backpropagation = Backpropagation::new(
                &mut network,
                quadratic_loss,
                delta_quadratic_loss,
                0.002,
            )
            .unwrap();
            for _ in 0..1000 {
                for &(x0, x1) in examples {
                    final_loss = backpropagation
                        .train(&[x0, x1], &[x0 + x1])
                        .unwrap();
                }
            }
        }

        let weights = network.layer(1).get_weights().unwrap();
        assert!((weights.get(0, 0) - 1.0).abs() < 1e-4);
        assert!((weights.get(0, 1) - 1.0).abs() < 1e-4);
        assert!(network.layer(1).bias()[0].abs() < 1e-3);
        assert!(final_loss[0] < 1e-8);
    }
}
