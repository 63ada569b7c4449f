use crate::error::{Error, Result};
use crate::layers::{Layer, LayerResult};
use crate::matrix::Mat;

/// The identity pass-through stage at the front of every network.
///
/// Exists so the forward and backward walks can treat all layers
/// uniformly: it computes the identity, its weight matrix reads as the
/// identity, its activation derivative is zero, and bias updates are
/// accepted no-ops. It has no predecessor, so assigning weights to it is a
/// wiring mistake and fails.
#[derive(Clone, Debug)]
pub struct InputLayer {
    neuron_count: usize,
    weights: Mat,
    bias: Vec<f64>,
}

impl InputLayer {
    pub fn new(input_count: usize) -> Result<Self> {
        if input_count == 0 {
            return Err(Error::InvalidConstruction(
                "an input layer needs at least one input",
            ));
        }
        Ok(InputLayer {
            neuron_count: input_count,
            weights: Mat::identity(input_count),
            bias: vec![0.0; input_count],
        })
    }
}

impl Layer for InputLayer {
    fn neuron_count(&self) -> usize {
        self.neuron_count
    }

    fn add_weights(&mut self, _input_count: usize) -> Result<()> {
        Err(Error::UnsupportedOperation(
            "an input layer cannot be given weights",
        ))
    }

    fn get_weights(&self) -> Result<&Mat> {
        Ok(&self.weights)
    }

    fn update_weights(&mut self, _delta: &Mat) -> Result<()> {
        Err(Error::UnsupportedOperation(
            "an input layer has no weights to update",
        ))
    }

    fn update_bias(&mut self, _delta: &[f64]) -> Result<()> {
        // Accepted so the backward walk can visit every layer uniformly.
        // Never alters the layer's forward behavior.
        Ok(())
    }

    fn bias(&self) -> &[f64] {
        &self.bias
    }

    fn activation_prime(&self, weighted: &[f64]) -> Vec<f64> {
        vec![0.0; weighted.len()]
    }

    fn compute(&self, input: &[f64]) -> Result<LayerResult> {
        if input.len() != self.neuron_count {
            return Err(Error::ShapeMismatch {
                expected: self.neuron_count,
                actual: input.len(),
            });
        }
        Ok(LayerResult {
            weighted_output: input.to_vec(),
            output: input.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_width() {
        assert!(InputLayer::new(0).is_err());
    }

    #[test]
    fn computes_the_identity() {
        let layer = InputLayer::new(3).unwrap();
        let result = layer.compute(&[1.0, -2.0, 3.0]).unwrap();
        assert_eq!(result.weighted_output, vec![1.0, -2.0, 3.0]);
        assert_eq!(result.output, vec![1.0, -2.0, 3.0]);
    }

    #[test]
    fn rejects_mismatched_input() {
        let layer = InputLayer::new(3).unwrap();
        assert_eq!(
            layer.compute(&[1.0, 2.0]),
            Err(Error::ShapeMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn add_weights_always_fails() {
        let mut layer = InputLayer::new(2).unwrap();
        for width in &[0, 1, 2, 100] {
            assert_eq!(
                layer.add_weights(*width),
                Err(Error::UnsupportedOperation(
                    "an input layer cannot be given weights"
                ))
            );
        }
    }

    #[test]
    fn update_weights_always_fails() {
        let mut layer = InputLayer::new(2).unwrap();
        let delta = Mat::zeros(2, 2);
        assert!(layer.update_weights(&delta).is_err());
    }

    #[test]
    fn weights_read_as_the_identity() {
        let layer = InputLayer::new(2).unwrap();
        assert_eq!(layer.get_weights(), Ok(&Mat::identity(2)));
    }

    #[test]
    fn bias_update_is_an_accepted_noop() {
        let mut layer = InputLayer::new(2).unwrap();
        assert_eq!(layer.update_bias(&[5.0, 5.0]), Ok(()));
        // Forward behavior is unchanged.
        let result = layer.compute(&[1.0, 2.0]).unwrap();
        assert_eq!(result.output, vec![1.0, 2.0]);
        assert_eq!(layer.bias(), &[0.0, 0.0]);
    }

    #[test]
    fn activation_prime_is_zero() {
        let layer = InputLayer::new(2).unwrap();
        assert_eq!(layer.activation_prime(&[3.0, -4.0]), vec![0.0, 0.0]);
    }
}
