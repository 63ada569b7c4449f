//! An ordered stack of layers evaluated front to back.

use crate::error::Result;
use crate::layers::{InputLayer, Layer, LayerResult};

/// A feedforward neural network.
///
/// Layer 0 is always an [`InputLayer`]; further layers are appended with
/// [`add_layer`](Network::add_layer), which sizes each new layer's weight
/// matrix against the previous layer's output width at the moment of
/// insertion. There is no removal or reordering.
#[derive(Debug)]
pub struct Network {
    layers: Vec<Box<dyn Layer>>,
}

impl Network {
    /// Creates a network holding a single input layer of the given width.
    pub fn new(input_count: usize) -> Result<Self> {
        let input = InputLayer::new(input_count)?;
        Ok(Network {
            layers: vec![Box::new(input)],
        })
    }

    /// Appends `layer`, wiring its weight shape to the current last
    /// layer's output width. Layers must be added in evaluation order.
    pub fn add_layer<L: Layer + 'static>(&mut self, mut layer: L) -> Result<()> {
        let input_count = self.layers[self.layers.len() - 1].neuron_count();
        layer.add_weights(input_count)?;
        self.layers.push(Box::new(layer));
        Ok(())
    }

    /// Returns the width of the raw input vector.
    pub fn input_len(&self) -> usize {
        self.layers[0].neuron_count()
    }

    /// Returns the width of the final output vector.
    pub fn output_len(&self) -> usize {
        self.layers[self.layers.len() - 1].neuron_count()
    }

    /// Returns the number of layers, input layer included.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Borrows the layer at `index`; index 0 is the input layer.
    pub fn layer(&self, index: usize) -> &dyn Layer {
        self.layers[index].as_ref()
    }

    pub(crate) fn layer_mut(&mut self, index: usize) -> &mut dyn Layer {
        self.layers[index].as_mut()
    }

    /// Forward-evaluates the network, feeding each layer's output to the
    /// next and collecting every layer's result in order.
    ///
    /// Deterministic for fixed weights and biases; randomness only ever
    /// enters at weight initialization.
    pub fn compute(&self, input: &[f64]) -> Result<NetworkResult> {
        let mut results = Vec::with_capacity(self.layers.len());
        let mut intermediate = input.to_vec();
        for layer in &self.layers {
            let result = layer.compute(&intermediate)?;
            intermediate = result.output.clone();
            results.push(result);
        }
        Ok(NetworkResult {
            results,
            output: intermediate,
        })
    }
}

/// The result of a full forward pass: one [`LayerResult`] per layer (input
/// layer first) plus the final output vector, which equals the last
/// result's output. Ephemeral, produced fresh per call.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkResult {
    pub results: Vec<LayerResult>,
    pub output: Vec<f64>,
}
