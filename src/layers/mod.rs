//! Network layers.

pub use self::dense::{DenseLayer, DEFAULT_WEIGHT_SCALE};
pub use self::input::InputLayer;

mod dense;
mod input;

use std::fmt;

use crate::error::Result;
use crate::matrix::Mat;

/// One computational stage of a feedforward network.
///
/// The trait covers the closed set of layer kinds ([`InputLayer`] and
/// [`DenseLayer`]) and is deliberately uniform: every operation the
/// backward pass performs is defined on every layer, so the training walk
/// needs no special cases. Operations that make no sense for a given kind
/// fail with `UnsupportedOperation`.
pub trait Layer: fmt::Debug {
    /// The number of output units of this layer.
    fn neuron_count(&self) -> usize;

    /// Sizes this layer's weight matrix against the output width of the
    /// preceding layer. Called by the owning network at insertion time.
    fn add_weights(&mut self, input_count: usize) -> Result<()>;

    /// Returns the current weight matrix.
    fn get_weights(&self) -> Result<&Mat>;

    /// Adds `delta` (same shape as the weights) to the weights in place.
    fn update_weights(&mut self, delta: &Mat) -> Result<()>;

    /// Adds `delta` (length [`neuron_count`](Layer::neuron_count)) to the
    /// bias in place.
    fn update_bias(&mut self, delta: &[f64]) -> Result<()>;

    /// Returns the current bias vector.
    fn bias(&self) -> &[f64];

    /// Evaluates the derivative of this layer's activation function,
    /// element-wise over the pre-activation values `weighted`.
    fn activation_prime(&self, weighted: &[f64]) -> Vec<f64>;

    /// Feeds `input` forward through the layer.
    fn compute(&self, input: &[f64]) -> Result<LayerResult>;
}

/// The values produced by one layer during a single forward pass.
///
/// The producing layer is identified by this result's position in the
/// owning [`NetworkResult`](crate::network::NetworkResult), which is its
/// index into the network's layer sequence. Results live only for the
/// duration of one `compute` or `train` call.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerResult {
    /// The pre-activation values, `weights · input + bias`.
    pub weighted_output: Vec<f64>,
    /// The post-activation values fed to the next layer.
    pub output: Vec<f64>,
}
