use crate::computation::Activation;
use crate::error::{Error, Result};
use crate::layers::{Layer, LayerResult};
use crate::matrix::Mat;
use crate::random::RandomSource;

/// The default scale applied to freshly drawn weights.
///
/// Initial weights are `scale * source.next()`, which keeps initial
/// pre-activations small while every row still gets independent values.
/// Override per layer with [`DenseLayer::weight_scale`].
pub const DEFAULT_WEIGHT_SCALE: f64 = 0.01;

/// A fully connected layer: the learnable unit of the network.
///
/// Holds a `(neuron_count × input_count)` weight matrix and a bias vector.
/// The weight matrix is absent until the owning network calls
/// [`add_weights`](Layer::add_weights) with the preceding layer's output
/// width; the bias starts at zero.
#[derive(Debug)]
pub struct DenseLayer {
    neuron_count: usize,
    activation: Activation,
    activation_prime: Activation,
    random: Box<dyn RandomSource>,
    weight_scale: f64,
    weights: Option<Mat>,
    bias: Vec<f64>,
}

impl DenseLayer {
    /// Initializes a new, unwired dense layer.
    ///
    /// Arguments:
    ///
    ///  * `neuron_count` - the number of neurons in the layer.
    ///  * `activation` - the element-wise activation function.
    ///  * `activation_prime` - the exact derivative of `activation`.
    ///  * `random` - the source of initial weight values.
    pub fn new(
        neuron_count: usize,
        activation: Activation,
        activation_prime: Activation,
        random: Box<dyn RandomSource>,
    ) -> Result<Self> {
        if neuron_count == 0 {
            return Err(Error::InvalidConstruction(
                "a dense layer needs at least one neuron",
            ));
        }
        Ok(DenseLayer {
            neuron_count,
            activation,
            activation_prime,
            random,
            weight_scale: DEFAULT_WEIGHT_SCALE,
            weights: None,
            bias: vec![0.0; neuron_count],
        })
    }

    /// Overrides the scale applied to drawn weights during initialization.
    pub fn weight_scale(mut self, scale: f64) -> Self {
        self.weight_scale = scale;
        self
    }
}

impl Layer for DenseLayer {
    fn neuron_count(&self) -> usize {
        self.neuron_count
    }

    fn add_weights(&mut self, input_count: usize) -> Result<()> {
        if input_count == 0 {
            return Err(Error::InvalidConstruction(
                "a dense layer needs at least one input",
            ));
        }
        self.weights = Some(Mat::random(
            self.random.as_mut(),
            self.weight_scale,
            self.neuron_count,
            input_count,
        )?);
        Ok(())
    }

    fn get_weights(&self) -> Result<&Mat> {
        self.weights.as_ref().ok_or(Error::UninitializedWeights)
    }

    fn update_weights(&mut self, delta: &Mat) -> Result<()> {
        let weights = self.weights.as_mut().ok_or(Error::UninitializedWeights)?;
        if delta.rows() != weights.rows() || delta.cols() != weights.cols() {
            return Err(Error::ShapeMismatch {
                expected: weights.rows() * weights.cols(),
                actual: delta.rows() * delta.cols(),
            });
        }
        *weights += delta;
        Ok(())
    }

    fn update_bias(&mut self, delta: &[f64]) -> Result<()> {
        if delta.len() != self.bias.len() {
            return Err(Error::ShapeMismatch {
                expected: self.bias.len(),
                actual: delta.len(),
            });
        }
        for (b, d) in self.bias.iter_mut().zip(delta) {
            *b += d;
        }
        Ok(())
    }

    fn bias(&self) -> &[f64] {
        &self.bias
    }

    fn activation_prime(&self, weighted: &[f64]) -> Vec<f64> {
        (self.activation_prime)(weighted)
    }

    fn compute(&self, input: &[f64]) -> Result<LayerResult> {
        let weights = self.weights.as_ref().ok_or(Error::UninitializedWeights)?;
        let mut weighted_output = weights.dot(input)?;
        for (w, b) in weighted_output.iter_mut().zip(&self.bias) {
            *w += b;
        }
        let output = (self.activation)(&weighted_output);
        Ok(LayerResult {
            weighted_output,
            output,
        })
    }
}
