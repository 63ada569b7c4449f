//! Pure activation and loss functions.
//!
//! Layers and trainers take these as plain function values, so any function
//! with a matching signature can be substituted. Activations operate
//! element-wise and return a vector of the same length as their input; the
//! vector losses take the expected values first and the computed values
//! second, and check that both operands share one shape.

use itertools::multizip;

use crate::error::{Error, Result};

/// The type of an element-wise activation function, or its derivative.
pub type Activation = fn(&[f64]) -> Vec<f64>;

/// The type of a vector loss function, or its derivative. Called as
/// `f(expected, actual)`.
pub type LossFunction = fn(&[f64], &[f64]) -> Result<Vec<f64>>;

/// Returns the input unchanged.
pub fn identity(x: &[f64]) -> Vec<f64> {
    x.to_vec()
}

/// Derivative of [`identity`]: one everywhere.
pub fn identity_prime(x: &[f64]) -> Vec<f64> {
    vec![1.0; x.len()]
}

/// [Rectified Linear Unit](https://en.wikipedia.org/wiki/Rectifier_(neural_networks)).
pub fn relu(x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| if v > 0.0 { v } else { 0.0 }).collect()
}

/// Derivative of [`relu`].
pub fn relu_prime(x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| if v > 0.0 { 1.0 } else { 0.0 }).collect()
}

/// L1 loss of a single estimate: the absolute difference.
pub fn l1_loss(x: f64, y: f64) -> f64 {
    (x - y).abs()
}

/// L2 loss of a single estimate: the squared difference.
pub fn l2(x: f64, y: f64) -> f64 {
    (x - y) * (x - y)
}

/// Element-wise quadratic loss, `0.5 * (expected - actual)^2`.
pub fn quadratic_loss(expected: &[f64], actual: &[f64]) -> Result<Vec<f64>> {
    check_shapes(expected, actual)?;
    Ok(multizip((expected, actual))
        .map(|(&e, &a)| 0.5 * (e - a) * (e - a))
        .collect())
}

/// Derivative of [`quadratic_loss`] with respect to the computed values,
/// negated: `expected - actual`. The sign convention means a gradient step
/// adds `alpha * delta` directly instead of subtracting it.
pub fn delta_quadratic_loss(expected: &[f64], actual: &[f64]) -> Result<Vec<f64>> {
    check_shapes(expected, actual)?;
    Ok(multizip((expected, actual)).map(|(&e, &a)| e - a).collect())
}

/// Vectorized derivative of the L1 loss, with the same sign convention as
/// [`delta_quadratic_loss`]: the sign of `expected - actual`.
pub fn delta_l1_loss(expected: &[f64], actual: &[f64]) -> Result<Vec<f64>> {
    check_shapes(expected, actual)?;
    Ok(multizip((expected, actual))
        .map(|(&e, &a)| {
            if e > a {
                1.0
            } else if e < a {
                -1.0
            } else {
                0.0
            }
        })
        .collect())
}

/// Mean squared error over a full output vector.
pub fn quadratic_cost(expected: &[f64], actual: &[f64]) -> Result<f64> {
    check_shapes(expected, actual)?;
    let total: f64 = multizip((expected, actual))
        .map(|(&e, &a)| (e - a) * (e - a))
        .sum();
    Ok(total / expected.len() as f64)
}

fn check_shapes(expected: &[f64], actual: &[f64]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(Error::ShapeMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    Ok(())
}
