//! A minimal feedforward neural network engine.
//!
//! Networks are ordered stacks of [layers](crate::layers) evaluated front
//! to back, and are trained one example at a time by
//! [backpropagation](crate::backpropagation). Activation and loss
//! functions are plain function values supplied by the caller, and weight
//! initialization draws from an injected [random
//! source](crate::random::RandomSource), so every computation can be made
//! fully deterministic.
//!
//! # Example
//!
//! Build a two-input network with a single identity neuron and evaluate
//! it:
//!
//! ```
//! use backprop::computation::{identity, identity_prime};
//! use backprop::layers::DenseLayer;
//! use backprop::network::Network;
//! use backprop::random::ScriptedSource;
//!
//! // Scripted draws of 100.0 scale down to weights of exactly 1.0.
//! let source = ScriptedSource::new(vec![100.0, 100.0]);
//! let layer = DenseLayer::new(1, identity, identity_prime, Box::new(source)).unwrap();
//!
//! let mut network = Network::new(2).unwrap();
//! network.add_layer(layer).unwrap();
//!
//! let result = network.compute(&[3.0, 4.0]).unwrap();
//! assert_eq!(result.output, vec![7.0]);
//! ```

pub mod backpropagation;
pub mod computation;
pub mod error;
pub mod layers;
pub mod matrix;
pub mod network;
pub mod random;
pub mod trainer;
