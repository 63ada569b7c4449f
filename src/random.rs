//! Injected random-number sources for weight initialization.

use std::collections::VecDeque;
use std::fmt;

use rand::{Rng, ThreadRng};

use crate::error::{Error, Result};

/// A niladic source of floating point values.
///
/// Injected into layers at construction time, so that tests can substitute
/// a deterministic, pre-scripted sequence for the uniform default.
pub trait RandomSource: fmt::Debug {
    /// Returns the next value from the source.
    fn next(&mut self) -> Result<f64>;
}

/// Draws uniformly distributed values in `[0, 1)`. Never fails.
pub struct UniformSource {
    rng: ThreadRng,
}

impl UniformSource {
    pub fn new() -> Self {
        UniformSource {
            rng: rand::thread_rng(),
        }
    }
}

impl RandomSource for UniformSource {
    fn next(&mut self) -> Result<f64> {
        Ok(self.rng.gen::<f64>())
    }
}

impl fmt::Debug for UniformSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("UniformSource")
    }
}

/// Replays a fixed sequence of values, failing once it is drained.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: VecDeque<f64>,
}

impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        ScriptedSource {
            values: values.into(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn next(&mut self) -> Result<f64> {
        self.values.pop_front().ok_or(Error::RandomExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_replays_in_order() {
        let mut source = ScriptedSource::new(vec![0.25, 0.5, 0.75]);
        assert_eq!(source.next(), Ok(0.25));
        assert_eq!(source.next(), Ok(0.5));
        assert_eq!(source.next(), Ok(0.75));
    }

    #[test]
    fn scripted_fails_when_exhausted() {
        let mut source = ScriptedSource::new(vec![0.25]);
        assert!(source.next().is_ok());
        assert_eq!(source.next(), Err(Error::RandomExhausted));
        assert_eq!(source.next(), Err(Error::RandomExhausted));
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut source = UniformSource::new();
        for _ in 0..100 {
            let value = source.next().unwrap();
            assert!(0.0 <= value && value < 1.0);
        }
    }
}
