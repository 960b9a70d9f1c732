use super::ConfigError;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// An ActivationType names one of the built-in
/// activation functions.
///
/// Any `Fn(f64) -> f64` can drive propagation; these
/// are the ones selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationType {
    // exp(x) / (exp(x) + 1)
    #[default]
    Sigmoid,
    // x / (1 + |x|)
    FastSigmoid,
    // max(0, x)
    Rectifier,
    // x
    Identity,
}

impl ActivationType {
    pub const ALL: [ActivationType; 4] = [
        ActivationType::Sigmoid,
        ActivationType::FastSigmoid,
        ActivationType::Rectifier,
        ActivationType::Identity,
    ];

    /// Returns the activation function as a plain
    /// function pointer.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::ActivationType;
    ///
    /// let f = ActivationType::Rectifier.function();
    /// assert_eq!(f(-3.0), 0.0);
    /// assert_eq!(f(2.0), 2.0);
    /// ```
    pub fn function(self) -> fn(f64) -> f64 {
        match self {
            ActivationType::Sigmoid => sigmoid,
            ActivationType::FastSigmoid => fast_sigmoid,
            ActivationType::Rectifier => rectifier,
            ActivationType::Identity => identity,
        }
    }

    /// Applies the activation function to `x`.
    pub fn activate(self, x: f64) -> f64 {
        (self.function())(x)
    }

    pub fn name(self) -> &'static str {
        match self {
            ActivationType::Sigmoid => "Sigmoid",
            ActivationType::FastSigmoid => "FastSigmoid",
            ActivationType::Rectifier => "Rectifier",
            ActivationType::Identity => "Identity",
        }
    }
}

impl FromStr for ActivationType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivationType::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| ConfigError::UnknownActivation(s.to_string()))
    }
}

impl fmt::Display for ActivationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Same as exp(x) / (exp(x) + 1), without overflowing for large x.
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn fast_sigmoid(x: f64) -> f64 {
    x / (1.0 + x.abs())
}

fn rectifier(x: f64) -> f64 {
    x.max(0.0)
}

fn identity(x: f64) -> f64 {
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_values() {
        let f = ActivationType::Sigmoid.function();
        assert_eq!(f(0.0), 0.5);
        assert!(f(10.0) > 0.99);
        assert!(f(-10.0) < 0.01);
    }

    #[test]
    fn sigmoid_saturates() {
        let sigmoid = ActivationType::Sigmoid;
        assert_eq!(sigmoid.activate(1000.0), 1.0);
        assert_eq!(sigmoid.activate(-1000.0), 0.0);
        for x in [-800.0, -710.0, 709.0, 710.0, 800.0, f64::MAX] {
            assert!(sigmoid.activate(x).is_finite(), "sigmoid({}) is not finite", x);
        }
    }

    #[test]
    fn activate_matches_function() {
        for activation in ActivationType::ALL {
            let f = activation.function();
            for x in [-2.5, -1.0, 0.0, 0.3, 4.0] {
                assert_eq!(activation.activate(x), f(x));
            }
        }
    }

    #[test]
    fn default_is_sigmoid() {
        assert_eq!(ActivationType::default(), ActivationType::Sigmoid);
    }

    #[test]
    fn fast_sigmoid_values() {
        let f = ActivationType::FastSigmoid.function();
        assert_eq!(f(1.0), 0.5);
        assert_eq!(f(-3.0), -0.75);
    }

    #[test]
    fn names_round_trip() {
        for activation in ActivationType::ALL {
            assert_eq!(activation.name().parse::<ActivationType>(), Ok(activation));
        }
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            "Tanh".parse::<ActivationType>(),
            Err(ConfigError::UnknownActivation("Tanh".into()))
        );
    }
}
