use super::{ActivationType, ConfigError};

use serde::{Deserialize, Serialize};

/// Configuration data for genome mutation
/// and evaluation.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]; use
/// [`validate`] before handing a configuration
/// read from elsewhere to the engine.
///
/// [`validate`]: OrganismConfig::validate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrganismConfig {
    /// Chance that a synapse is split by a new
    /// hidden neuron during mutation.
    pub synapse_split_chance: f64,
    /// Chance that a synapse's enabled flag is
    /// flipped during mutation.
    pub synapse_toggle_chance: f64,
    /// Chance that a synapse's weight is resampled
    /// during mutation.
    pub synapse_weight_chance: f64,
    /// Resampled weights are drawn uniformly from
    /// `[-synapse_weight_bound, synapse_weight_bound)`.
    pub synapse_weight_bound: f64,
    /// Activation function of every neuron.
    pub activation: ActivationType,
}

/// Inputs of the genetic distance used to group genomes
/// into species:
///
/// `d = (c1 * E + c2 * D) / N + c3 * W`
///
/// with `E` the number of excess genes, `D` the number of
/// disjoint genes, `W` the average weight difference of
/// matching genes and `N` the gene count of the larger genome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    /// `c1`, weight of excess genes.
    pub excess_gene_factor: f64,
    /// `c2`, weight of disjoint genes.
    pub disjoint_gene_factor: f64,
    /// `c3`, weight of the average matching weight difference.
    pub weight_difference_factor: f64,
    /// Maximum distance between two genomes
    /// of the same species.
    pub compatibility_threshold: f64,
}

/// Complete configuration of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeatConfig {
    pub species: SpeciesConfig,
    pub organism: OrganismConfig,
}

impl OrganismConfig {
    /// Returns a "zero-valued" configuration: no mutation
    /// ever fires, the weight bound is `1.0` and neurons
    /// use the identity function.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::OrganismConfig;
    ///
    /// let config = OrganismConfig {
    ///     synapse_split_chance: 0.03,
    ///     ..OrganismConfig::zero()
    /// };
    /// assert!(config.validate().is_ok());
    /// ```
    pub const fn zero() -> OrganismConfig {
        OrganismConfig {
            synapse_split_chance: 0.0,
            synapse_toggle_chance: 0.0,
            synapse_weight_chance: 0.0,
            synapse_weight_bound: 1.0,
            activation: ActivationType::Identity,
        }
    }

    /// Checks that every probability lies in [0, 1]
    /// and that the weight bound is positive.
    ///
    /// # Errors
    /// Returns the first offending field.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::OrganismConfig;
    ///
    /// let config = OrganismConfig {
    ///     synapse_toggle_chance: 1.5,
    ///     ..OrganismConfig::zero()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("synapse_split_chance", self.synapse_split_chance)?;
        check_probability("synapse_toggle_chance", self.synapse_toggle_chance)?;
        check_probability("synapse_weight_chance", self.synapse_weight_chance)?;
        if !(self.synapse_weight_bound > 0.0) {
            return Err(ConfigError::NonPositiveWeightBound(
                self.synapse_weight_bound,
            ));
        }
        Ok(())
    }
}

impl SpeciesConfig {
    /// Returns a configuration with all coefficients
    /// and the threshold set to 0.
    pub const fn zero() -> SpeciesConfig {
        SpeciesConfig {
            excess_gene_factor: 0.0,
            disjoint_gene_factor: 0.0,
            weight_difference_factor: 0.0,
            compatibility_threshold: 0.0,
        }
    }

    /// Checks that no coefficient is negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("excess_gene_factor", self.excess_gene_factor)?;
        check_non_negative("disjoint_gene_factor", self.disjoint_gene_factor)?;
        check_non_negative("weight_difference_factor", self.weight_difference_factor)?;
        check_non_negative("compatibility_threshold", self.compatibility_threshold)
    }
}

impl NeatConfig {
    pub const fn zero() -> NeatConfig {
        NeatConfig {
            species: SpeciesConfig::zero(),
            organism: OrganismConfig::zero(),
        }
    }

    /// Validates both the species and organism sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.species.validate()?;
        self.organism.validate()
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::IllegalProbability { field, value })
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeCoefficient { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_valid() {
        assert_eq!(NeatConfig::zero().validate(), Ok(()));
    }

    #[test]
    fn rejects_probabilities() {
        let config = OrganismConfig {
            synapse_split_chance: -0.1,
            ..OrganismConfig::zero()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::IllegalProbability {
                field: "synapse_split_chance",
                value: -0.1
            })
        );

        let config = OrganismConfig {
            synapse_weight_chance: 1.01,
            ..OrganismConfig::zero()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IllegalProbability {
                field: "synapse_weight_chance",
                ..
            })
        ));

        let config = OrganismConfig {
            synapse_toggle_chance: f64::NAN,
            ..OrganismConfig::zero()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_weight_bound() {
        for bound in [0.0, -1.0, f64::NAN] {
            let config = OrganismConfig {
                synapse_weight_bound: bound,
                ..OrganismConfig::zero()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NonPositiveWeightBound(_))
            ));
        }
    }

    #[test]
    fn rejects_negative_coefficients() {
        let config = NeatConfig {
            species: SpeciesConfig {
                disjoint_gene_factor: -0.2,
                ..SpeciesConfig::zero()
            },
            ..NeatConfig::zero()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeCoefficient {
                field: "disjoint_gene_factor",
                value: -0.2
            })
        );
    }

    #[test]
    fn json_round_trip() {
        let json = r#"{
            "species": {
                "excess_gene_factor": 0.1,
                "disjoint_gene_factor": 0.2,
                "weight_difference_factor": 0.1,
                "compatibility_threshold": 0.5
            },
            "organism": {
                "synapse_split_chance": 0.01,
                "synapse_toggle_chance": 0.01,
                "synapse_weight_chance": 0.01,
                "synapse_weight_bound": 5.0,
                "activation": "FastSigmoid"
            }
        }"#;

        let config: NeatConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.organism.activation, ActivationType::FastSigmoid);
        assert_eq!(config.validate(), Ok(()));

        let again: NeatConfig =
            serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn unknown_activation_is_rejected() {
        let json = r#"{
            "synapse_split_chance": 0.0,
            "synapse_toggle_chance": 0.0,
            "synapse_weight_chance": 0.0,
            "synapse_weight_bound": 1.0,
            "activation": "Recifier"
        }"#;
        assert!(serde_json::from_str::<OrganismConfig>(json).is_err());
    }
}
