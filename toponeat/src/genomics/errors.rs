use super::{NeuronId, SynapseId};
use crate::Innovation;

use thiserror::Error;

/// Errors returned by genome operations.
///
/// All variants but [`Corrupted`] are caused by the
/// caller and leave the genome untouched. [`Corrupted`]
/// signals a broken internal invariant: the genome
/// involved should be discarded, but other genomes
/// are unaffected.
///
/// [`Corrupted`]: GenomeError::Corrupted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenomeError {
    #[error("no neuron with id {0} in genome")]
    NeuronNotFound(NeuronId),
    #[error("no synapse with id {0} in genome")]
    SynapseNotFound(SynapseId),
    #[error("duplicate neuron insertion with id {0}")]
    DuplicateNeuron(NeuronId),
    #[error("duplicate synapse insertion with id {0}")]
    DuplicateSynapse(SynapseId),
    #[error("synapse {synapse} insertion between nonexistant endpoint {neuron}")]
    MissingEndpoint { synapse: SynapseId, neuron: NeuronId },
    #[error("gene insertion with innovation {innovation} after innovation {last}")]
    InnovationOutOfOrder { innovation: Innovation, last: Innovation },
    #[error("expected {expected} inputs, got {actual}")]
    InputArityMismatch { expected: usize, actual: usize },
    #[error(
        "mating genomes with {first_sensors}/{first_outputs} and \
        {second_sensors}/{second_outputs} sensors/outputs"
    )]
    ArityMismatch {
        first_sensors: usize,
        first_outputs: usize,
        second_sensors: usize,
        second_outputs: usize,
    },
    #[error("corrupted genome state: {0}")]
    Corrupted(#[from] InvariantViolation),
}

impl GenomeError {
    /// Returns `true` if the error reports a broken
    /// internal invariant rather than bad input.
    pub fn is_corruption(&self) -> bool {
        matches!(self, GenomeError::Corrupted(_))
    }
}

/// Internal invariant breaches. These cannot be caused
/// by any sequence of public calls on a valid genome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("neuron {0} dequeued after it was already visited")]
    RevisitedNeuron(NeuronId),
    #[error("crossover cursors exhausted at {first}/{second} before the end of their genes")]
    CursorsExhausted { first: usize, second: usize },
    #[error("neuron {0} is referenced but not registered")]
    MissingNeuron(NeuronId),
    #[error("synapse {0} is referenced but not registered")]
    MissingSynapse(SynapseId),
}

/// Errors found while validating configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be in the range [0, 1], got {value}")]
    IllegalProbability { field: &'static str, value: f64 },
    #[error("synapse_weight_bound must be larger than zero, got {0}")]
    NonPositiveWeightBound(f64),
    #[error("{field} must not be negative, got {value}")]
    NegativeCoefficient { field: &'static str, value: f64 },
    #[error("unregistered activation function: {0}")]
    UnknownActivation(String),
}
