use super::{IdAllocator, Neuron, NeuronId, SynapseId};
use crate::rng::RandomSource;
use crate::Innovation;

use serde::{Deserialize, Serialize};

use std::fmt;

/// Synapses are weighted, directed connections
/// between two neurons of a genome.
///
/// Synapses are never removed from a genome. Disabling
/// one keeps its innovation number around so that later
/// crossovers can still line it up with its counterparts.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Synapse {
    id: SynapseId,
    input: NeuronId,
    output: NeuronId,
    weight: f64,
    enabled: bool,
    innovation: Innovation,
}

impl Synapse {
    /// Returns a new _enabled_ synapse with the specified parameters.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{NeuronId, Synapse, SynapseId};
    ///
    /// let synapse = Synapse::new(SynapseId(42), NeuronId(3), NeuronId(9), 2.0, 17);
    ///
    /// assert_eq!(synapse.input(), NeuronId(3));
    /// assert_eq!(synapse.output(), NeuronId(9));
    /// assert!(synapse.enabled());
    /// ```
    pub fn new(
        id: SynapseId,
        input: NeuronId,
        output: NeuronId,
        weight: f64,
        innovation: Innovation,
    ) -> Synapse {
        Synapse {
            id,
            input,
            output,
            weight,
            enabled: true,
            innovation,
        }
    }

    /// Returns a new enabled synapse of weight `1.0` between
    /// `input` and `output`, with a fresh identity and
    /// innovation number drawn from `ids`.
    pub fn connect(input: &Neuron, output: &Neuron, ids: &IdAllocator) -> Synapse {
        Synapse::new(
            ids.synapse_id(),
            input.id(),
            output.id(),
            1.0,
            ids.next_innovation(),
        )
    }

    /// Replaces the weight with a value drawn uniformly
    /// from `[-bound, bound)`. The previous weight plays
    /// no part in the new one.
    ///
    /// # Examples
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use toponeat::genomics::{NeuronId, Synapse, SynapseId};
    /// use toponeat::UniformSource;
    ///
    /// let mut synapse = Synapse::new(SynapseId(1), NeuronId(1), NeuronId(2), 1.0, 1);
    /// let mut rng = UniformSource::new(StdRng::seed_from_u64(3));
    ///
    /// synapse.resample_weight(5.0, &mut rng);
    ///
    /// assert!(synapse.weight().abs() <= 5.0);
    /// ```
    pub fn resample_weight(&mut self, bound: f64, rng: &mut impl RandomSource) {
        self.weight = 2.0 * (rng.next_f64() - 0.5) * bound;
    }

    /// Flips the synapse's enabled flag.
    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn id(&self) -> SynapseId {
        self.id
    }

    /// Returns the id of the neuron the signal comes from.
    pub fn input(&self) -> NeuronId {
        self.input
    }

    /// Returns the id of the neuron the signal goes to.
    pub fn output(&self) -> NeuronId {
        self.output
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns the synapse's innovation number.
    pub fn innovation(&self) -> Innovation {
        self.innovation
    }
}

impl fmt::Display for Synapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}#{}[{}->{}, {:.3}]{}",
            if self.enabled { "" } else { "(" },
            self.id,
            self.innovation,
            self.input,
            self.output,
            self.weight,
            if self.enabled { "" } else { ")" },
        )
    }
}
