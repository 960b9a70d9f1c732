use super::{NeuronId, SynapseId};
use crate::Innovation;

use serde::{Deserialize, Serialize};

use std::fmt;

/// A Gene is an entry in a genome's gene sequence.
///
/// Genes are either neurons or synapses; the variant
/// carries the gene's identity and innovation number,
/// while the gene data itself lives in the genome's
/// neuron and synapse tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gene {
    Neuron {
        id: NeuronId,
        innovation: Innovation,
    },
    Synapse {
        id: SynapseId,
        innovation: Innovation,
    },
}

/// The kind of a [`Gene`], without its identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneKind {
    Neuron,
    Synapse,
}

impl Gene {
    /// Returns the gene's innovation number.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{Gene, NeuronId};
    ///
    /// let gene = Gene::Neuron { id: NeuronId(3), innovation: 8 };
    ///
    /// assert_eq!(gene.innovation(), 8);
    /// ```
    pub fn innovation(&self) -> Innovation {
        match self {
            Gene::Neuron { innovation, .. } | Gene::Synapse { innovation, .. } => *innovation,
        }
    }

    pub fn kind(&self) -> GeneKind {
        match self {
            Gene::Neuron { .. } => GeneKind::Neuron,
            Gene::Synapse { .. } => GeneKind::Synapse,
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gene::Neuron { id, innovation } => write!(f, "{}#{}", id, innovation),
            Gene::Synapse { id, innovation } => write!(f, "{}#{}", id, innovation),
        }
    }
}
