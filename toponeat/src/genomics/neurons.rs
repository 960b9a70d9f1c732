use super::{IdAllocator, NeuronId};
use crate::Innovation;

use serde::{Deserialize, Serialize};

use std::fmt;

/// A NeuronKind indicates the role of
/// a neuron in its genome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeuronKind {
    /// Input neurons, fed by the caller.
    Sensor,
    /// Neurons created by synapse splits.
    Hidden,
    /// Output neurons, read by the caller.
    Output,
}

/// Neurons are the structural elements of genomes
/// between which synapses are created.
///
/// Besides their identity, neurons carry the run-time
/// state used by signal propagation: the current output
/// `value`, the input `sum` for the ongoing step, and the
/// `future` sum collected from recurrent connections,
/// which becomes the starting sum of the next step.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Neuron {
    id: NeuronId,
    kind: NeuronKind,
    innovation: Innovation,
    pub(crate) value: f64,
    pub(crate) sum: f64,
    pub(crate) future: f64,
    #[serde(skip)]
    pub(crate) visited: bool,
    #[serde(skip)]
    pub(crate) seen: bool,
}

impl Neuron {
    /// Returns a new neuron with the specified identity
    /// and cleared state.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{Neuron, NeuronId, NeuronKind};
    ///
    /// let neuron = Neuron::new(NeuronId(5), NeuronKind::Hidden, 12);
    ///
    /// assert_eq!(neuron.id(), NeuronId(5));
    /// assert_eq!(neuron.innovation(), 12);
    /// assert_eq!(neuron.value(), 0.0);
    /// ```
    pub fn new(id: NeuronId, kind: NeuronKind, innovation: Innovation) -> Neuron {
        Neuron {
            id,
            kind,
            innovation,
            value: 0.0,
            sum: 0.0,
            future: 0.0,
            visited: false,
            seen: false,
        }
    }

    /// Returns a new neuron with a fresh identity
    /// and innovation number drawn from `ids`.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{IdAllocator, Neuron, NeuronKind};
    ///
    /// let ids = IdAllocator::new();
    /// let a = Neuron::allocate(NeuronKind::Sensor, &ids);
    /// let b = Neuron::allocate(NeuronKind::Output, &ids);
    ///
    /// assert_ne!(a.id(), b.id());
    /// assert!(a.innovation() < b.innovation());
    /// ```
    pub fn allocate(kind: NeuronKind, ids: &IdAllocator) -> Neuron {
        Neuron::new(ids.neuron_id(), kind, ids.next_innovation())
    }

    /// Returns a copy sharing identity and innovation
    /// number, but with cleared run-time state.
    pub fn structural_copy(&self) -> Neuron {
        Neuron::new(self.id, self.kind, self.innovation)
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn kind(&self) -> NeuronKind {
        self.kind
    }

    /// Returns the neuron's innovation number.
    pub fn innovation(&self) -> Innovation {
        self.innovation
    }

    /// Returns the output computed in the last
    /// propagation step.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the recurrent input pending for
    /// the next propagation step.
    pub fn future(&self) -> f64 {
        self.future
    }

    /// Clears all run-time state.
    pub(crate) fn clear(&mut self) {
        self.value = 0.0;
        self.sum = 0.0;
        self.future = 0.0;
        self.visited = false;
        self.seen = false;
    }

    /// Moves the pending recurrent input into the
    /// step's input sum and resets traversal flags.
    pub(crate) fn begin_step(&mut self) {
        self.sum = self.future;
        self.future = 0.0;
        self.visited = false;
        self.seen = false;
    }
}

impl fmt::Display for Neuron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}[{:?}, {:.3}]",
            self.id, self.innovation, self.kind, self.value
        )
    }
}
