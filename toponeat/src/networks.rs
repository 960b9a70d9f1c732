//! Signal propagation through a genome's network.
//!
//! Genomes are evaluated directly, without building a
//! separate phenotype. Each call to [`Organism::process`]
//! is one time step: signals travel breadth-first from the
//! sensors, and any signal arriving at a neuron that has
//! already fired this step is held back for the next one.
//! Cycles are thus resolved with a one-step delay, and a
//! step always terminates.
mod queue;

pub use queue::Fifo;

use crate::genomics::{GenomeError, InvariantViolation, Neuron, NeuronId, Organism};

use ahash::RandomState;
use log::{error, trace};

use std::collections::HashMap;

impl Organism {
    /// Runs one time step of the network, feeding `input`
    /// to the sensors (in sensor order) and returning the
    /// values of the outputs (in output order).
    ///
    /// Every neuron, sensors included, fires `activation`
    /// over the sum of its inputs for the step. Only enabled
    /// synapses carry signals.
    ///
    /// # Errors
    /// Returns [`GenomeError::InputArityMismatch`] if the
    /// input length differs from the number of sensors.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{ActivationType, IdAllocator, Organism};
    /// use std::num::NonZeroUsize;
    ///
    /// let ids = IdAllocator::new();
    /// let mut organism = Organism::new(
    ///     NonZeroUsize::new(2).unwrap(),
    ///     NonZeroUsize::new(1).unwrap(),
    ///     &ids,
    /// );
    ///
    /// let output = organism.process(&[0.5, 2.0], ActivationType::Identity.function()).unwrap();
    /// assert_eq!(output, vec![2.5]);
    ///
    /// assert!(organism.process(&[1.0], |x| x).is_err());
    /// ```
    pub fn process(
        &mut self,
        input: &[f64],
        activation: impl Fn(f64) -> f64,
    ) -> Result<Vec<f64>, GenomeError> {
        if input.len() != self.sensors.len() {
            return Err(GenomeError::InputArityMismatch {
                expected: self.sensors.len(),
                actual: input.len(),
            });
        }

        for neuron in self.neurons.values_mut() {
            neuron.begin_step();
        }
        for (id, value) in self.sensors.iter().zip(input) {
            lookup(&mut self.neurons, *id)?.sum += value;
        }

        self.propagate(&activation)?;

        self.outputs
            .iter()
            .map(|id| {
                self.neurons
                    .get(id)
                    .map(Neuron::value)
                    .ok_or_else(|| GenomeError::from(InvariantViolation::MissingNeuron(*id)))
            })
            .collect()
    }

    /// Breadth-first pass from the sensors.
    fn propagate(&mut self, activation: &impl Fn(f64) -> f64) -> Result<(), GenomeError> {
        let mut queue = Fifo::with_capacity(self.neurons.len());
        for id in &self.sensors {
            lookup(&mut self.neurons, *id)?.seen = true;
            queue.push(*id);
        }

        while let Some(id) = queue.pop() {
            let neuron = lookup(&mut self.neurons, id)?;
            if neuron.visited {
                let violation = InvariantViolation::RevisitedNeuron(id);
                error!("{}", violation);
                return Err(violation.into());
            }
            neuron.visited = true;
            neuron.value = activation(neuron.sum);
            let value = neuron.value;

            let outgoing = self.connections.get(&id).map(Vec::as_slice).unwrap_or_default();
            for synapse_id in outgoing {
                let synapse = self
                    .synapses
                    .get(synapse_id)
                    .ok_or(InvariantViolation::MissingSynapse(*synapse_id))?;
                if !synapse.enabled() {
                    continue;
                }
                let signal = value * synapse.weight();
                let target = lookup(&mut self.neurons, synapse.output())?;
                if target.visited {
                    target.future += signal;
                } else {
                    target.sum += signal;
                    if !target.seen {
                        target.seen = true;
                        queue.push(target.id());
                    }
                }
            }
            trace!("fired {} ({}), pending: {}", id, value, queue);
        }
        Ok(())
    }

    /// Clears the run-time state of every neuron,
    /// including signals held back for the next step.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{IdAllocator, Organism};
    /// use std::num::NonZeroUsize;
    ///
    /// let ids = IdAllocator::new();
    /// let one = NonZeroUsize::new(1).unwrap();
    /// let mut organism = Organism::new(one, one, &ids);
    ///
    /// organism.process(&[3.0], |x| x).unwrap();
    /// organism.reset_state();
    ///
    /// assert!(organism.neurons().all(|n| n.value() == 0.0 && n.future() == 0.0));
    /// ```
    pub fn reset_state(&mut self) {
        for neuron in self.neurons.values_mut() {
            neuron.clear();
        }
    }
}

fn lookup(
    neurons: &mut HashMap<NeuronId, Neuron, RandomState>,
    id: NeuronId,
) -> Result<&mut Neuron, InvariantViolation> {
    neurons
        .get_mut(&id)
        .ok_or(InvariantViolation::MissingNeuron(id))
}
