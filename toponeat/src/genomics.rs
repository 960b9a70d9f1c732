//! Genomes are the focus of evolution.
//! An [`Organism`] is an ordered collection of neuron and
//! synapse genes, each tagged with an innovation number
//! that lines it up with its counterparts in other genomes.
//! Genomes grow through mutation, and are recombined
//! through crossover.

mod activation;
mod config;
mod crossover;
mod errors;
mod genes;
mod ids;
mod mutation;
mod neurons;
mod synapses;

pub use activation::ActivationType;
pub use config::{NeatConfig, OrganismConfig, SpeciesConfig};
pub use crossover::{Aligned, GeneAlignment};
pub use errors::{ConfigError, GenomeError, InvariantViolation};
pub use genes::{Gene, GeneKind};
pub use ids::{IdAllocator, NeuronId, SynapseId};
pub use mutation::MutationReport;
pub use neurons::{Neuron, NeuronKind};
pub use synapses::Synapse;

use ahash::RandomState;

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;

/// A genome: neurons and synapses, the order
/// in which they were created, and the bookkeeping
/// an evolutionary loop needs.
///
/// Genes are owned exclusively by their genome;
/// cloning and mating copy them.
#[derive(Debug)]
pub struct Organism {
    pub(crate) genes: Vec<Gene>,
    pub(crate) neurons: HashMap<NeuronId, Neuron, RandomState>,
    pub(crate) synapses: HashMap<SynapseId, Synapse, RandomState>,
    pub(crate) connections: HashMap<NeuronId, Vec<SynapseId>, RandomState>,
    pub(crate) sensors: Vec<NeuronId>,
    pub(crate) outputs: Vec<NeuronId>,
    pub(crate) generation: usize,
    pub(crate) fitness: f64,
}

impl Organism {
    /// Creates a genome with no genes.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::Organism;
    ///
    /// let organism = Organism::empty();
    /// assert_eq!(organism.genes().count(), 0);
    /// ```
    pub fn empty() -> Organism {
        Organism {
            genes: vec![],
            neurons: HashMap::default(),
            synapses: HashMap::default(),
            connections: HashMap::default(),
            sensors: vec![],
            outputs: vec![],
            generation: 0,
            fitness: 0.0,
        }
    }

    /// Create a new genome with `input_count` sensors and
    /// `output_count` outputs.
    ///
    /// Sensors and outputs are paired up round-robin:
    /// for every `i` below the larger of the two counts, a
    /// synapse of weight `1.0` connects sensor `i % input_count`
    /// to output `i % output_count`.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{IdAllocator, NeuronKind, Organism};
    /// use std::num::NonZeroUsize;
    ///
    /// let ids = IdAllocator::new();
    /// let organism = Organism::new(
    ///     NonZeroUsize::new(3).unwrap(),
    ///     NonZeroUsize::new(2).unwrap(),
    ///     &ids,
    /// );
    ///
    /// assert_eq!(organism.sensors().len(), 3);
    /// assert_eq!(organism.outputs().len(), 2);
    /// assert_eq!(organism.synapses().count(), 3);
    /// assert!(organism.synapses().all(|s| s.weight() == 1.0 && s.enabled()));
    /// ```
    pub fn new(
        input_count: NonZeroUsize,
        output_count: NonZeroUsize,
        ids: &IdAllocator,
    ) -> Organism {
        let (input_count, output_count) = (input_count.get(), output_count.get());
        let mut organism = Organism::empty();

        for _ in 0..input_count {
            organism.add_neuron_unchecked(Neuron::allocate(NeuronKind::Sensor, ids));
        }
        for _ in 0..output_count {
            organism.add_neuron_unchecked(Neuron::allocate(NeuronKind::Output, ids));
        }

        for i in 0..input_count.max(output_count) {
            let synapse = Synapse::connect(
                &organism.neurons[&organism.sensors[i % input_count]],
                &organism.neurons[&organism.outputs[i % output_count]],
                ids,
            );
            organism.add_synapse_unchecked(synapse);
        }

        organism
    }

    /// Adds a neuron to the genome, appending it to the
    /// gene sequence and, for sensors and outputs, to the
    /// corresponding role list.
    ///
    /// # Errors
    /// Returns an error if a neuron with the same id is
    /// already present, or if the neuron's innovation number
    /// is not greater than that of the last gene.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{IdAllocator, Neuron, NeuronKind, Organism};
    ///
    /// let ids = IdAllocator::new();
    /// let mut organism = Organism::empty();
    ///
    /// let sensor = Neuron::allocate(NeuronKind::Sensor, &ids);
    /// organism.add_neuron(sensor.clone()).unwrap();
    ///
    /// assert_eq!(organism.sensors(), &[sensor.id()]);
    /// assert!(organism.add_neuron(sensor).is_err());
    /// ```
    pub fn add_neuron(&mut self, neuron: Neuron) -> Result<&mut Neuron, GenomeError> {
        if self.neurons.contains_key(&neuron.id()) {
            return Err(GenomeError::DuplicateNeuron(neuron.id()));
        }
        self.check_innovation_order(neuron.innovation())?;
        Ok(self.add_neuron_unchecked(neuron))
    }

    /// Adds a neuron, assuming it is neither a duplicate
    /// nor out of innovation order.
    pub(crate) fn add_neuron_unchecked(&mut self, neuron: Neuron) -> &mut Neuron {
        let id = neuron.id();
        self.genes.push(Gene::Neuron {
            id,
            innovation: neuron.innovation(),
        });
        match neuron.kind() {
            NeuronKind::Sensor => self.sensors.push(id),
            NeuronKind::Output => self.outputs.push(id),
            NeuronKind::Hidden => {}
        }
        self.neurons.entry(id).or_insert(neuron)
    }

    /// Adds a synapse to the genome, appending it to the
    /// gene sequence and to its input neuron's outgoing
    /// synapses.
    ///
    /// # Errors
    /// Returns an error if a synapse with the same id is
    /// already present, if either endpoint is not a neuron
    /// of this genome, or if the synapse's innovation number
    /// is not greater than that of the last gene.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{IdAllocator, Neuron, NeuronKind, Organism, Synapse};
    ///
    /// let ids = IdAllocator::new();
    /// let mut organism = Organism::empty();
    /// let sensor = Neuron::allocate(NeuronKind::Sensor, &ids);
    /// let output = Neuron::allocate(NeuronKind::Output, &ids);
    /// let synapse = Synapse::connect(&sensor, &output, &ids);
    ///
    /// // The endpoints must be registered first.
    /// assert!(organism.add_synapse(synapse.clone()).is_err());
    ///
    /// organism.add_neuron(sensor.clone()).unwrap();
    /// organism.add_neuron(output).unwrap();
    /// organism.add_synapse(synapse.clone()).unwrap();
    ///
    /// assert_eq!(organism.outgoing(sensor.id()), &[synapse.id()]);
    /// ```
    pub fn add_synapse(&mut self, synapse: Synapse) -> Result<&mut Synapse, GenomeError> {
        if self.synapses.contains_key(&synapse.id()) {
            return Err(GenomeError::DuplicateSynapse(synapse.id()));
        }
        for endpoint in [synapse.input(), synapse.output()] {
            if !self.neurons.contains_key(&endpoint) {
                return Err(GenomeError::MissingEndpoint {
                    synapse: synapse.id(),
                    neuron: endpoint,
                });
            }
        }
        self.check_innovation_order(synapse.innovation())?;
        Ok(self.add_synapse_unchecked(synapse))
    }

    /// Adds a synapse, assuming it is valid for the genome.
    pub(crate) fn add_synapse_unchecked(&mut self, synapse: Synapse) -> &mut Synapse {
        let id = synapse.id();
        self.genes.push(Gene::Synapse {
            id,
            innovation: synapse.innovation(),
        });
        self.connections
            .entry(synapse.input())
            .or_default()
            .push(id);
        self.synapses.entry(id).or_insert(synapse)
    }

    fn check_innovation_order(&self, innovation: crate::Innovation) -> Result<(), GenomeError> {
        match self.genes.last() {
            Some(last) if last.innovation() >= innovation => {
                Err(GenomeError::InnovationOutOfOrder {
                    innovation,
                    last: last.innovation(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Looks up a neuron by id.
    ///
    /// # Errors
    /// Returns [`GenomeError::NeuronNotFound`] if the
    /// genome has no such neuron.
    pub fn neuron(&self, id: NeuronId) -> Result<&Neuron, GenomeError> {
        self.neurons.get(&id).ok_or(GenomeError::NeuronNotFound(id))
    }

    pub fn neuron_mut(&mut self, id: NeuronId) -> Result<&mut Neuron, GenomeError> {
        self.neurons
            .get_mut(&id)
            .ok_or(GenomeError::NeuronNotFound(id))
    }

    /// Looks up a synapse by id.
    ///
    /// # Errors
    /// Returns [`GenomeError::SynapseNotFound`] if the
    /// genome has no such synapse.
    pub fn synapse(&self, id: SynapseId) -> Result<&Synapse, GenomeError> {
        self.synapses
            .get(&id)
            .ok_or(GenomeError::SynapseNotFound(id))
    }

    pub fn synapse_mut(&mut self, id: SynapseId) -> Result<&mut Synapse, GenomeError> {
        self.synapses
            .get_mut(&id)
            .ok_or(GenomeError::SynapseNotFound(id))
    }

    /// Returns the input and output neurons of a synapse.
    ///
    /// # Errors
    /// Returns [`GenomeError::SynapseNotFound`] if the
    /// genome has no such synapse.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{IdAllocator, NeuronKind, Organism};
    /// use std::num::NonZeroUsize;
    ///
    /// let ids = IdAllocator::new();
    /// let one = NonZeroUsize::new(1).unwrap();
    /// let organism = Organism::new(one, one, &ids);
    /// let synapse = organism.synapses().next().unwrap().id();
    ///
    /// let (input, output) = organism.synapse_endpoints(synapse).unwrap();
    /// assert_eq!(input.kind(), NeuronKind::Sensor);
    /// assert_eq!(output.kind(), NeuronKind::Output);
    /// ```
    pub fn synapse_endpoints(&self, id: SynapseId) -> Result<(&Neuron, &Neuron), GenomeError> {
        let synapse = self.synapse(id)?;
        let input = self
            .neurons
            .get(&synapse.input())
            .ok_or(InvariantViolation::MissingNeuron(synapse.input()))?;
        let output = self
            .neurons
            .get(&synapse.output())
            .ok_or(InvariantViolation::MissingNeuron(synapse.output()))?;
        Ok((input, output))
    }

    /// Returns an iterator over the gene sequence,
    /// in strictly ascending innovation order.
    pub fn genes(&self) -> impl Iterator<Item = &Gene> {
        self.genes.iter()
    }

    /// Returns an iterator over the genome's neurons,
    /// in gene sequence order.
    pub fn neurons(&self) -> impl Iterator<Item = &Neuron> {
        self.genes.iter().filter_map(move |gene| match gene {
            Gene::Neuron { id, .. } => self.neurons.get(id),
            Gene::Synapse { .. } => None,
        })
    }

    /// Returns an iterator over the genome's synapses,
    /// in gene sequence order.
    pub fn synapses(&self) -> impl Iterator<Item = &Synapse> {
        self.genes.iter().filter_map(move |gene| match gene {
            Gene::Synapse { id, .. } => self.synapses.get(id),
            Gene::Neuron { .. } => None,
        })
    }

    /// Returns the sensor neuron ids, in insertion order.
    pub fn sensors(&self) -> &[NeuronId] {
        &self.sensors
    }

    /// Returns the output neuron ids, in insertion order.
    pub fn outputs(&self) -> &[NeuronId] {
        &self.outputs
    }

    /// Returns the ids of the synapses leaving a neuron,
    /// in insertion order. Unknown neurons have none.
    pub fn outgoing(&self, id: NeuronId) -> &[SynapseId] {
        self.connections
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Sets the genome's fitness to the value passed.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::Organism;
    ///
    /// let mut organism = Organism::empty();
    /// assert_eq!(organism.fitness(), 0.0);
    ///
    /// organism.set_fitness(32.0);
    /// assert_eq!(organism.fitness(), 32.0);
    /// ```
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }
}

impl Clone for Organism {
    /// Rebuilds the genome gene by gene from fresh copies,
    /// so that the clone shares no state with the original.
    fn clone(&self) -> Organism {
        let mut clone = Organism::empty();
        for gene in &self.genes {
            match gene {
                Gene::Neuron { id, .. } => {
                    if let Some(neuron) = self.neurons.get(id) {
                        clone.add_neuron_unchecked(neuron.clone());
                    }
                }
                Gene::Synapse { id, .. } => {
                    if let Some(synapse) = self.synapses.get(id) {
                        clone.add_synapse_unchecked(synapse.clone());
                    }
                }
            }
        }
        clone.generation = self.generation;
        clone.fitness = self.fitness;
        clone
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let neurons: Vec<String> = self.neurons().map(|n| n.to_string()).collect();
        let synapses: Vec<String> = self.synapses().map(|s| s.to_string()).collect();
        f.debug_struct("Organism")
            .field("Neurons", &neurons)
            .field("Synapses", &synapses)
            .field("Generation", &self.generation)
            .field("Fitness", &self.fitness)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn is_ascending(organism: &Organism) -> bool {
        organism
            .genes()
            .zip(organism.genes().skip(1))
            .all(|(a, b)| a.innovation() < b.innovation())
    }

    #[test]
    fn new_wiring() {
        for input_count in 1..6 {
            for output_count in 1..6 {
                let ids = IdAllocator::new();
                let organism = Organism::new(nz(input_count), nz(output_count), &ids);

                assert_eq!(organism.sensors.len(), input_count);
                assert_eq!(organism.outputs.len(), output_count);
                assert_eq!(organism.neurons.len(), input_count + output_count);
                assert_eq!(organism.synapses.len(), input_count.max(output_count));
                assert!(is_ascending(&organism));

                for (i, synapse) in organism.synapses().enumerate() {
                    assert_eq!(synapse.input(), organism.sensors[i % input_count]);
                    assert_eq!(synapse.output(), organism.outputs[i % output_count]);
                }
            }
        }
    }

    #[test]
    fn add_neuron_roles() {
        let ids = IdAllocator::new();
        let mut organism = Organism::empty();
        let sensor = Neuron::allocate(NeuronKind::Sensor, &ids);
        let hidden = Neuron::allocate(NeuronKind::Hidden, &ids);
        let output = Neuron::allocate(NeuronKind::Output, &ids);

        organism.add_neuron(sensor.clone()).unwrap();
        organism.add_neuron(hidden.clone()).unwrap();
        organism.add_neuron(output.clone()).unwrap();

        assert_eq!(organism.sensors, vec![sensor.id()]);
        assert_eq!(organism.outputs, vec![output.id()]);
        assert_eq!(organism.genes.len(), 3);
        assert_eq!(organism.neuron(hidden.id()).unwrap(), &hidden);
    }

    #[test]
    fn add_neuron_out_of_order() {
        let mut organism = Organism::empty();
        organism
            .add_neuron(Neuron::new(NeuronId(1), NeuronKind::Sensor, 5))
            .unwrap();

        assert_eq!(
            organism
                .add_neuron(Neuron::new(NeuronId(2), NeuronKind::Output, 5))
                .unwrap_err(),
            GenomeError::InnovationOutOfOrder {
                innovation: 5,
                last: 5
            }
        );
        assert_eq!(organism.genes.len(), 1);
    }

    #[test]
    fn add_synapse_missing_endpoint() {
        let mut organism = Organism::empty();
        organism
            .add_neuron(Neuron::new(NeuronId(1), NeuronKind::Sensor, 1))
            .unwrap();

        let synapse = Synapse::new(SynapseId(2), NeuronId(1), NeuronId(7), 1.0, 2);
        assert_eq!(
            organism.add_synapse(synapse).unwrap_err(),
            GenomeError::MissingEndpoint {
                synapse: SynapseId(2),
                neuron: NeuronId(7)
            }
        );
        assert!(organism.connections.is_empty());
    }

    #[test]
    fn add_synapse_duplicate() {
        let ids = IdAllocator::new();
        let mut organism = Organism::new(nz(1), nz(1), &ids);
        let existing = organism.synapses().next().unwrap().clone();

        assert_eq!(
            organism.add_synapse(existing.clone()).unwrap_err(),
            GenomeError::DuplicateSynapse(existing.id())
        );
    }

    #[test]
    fn lookups_not_found() {
        let organism = Organism::empty();
        assert_eq!(
            organism.neuron(NeuronId(3)).unwrap_err(),
            GenomeError::NeuronNotFound(NeuronId(3))
        );
        assert_eq!(
            organism.synapse(SynapseId(4)).unwrap_err(),
            GenomeError::SynapseNotFound(SynapseId(4))
        );
        assert_eq!(
            organism.synapse_endpoints(SynapseId(4)).unwrap_err(),
            GenomeError::SynapseNotFound(SynapseId(4))
        );
        assert!(organism.outgoing(NeuronId(3)).is_empty());
    }

    #[test]
    fn clone_is_structurally_identical() {
        let ids = IdAllocator::new();
        let mut organism = Organism::new(nz(2), nz(3), &ids);
        organism.generation = 4;
        organism.fitness = 1.5;

        let clone = organism.clone();

        assert_eq!(clone.genes, organism.genes);
        assert_eq!(clone.sensors, organism.sensors);
        assert_eq!(clone.outputs, organism.outputs);
        assert_eq!(clone.generation, 4);
        assert_eq!(clone.fitness, 1.5);
        for neuron in organism.neurons() {
            assert_eq!(clone.outgoing(neuron.id()), organism.outgoing(neuron.id()));
        }
    }

    #[test]
    fn clone_is_independent() {
        let ids = IdAllocator::new();
        let organism = Organism::new(nz(1), nz(1), &ids);
        let synapse = organism.synapses().next().unwrap().id();

        let mut clone = organism.clone();
        clone.synapse_mut(synapse).unwrap().set_weight(-3.0);
        clone.synapse_mut(synapse).unwrap().set_enabled(false);

        assert_eq!(organism.synapse(synapse).unwrap().weight(), 1.0);
        assert!(organism.synapse(synapse).unwrap().enabled());
    }
}
