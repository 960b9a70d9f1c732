use super::{
    Gene, GenomeError, IdAllocator, Neuron, NeuronId, NeuronKind, Organism, OrganismConfig,
    Synapse, SynapseId,
};
use crate::rng::RandomSource;

use log::{debug, trace};

/// Counts of the mutations applied by a single
/// call to [`Organism::mutate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MutationReport {
    pub splits: usize,
    pub toggles: usize,
    pub weight_resamples: usize,
}

impl MutationReport {
    /// Returns `true` if nothing was mutated.
    pub fn is_empty(&self) -> bool {
        self.splits == 0 && self.toggles == 0 && self.weight_resamples == 0
    }
}

impl Organism {
    /// Mutates the genome.
    ///
    /// Every synapse present when the call starts, enabled
    /// or not, goes through three independent trials, in
    /// gene sequence order: a _split_ with probability
    /// [`synapse_split_chance`], an enabled-flag _toggle_ with
    /// probability [`synapse_toggle_chance`], and a weight
    /// _resample_ with probability [`synapse_weight_chance`].
    /// Synapses created by splits during the call are left
    /// alone until the next call.
    ///
    /// [`synapse_split_chance`]: crate::genomics::OrganismConfig::synapse_split_chance
    /// [`synapse_toggle_chance`]: crate::genomics::OrganismConfig::synapse_toggle_chance
    /// [`synapse_weight_chance`]: crate::genomics::OrganismConfig::synapse_weight_chance
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{IdAllocator, Organism, OrganismConfig};
    /// use toponeat::UniformSource;
    /// use std::num::NonZeroUsize;
    ///
    /// let ids = IdAllocator::new();
    /// let one = NonZeroUsize::new(1).unwrap();
    /// let mut organism = Organism::new(one, one, &ids);
    ///
    /// let config = OrganismConfig {
    ///     synapse_split_chance: 1.0,
    ///     ..OrganismConfig::zero()
    /// };
    /// let report = organism
    ///     .mutate(&config, &ids, &mut UniformSource::thread())
    ///     .unwrap();
    ///
    /// // The only synapse was split into two new ones.
    /// assert_eq!(report.splits, 1);
    /// assert_eq!(organism.synapses().count(), 3);
    /// assert_eq!(organism.neurons().count(), 3);
    /// ```
    pub fn mutate(
        &mut self,
        config: &OrganismConfig,
        ids: &IdAllocator,
        rng: &mut impl RandomSource,
    ) -> Result<MutationReport, GenomeError> {
        let candidates: Vec<SynapseId> = self
            .genes
            .iter()
            .filter_map(|gene| match gene {
                Gene::Synapse { id, .. } => Some(*id),
                Gene::Neuron { .. } => None,
            })
            .collect();

        let mut report = MutationReport::default();
        for id in candidates {
            if rng.chance(config.synapse_split_chance) {
                self.split_synapse(id, ids)?;
                report.splits += 1;
            }
            if rng.chance(config.synapse_toggle_chance) {
                self.toggle_enabled(id)?;
                report.toggles += 1;
            }
            if rng.chance(config.synapse_weight_chance) {
                self.mutate_weight(id, config.synapse_weight_bound, rng)?;
                report.weight_resamples += 1;
            }
        }

        debug!(
            "mutated organism of generation {}: {} splits, {} toggles, {} weight resamples",
            self.generation, report.splits, report.toggles, report.weight_resamples
        );
        Ok(report)
    }

    /// Splits a synapse in two, with a new hidden neuron
    /// in between, and disables the original synapse.
    ///
    /// Both new synapses are enabled and have a weight of
    /// `1.0`. The original synapse is kept, so its innovation
    /// number stays available for alignment. Returns the ids
    /// of the triplet (_in synapse_, _new neuron_, _out synapse_).
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
    /// let mut organism = Organism::new(one, one, &ids);
    /// let original = organism.synapses().next().unwrap().id();
    ///
    /// let (input_synapse, hidden, output_synapse) =
    ///     organism.split_synapse(original, &ids).unwrap();
    ///
    /// assert!(!organism.synapse(original).unwrap().enabled());
    /// assert_eq!(organism.neuron(hidden).unwrap().kind(), NeuronKind::Hidden);
    /// assert_eq!(organism.synapse(input_synapse).unwrap().output(), hidden);
    /// assert_eq!(organism.synapse(output_synapse).unwrap().input(), hidden);
    /// ```
    pub fn split_synapse(
        &mut self,
        id: SynapseId,
        ids: &IdAllocator,
    ) -> Result<(SynapseId, NeuronId, SynapseId), GenomeError> {
        let (input, output) = self.synapse_endpoints(id)?;

        let hidden = Neuron::allocate(NeuronKind::Hidden, ids);
        let input_synapse = Synapse::connect(input, &hidden, ids);
        let output_synapse = Synapse::connect(&hidden, output, ids);
        let new_ids = (input_synapse.id(), hidden.id(), output_synapse.id());

        self.synapse_mut(id)?.set_enabled(false);

        // Neuron first: the new synapses refer to it.
        self.add_neuron(hidden)?;
        self.add_synapse(input_synapse)?;
        self.add_synapse(output_synapse)?;

        trace!(
            "split synapse {} into {} -> {} -> {}",
            id,
            new_ids.0,
            new_ids.1,
            new_ids.2
        );
        Ok(new_ids)
    }

    /// Flips the enabled flag of a synapse.
    ///
    /// # Errors
    /// Returns [`GenomeError::SynapseNotFound`] if the
    /// genome has no such synapse.
    pub fn toggle_enabled(&mut self, id: SynapseId) -> Result<(), GenomeError> {
        self.synapse_mut(id)?.toggle_enabled();
        Ok(())
    }

    /// Replaces the weight of a synapse with a value drawn
    /// uniformly from `[-bound, bound)`.
    ///
    /// # Errors
    /// Returns [`GenomeError::SynapseNotFound`] if the
    /// genome has no such synapse.
    pub fn mutate_weight(
        &mut self,
        id: SynapseId,
        bound: f64,
        rng: &mut impl RandomSource,
    ) -> Result<(), GenomeError> {
        self.synapse_mut(id)?.resample_weight(bound, rng);
        Ok(())
    }
}
