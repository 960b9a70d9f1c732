use toponeat::genomics::{Aligned, Gene, GeneAlignment, Organism, SpeciesConfig};

/// Indices into the population of the
/// members of one species.
#[derive(Clone, Debug)]
pub struct Species {
    members: Vec<usize>,
}

impl Species {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Mean fitness of the members.
    pub fn shared_fitness(&self, population: &[Organism]) -> f64 {
        let total: f64 = self.members.iter().map(|&i| population[i].fitness()).sum();
        total / self.members.len() as f64
    }

    /// The fittest `survival_threshold` fraction
    /// of the members, never empty.
    pub fn survivors(&self, population: &[Organism], survival_threshold: f64) -> Vec<usize> {
        let mut members = self.members.clone();
        members.sort_by(|&a, &b| population[b].fitness().total_cmp(&population[a].fitness()));
        let count = (members.len() as f64 * survival_threshold).ceil() as usize;
        members.truncate(count.max(1));
        members
    }
}

/// Genetic distance between two genomes, as
/// described in [`SpeciesConfig`].
pub fn distance(first: &Organism, second: &Organism, config: &SpeciesConfig) -> f64 {
    let first_last = first.genes().last().map_or(0, Gene::innovation);
    let second_last = second.genes().last().map_or(0, Gene::innovation);

    let mut excess = 0;
    let mut disjoint = 0;
    let mut matching = 0;
    let mut weight_difference = 0.0;
    for aligned in GeneAlignment::new(first, second) {
        match aligned {
            Aligned::Matching(Gene::Synapse { id: a, .. }, Gene::Synapse { id: b, .. }) => {
                if let (Ok(a), Ok(b)) = (first.synapse(*a), second.synapse(*b)) {
                    weight_difference += (a.weight() - b.weight()).abs();
                    matching += 1;
                }
            }
            Aligned::Matching(..) => {}
            Aligned::OnlyFirst(gene) if gene.innovation() > second_last => excess += 1,
            Aligned::OnlySecond(gene) if gene.innovation() > first_last => excess += 1,
            Aligned::OnlyFirst(_) | Aligned::OnlySecond(_) => disjoint += 1,
        }
    }

    let gene_count = first.genes().count().max(second.genes().count()).max(1) as f64;
    let average_weight_difference = if matching > 0 {
        weight_difference / matching as f64
    } else {
        0.0
    };

    (config.excess_gene_factor * excess as f64 + config.disjoint_gene_factor * disjoint as f64)
        / gene_count
        + config.weight_difference_factor * average_weight_difference
}

/// Groups the population into species. Each genome joins
/// the first species whose founder lies within the
/// compatibility threshold, or founds a new one.
pub fn speciate(population: &[Organism], config: &SpeciesConfig) -> Vec<Species> {
    let mut species: Vec<Species> = vec![];
    for (i, organism) in population.iter().enumerate() {
        let home = species.iter_mut().find(|s| {
            distance(&population[s.members[0]], organism, config) <= config.compatibility_threshold
        });
        match home {
            Some(s) => s.members.push(i),
            None => species.push(Species { members: vec![i] }),
        }
    }
    species
}

#[cfg(test)]
mod tests {
    use super::*;
    use toponeat::genomics::IdAllocator;

    use std::num::NonZeroUsize;

    const CONFIG: SpeciesConfig = SpeciesConfig {
        excess_gene_factor: 1.0,
        disjoint_gene_factor: 1.0,
        weight_difference_factor: 0.5,
        compatibility_threshold: 0.5,
    };

    fn organism(ids: &IdAllocator) -> Organism {
        let one = NonZeroUsize::new(1).unwrap();
        Organism::new(one, one, ids)
    }

    #[test]
    fn identical_genomes_are_compatible() {
        let ids = IdAllocator::new();
        let a = organism(&ids);
        assert_eq!(distance(&a, &a.clone(), &CONFIG), 0.0);
    }

    #[test]
    fn distance_counts_excess_and_disjoint() {
        let ids = IdAllocator::new();
        let base = organism(&ids);
        let synapse = base.synapses().next().unwrap().id();
        let mut a = base.clone();
        let mut b = base;
        a.split_synapse(synapse, &ids).unwrap();
        b.split_synapse(synapse, &ids).unwrap();
        b.synapse_mut(synapse).unwrap().set_weight(3.0);

        // a's 3 new genes are disjoint, b's 3 are excess;
        // the shared synapse differs in weight by 2.
        assert_eq!(distance(&a, &b, &CONFIG), 6.0 / 6.0 + 0.5 * 2.0);
    }

    #[test]
    fn speciate_groups() {
        let ids = IdAllocator::new();
        let a = organism(&ids);
        let b = organism(&ids);
        let population = vec![a.clone(), b, a];

        let species = speciate(&population, &CONFIG);
        assert_eq!(species.len(), 2);
        assert_eq!(species[0].members, vec![0, 2]);
        assert_eq!(species[1].members, vec![1]);
    }
}
