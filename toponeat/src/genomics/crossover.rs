use super::{Gene, GenomeError, InvariantViolation, Organism};

use log::{debug, error};

use std::cmp::Ordering;

/// A step of a [`GeneAlignment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aligned<'a> {
    /// Both genomes carry a gene with this innovation number.
    Matching(&'a Gene, &'a Gene),
    /// Only the first genome carries the gene.
    OnlyFirst(&'a Gene),
    /// Only the second genome carries the gene.
    OnlySecond(&'a Gene),
}

impl<'a> Aligned<'a> {
    /// Returns the innovation number of the aligned gene(s).
    pub fn innovation(&self) -> crate::Innovation {
        match self {
            Aligned::Matching(gene, _) | Aligned::OnlyFirst(gene) | Aligned::OnlySecond(gene) => {
                gene.innovation()
            }
        }
    }
}

/// Walks the gene sequences of two genomes side by side,
/// lining genes up by innovation number.
///
/// Both sequences are sorted, so this is a merge: each
/// step yields the gene(s) with the lowest innovation
/// number not yet visited, and the items come out in
/// strictly ascending innovation order.
///
/// # Examples
/// ```
/// use toponeat::genomics::{Aligned, GeneAlignment, IdAllocator, Organism};
/// use std::num::NonZeroUsize;
///
/// let ids = IdAllocator::new();
/// let one = NonZeroUsize::new(1).unwrap();
/// let first = Organism::new(one, one, &ids);
/// let mut second = first.clone();
/// let synapse = second.synapses().next().unwrap().id();
/// second.split_synapse(synapse, &ids).unwrap();
///
/// let alignment: Vec<_> = GeneAlignment::new(&first, &second).collect();
/// assert_eq!(alignment.len(), 6);
/// assert!(alignment[..3].iter().all(|a| matches!(a, Aligned::Matching(..))));
/// assert!(alignment[3..].iter().all(|a| matches!(a, Aligned::OnlySecond(_))));
/// ```
#[derive(Clone, Debug)]
pub struct GeneAlignment<'a> {
    first: &'a [Gene],
    second: &'a [Gene],
    first_cursor: usize,
    second_cursor: usize,
}

impl<'a> GeneAlignment<'a> {
    pub fn new(first: &'a Organism, second: &'a Organism) -> GeneAlignment<'a> {
        GeneAlignment {
            first: &first.genes,
            second: &second.genes,
            first_cursor: 0,
            second_cursor: 0,
        }
    }

    /// Returns `true` once every gene of both genomes
    /// has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.first_cursor == self.first.len() && self.second_cursor == self.second.len()
    }
}

impl<'a> Iterator for GeneAlignment<'a> {
    type Item = Aligned<'a>;

    fn next(&mut self) -> Option<Aligned<'a>> {
        let first = self.first.get(self.first_cursor);
        let second = self.second.get(self.second_cursor);

        let aligned = match (first, second) {
            (Some(a), Some(b)) => match a.innovation().cmp(&b.innovation()) {
                Ordering::Equal => Aligned::Matching(a, b),
                Ordering::Less => Aligned::OnlyFirst(a),
                Ordering::Greater => Aligned::OnlySecond(b),
            },
            (Some(a), None) => Aligned::OnlyFirst(a),
            (None, Some(b)) => Aligned::OnlySecond(b),
            (None, None) => return None,
        };

        match aligned {
            Aligned::Matching(..) => {
                self.first_cursor += 1;
                self.second_cursor += 1;
            }
            Aligned::OnlyFirst(_) => self.first_cursor += 1,
            Aligned::OnlySecond(_) => self.second_cursor += 1,
        }
        Some(aligned)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let first = self.first.len() - self.first_cursor;
        let second = self.second.len() - self.second_cursor;
        (first.max(second), Some(first + second))
    }
}

impl Organism {
    /// Combines two genomes and returns their _offspring_.
    ///
    /// Genes are lined up by innovation number. Genes found
    /// in both parents are copied from the fitter one, with
    /// ties going to `second`; genes found in only one parent
    /// are always inherited. The offspring receives its genes
    /// in ascending innovation order, so every neuron is
    /// added before the synapses that refer to it.
    ///
    /// Inherited genes keep their ids and innovation numbers,
    /// but not their run-time state. The offspring's generation
    /// is one past that of `first`.
    ///
    /// # Errors
    /// Returns [`GenomeError::ArityMismatch`] if the parents
    /// differ in their number of sensors or outputs.
    ///
    /// # Examples
    /// ```
    /// use toponeat::genomics::{IdAllocator, Organism};
    /// use std::num::NonZeroUsize;
    ///
    /// let ids = IdAllocator::new();
    /// let two = NonZeroUsize::new(2).unwrap();
    /// let parent = Organism::new(two, two, &ids);
    ///
    /// // A genome can be mated with itself.
    /// let child = Organism::mate(&parent, &parent.clone()).unwrap();
    ///
    /// assert_eq!(child.genes().collect::<Vec<_>>(), parent.genes().collect::<Vec<_>>());
    /// assert_eq!(child.generation(), parent.generation() + 1);
    /// ```
    pub fn mate(first: &Organism, second: &Organism) -> Result<Organism, GenomeError> {
        if first.sensors.len() != second.sensors.len()
            || first.outputs.len() != second.outputs.len()
        {
            return Err(GenomeError::ArityMismatch {
                first_sensors: first.sensors.len(),
                first_outputs: first.outputs.len(),
                second_sensors: second.sensors.len(),
                second_outputs: second.outputs.len(),
            });
        }

        let mut offspring = Organism::empty();
        offspring.generation = first.generation + 1;

        let mut alignment = GeneAlignment::new(first, second);
        let mut matching = 0;
        for aligned in alignment.by_ref() {
            let (parent, gene) = match aligned {
                Aligned::Matching(a, b) => {
                    matching += 1;
                    if first.fitness > second.fitness {
                        (first, a)
                    } else {
                        (second, b)
                    }
                }
                Aligned::OnlyFirst(a) => (first, a),
                Aligned::OnlySecond(b) => (second, b),
            };
            offspring.inherit(parent, gene)?;
        }

        if !alignment.is_exhausted() {
            let violation = InvariantViolation::CursorsExhausted {
                first: alignment.first_cursor,
                second: alignment.second_cursor,
            };
            error!("{}", violation);
            return Err(violation.into());
        }

        debug!(
            "mated genomes of {} and {} genes ({} matching) into offspring of {} genes",
            first.genes.len(),
            second.genes.len(),
            matching,
            offspring.genes.len()
        );
        Ok(offspring)
    }

    /// Adds a copy of `parent`'s `gene` to `self`.
    fn inherit(&mut self, parent: &Organism, gene: &Gene) -> Result<(), GenomeError> {
        match *gene {
            Gene::Neuron { id, .. } => {
                let neuron = parent
                    .neurons
                    .get(&id)
                    .ok_or(InvariantViolation::MissingNeuron(id))?;
                self.add_neuron(neuron.structural_copy())?;
            }
            Gene::Synapse { id, .. } => {
                let synapse = parent
                    .synapses
                    .get(&id)
                    .ok_or(InvariantViolation::MissingSynapse(id))?;
                self.add_synapse(synapse.clone())?;
            }
        }
        Ok(())
    }
}
