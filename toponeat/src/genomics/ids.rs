use crate::Innovation;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a neuron, unique across every genome
/// created from the same [`IdAllocator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NeuronId(pub u64);

/// Identifier of a synapse, unique across every genome
/// created from the same [`IdAllocator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SynapseId(pub u64);

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for SynapseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// An `IdAllocator` hands out gene identities and
/// innovation numbers.
///
/// Both counters are strictly increasing and never
/// repeat a value, even when shared between threads
/// that mutate different genomes concurrently. This is
/// the only state genomes share, and it is what makes
/// innovation numbers comparable between genomes.
///
/// The first value issued by each counter is `1`.
///
/// # Examples
/// ```
/// use toponeat::genomics::IdAllocator;
///
/// let ids = IdAllocator::new();
/// let first = ids.next_innovation();
/// let second = ids.next_innovation();
/// assert!(second > first);
/// ```
#[derive(Debug, Default)]
pub struct IdAllocator {
    last_id: AtomicU64,
    last_innovation: AtomicU64,
}

impl IdAllocator {
    /// Creates an allocator whose first issued
    /// id and innovation number are both `1`.
    pub fn new() -> IdAllocator {
        IdAllocator::default()
    }

    /// Creates an allocator that will only issue values
    /// strictly greater than `last_id` and `last_innovation`.
    /// Useful when continuing a run from genomes created
    /// by an earlier allocator.
    pub fn starting_at(last_id: u64, last_innovation: Innovation) -> IdAllocator {
        IdAllocator {
            last_id: AtomicU64::new(last_id),
            last_innovation: AtomicU64::new(last_innovation),
        }
    }

    /// Returns a fresh identity value.
    pub fn next_id(&self) -> u64 {
        self.last_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns a fresh innovation number.
    pub fn next_innovation(&self) -> Innovation {
        self.last_innovation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns the most recently issued identity value,
    /// or `0` if none has been issued.
    pub fn last_id(&self) -> u64 {
        self.last_id.load(Ordering::Relaxed)
    }

    /// Returns the most recently issued innovation number,
    /// or `0` if none has been issued.
    pub fn last_innovation(&self) -> Innovation {
        self.last_innovation.load(Ordering::Relaxed)
    }

    /// Rewinds both counters to zero.
    ///
    /// Genomes created before the reset must not be
    /// mixed with genomes created after it.
    pub fn reset(&mut self) {
        *self.last_id.get_mut() = 0;
        *self.last_innovation.get_mut() = 0;
    }

    pub(crate) fn neuron_id(&self) -> NeuronId {
        NeuronId(self.next_id())
    }

    pub(crate) fn synapse_id(&self) -> SynapseId {
        SynapseId(self.next_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn counters_start_at_one() {
        let ids = IdAllocator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_innovation(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.last_innovation(), 1);
    }

    #[test]
    fn counters_are_independent() {
        let ids = IdAllocator::new();
        for _ in 0..5 {
            ids.next_id();
        }
        assert_eq!(ids.next_innovation(), 1);
        assert_eq!(ids.last_id(), 5);
    }

    #[test]
    fn starting_at_continues() {
        let ids = IdAllocator::starting_at(10, 20);
        assert_eq!(ids.next_id(), 11);
        assert_eq!(ids.next_innovation(), 21);
    }

    #[test]
    fn reset_rewinds() {
        let mut ids = IdAllocator::new();
        ids.next_id();
        ids.next_innovation();
        ids.reset();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_innovation(), 1);
    }

    #[test]
    fn concurrent_allocation_is_unique() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 1000;

        let ids = Arc::new(IdAllocator::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|_| ids.next_innovation())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let issued = handle.join().unwrap();
            assert!(issued.windows(2).all(|w| w[0] < w[1]));
            for innovation in issued {
                assert!(seen.insert(innovation), "duplicate innovation {}", innovation);
            }
        }
        assert_eq!(seen.len(), THREADS * PER_THREAD);
        assert_eq!(ids.last_innovation(), (THREADS * PER_THREAD) as u64);
    }
}
