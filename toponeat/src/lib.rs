//! # toponeat
//! Genomes for evolving the topology of neural networks,
//! in the manner of NEAT (NeuroEvolution of Augmenting Topologies).
//!
//! Every gene of an [`Organism`] carries an innovation number
//! drawn from a shared [`IdAllocator`]. Innovation numbers let
//! genomes of different shapes be lined up gene by gene, which
//! is what makes crossover between them meaningful.
//!
//! The crate provides:
//! - structural and weight mutation ([`Organism::mutate`]),
//! - crossover by innovation number ([`Organism::mate`]),
//! - step-wise evaluation of possibly recurrent networks
//!   ([`Organism::process`]).
//!
//! Choosing which organisms survive, and how many, is left
//! to the caller's evolutionary loop.
//!
//! [`Organism`]: crate::genomics::Organism
//! [`IdAllocator`]: crate::genomics::IdAllocator
//! [`Organism::mutate`]: crate::genomics::Organism::mutate
//! [`Organism::mate`]: crate::genomics::Organism::mate
//! [`Organism::process`]: crate::genomics::Organism::process
//!
//! # Example usage
//! ```
//! use toponeat::genomics::{IdAllocator, Organism, OrganismConfig};
//! use toponeat::UniformSource;
//! use std::num::NonZeroUsize;
//!
//! let config = OrganismConfig {
//!     synapse_split_chance: 0.1,
//!     synapse_toggle_chance: 0.01,
//!     synapse_weight_chance: 0.8,
//!     synapse_weight_bound: 5.0,
//!     ..OrganismConfig::zero()
//! };
//! config.validate().unwrap();
//!
//! let ids = IdAllocator::new();
//! let mut rng = UniformSource::thread();
//!
//! let mut first = Organism::new(
//!     NonZeroUsize::new(3).unwrap(),
//!     NonZeroUsize::new(1).unwrap(),
//!     &ids,
//! );
//! let mut second = first.clone();
//! first.mutate(&config, &ids, &mut rng).unwrap();
//! second.mutate(&config, &ids, &mut rng).unwrap();
//!
//! first.set_fitness(1.0);
//! let mut child = Organism::mate(&first, &second).unwrap();
//!
//! let activation = config.activation.function();
//! let output = child.process(&[1.0, 0.0, 1.0], activation).unwrap();
//! assert_eq!(output.len(), 1);
//! ```

pub mod genomics;
pub mod networks;
mod rng;

pub use rng::{RandomSource, UniformSource};

/// Identifier type used to designate historically
/// identical genes for the purposes of genome
/// alignment and genetic tracking.
pub type Innovation = u64;
