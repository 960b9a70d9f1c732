mod species;

use species::Species;
use toponeat::genomics::{GenomeError, IdAllocator, NeatConfig, Organism, OrganismConfig};
use toponeat::UniformSource;

use log::{debug, info, warn};
use rand::{thread_rng, Rng};
use rayon::prelude::*;
use serde::Deserialize;

use std::error::Error;
use std::num::NonZeroUsize;
use std::{env, fs};

const ERROR_MARGIN: f64 = 0.3;
const SOLVED_FITNESS: f64 = 16.0;

/// Bias input, the two operands, and the expected answer.
const XOR_CASES: [([f64; 3], f64); 4] = [
    ([1.0, 0.0, 0.0], 0.0),
    ([1.0, 0.0, 1.0], 1.0),
    ([1.0, 1.0, 0.0], 1.0),
    ([1.0, 1.0, 1.0], 0.0),
];

#[derive(Debug, Deserialize)]
struct RunConfig {
    population_size: NonZeroUsize,
    generations: usize,
    /// Fraction of each species allowed to reproduce.
    survival_threshold: f64,
    /// Time steps run per XOR case, so that signals
    /// delayed by recurrent synapses are taken into account.
    evaluation_steps: NonZeroUsize,
    neat: NeatConfig,
}

fn evaluate_xor(
    organism: &mut Organism,
    activation: fn(f64) -> f64,
    steps: usize,
) -> Result<f64, GenomeError> {
    let mut total_error = 0.0;
    for (input, expected) in XOR_CASES.iter() {
        organism.reset_state();
        let mut output = 0.0;
        for _ in 0..steps {
            output = organism.process(input, activation)?[0];
        }
        // Non-finite outputs count as fully wrong.
        let error = if output.is_finite() {
            (output - expected).abs()
        } else {
            1.0
        };
        if error >= ERROR_MARGIN {
            total_error += error;
        }
    }
    Ok((4.0 - total_error).powi(2))
}

/// Mutates every genome in parallel. All workers
/// draw ids and innovations from the same allocator.
fn mutate_all(
    population: &mut [Organism],
    config: &OrganismConfig,
    ids: &IdAllocator,
) -> Result<(), GenomeError> {
    population
        .par_iter_mut()
        .try_for_each_init(UniformSource::thread, |rng, organism| {
            organism.mutate(config, ids, rng).map(|_| ())
        })
}

/// Breeds the next generation. The champion is carried over
/// unchanged; every species then gets a share of the remaining
/// slots proportional to its mean fitness.
fn reproduce(
    population: &[Organism],
    species: &[Species],
    champion: &Organism,
    config: &RunConfig,
) -> Result<Vec<Organism>, GenomeError> {
    let mut rng = thread_rng();
    let size = config.population_size.get();
    let slots = (size - 1) as f64;
    let total_fitness: f64 = species.iter().map(|s| s.shared_fitness(population)).sum();

    let mut offspring = Vec::with_capacity(size);
    offspring.push(champion.clone());
    for s in species {
        let share = if total_fitness > 0.0 {
            s.shared_fitness(population) / total_fitness
        } else {
            1.0 / species.len() as f64
        };
        let parents = s.survivors(population, config.survival_threshold);
        for _ in 0..(share * slots).round() as usize {
            let first = &population[parents[rng.gen_range(0..parents.len())]];
            let second = &population[parents[rng.gen_range(0..parents.len())]];
            offspring.push(Organism::mate(first, second)?);
        }
    }
    // Rounding may leave slots open.
    while offspring.len() < size {
        offspring.push(Organism::mate(champion, champion)?);
    }
    offspring.truncate(size);
    Ok(offspring)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/config.ron").to_string());
    let config: RunConfig = ron::from_str(&fs::read_to_string(&path)?)?;
    config.neat.validate()?;
    if !(0.0..=1.0).contains(&config.survival_threshold) {
        return Err(format!(
            "survival_threshold must be in the range [0, 1], got {}",
            config.survival_threshold
        )
        .into());
    }
    info!("loaded configuration from {}", path);

    let ids = IdAllocator::new();
    let activation = config.neat.organism.activation.function();
    let steps = config.evaluation_steps.get();
    let (input_count, output_count) = (NonZeroUsize::new(3).unwrap(), NonZeroUsize::new(1).unwrap());

    let mut population: Vec<Organism> = (0..config.population_size.get())
        .map(|_| Organism::new(input_count, output_count, &ids))
        .collect();
    mutate_all(&mut population, &config.neat.organism, &ids)?;

    let mut champion = population[0].clone();
    for generation in 0..config.generations {
        population.par_iter_mut().for_each(|organism| {
            let fitness = evaluate_xor(organism, activation, steps).unwrap_or_else(|e| {
                warn!("discarding genome: {}", e);
                0.0
            });
            organism.set_fitness(fitness);
        });

        if let Some(best) = population
            .iter()
            .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
        {
            if best.fitness() > champion.fitness() {
                champion = best.clone();
            }
        }

        let species = species::speciate(&population, &config.neat.species);
        info!(
            "generation {}: champion fitness {:.3}, {} species, {} innovations issued",
            generation,
            champion.fitness(),
            species.len(),
            ids.last_innovation()
        );
        debug!(
            "species sizes: {:?}",
            species.iter().map(Species::len).collect::<Vec<_>>()
        );

        if champion.fitness() >= SOLVED_FITNESS {
            info!("solution found in generation {}", generation);
            break;
        }

        population = reproduce(&population, &species, &champion, &config)?;
        mutate_all(&mut population[1..], &config.neat.organism, &ids)?;
    }

    println!("{}", champion);
    for (input, expected) in XOR_CASES.iter() {
        champion.reset_state();
        let mut output = vec![];
        for _ in 0..steps {
            output = champion.process(input, activation)?;
        }
        println!("{:?} -> {:?} (expected {})", &input[1..], output, expected);
    }
    Ok(())
}
