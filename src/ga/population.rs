//! Random chromosome generation and initial population.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::MtspError;
use crate::models::{AgentCount, Chromosome, MtspProblem};

use super::operators::random_depots;
use super::partition::random_breakpoints;

/// Draws breakpoints for `problem`, choosing a fresh agent count in
/// `1..=max_agents` when the shape's agent count is variable.
pub fn random_chromosome_breakpoints<R: Rng>(
    problem: &MtspProblem,
    rng: &mut R,
) -> Result<Vec<usize>, MtspError> {
    let shape = problem.shape();
    let agents = match shape.agents {
        AgentCount::Single => return Ok(Vec::new()),
        AgentCount::Fixed(k) => k,
        AgentCount::Variable => rng.random_range(1..=problem.max_agents()),
    };
    random_breakpoints(problem.free_cities().len(), agents, shape.min_tour, rng)
}

/// Creates a uniformly random valid chromosome.
pub fn random_chromosome<R: Rng>(
    problem: &MtspProblem,
    rng: &mut R,
) -> Result<Chromosome, MtspError> {
    let mut route = problem.free_cities().to_vec();
    route.shuffle(rng);

    let breakpoints = random_chromosome_breakpoints(problem, rng)?;
    let depots = if problem.shape().has_depots() {
        random_depots(problem.depot_pool(), rng)
    } else {
        Vec::new()
    };
    Ok(Chromosome::new(route, breakpoints, depots))
}

/// Builds `size` chromosomes: the valid `seed` first (if any), random
/// chromosomes for the rest.
///
/// An invalid seed is discarded and replaced by a random chromosome.
pub fn initial_population<R: Rng>(
    problem: &MtspProblem,
    size: usize,
    seed: Option<&Chromosome>,
    rng: &mut R,
) -> Result<Vec<Chromosome>, MtspError> {
    let mut population = Vec::with_capacity(size);
    if let Some(seed) = seed.filter(|_| size > 0) {
        match problem.validate_chromosome(seed) {
            Ok(()) => population.push(seed.clone()),
            Err(e) => tracing::warn!(error = %e, "discarding invalid seed chromosome"),
        }
    }
    while population.len() < size {
        population.push(random_chromosome(problem, rng)?);
    }
    Ok(population)
}
