//! Tournament selection and mutation-only reproduction.
//!
//! # Generation step
//!
//! 1. Shuffle the population indices and cut them into groups of `G`
//!    (the shape's group size).
//! 2. The lowest-fitness member of each group wins (first in shuffled order
//!    on ties).
//! 3. Each winner yields exactly `G` offspring sharing one random range
//!    `[i, j]`: slot `s` applies `RouteMutation::ALL[s % 4]`, regenerates the
//!    breakpoints when bit 2 of `s` is set (shapes with breakpoints), and
//!    regenerates the depots on the next bit (shapes with depots). Slot 0 is
//!    always an exact clone.
//! 4. The offspring of all groups, in group order, form the next generation.
//!
//! There is no crossover and no elitism inside the population.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::MtspError;
use crate::models::{Chromosome, MtspProblem, Shape};

use super::operators::{random_depots, random_range_pair, RouteMutation};
use super::population::random_chromosome_breakpoints;

/// What one offspring slot does to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPlan {
    /// Route mutation applied over the group's shared range.
    pub mutation: RouteMutation,
    /// Whether the breakpoints are redrawn.
    pub new_breakpoints: bool,
    /// Whether the depot assignment is redrawn.
    pub new_depots: bool,
}

/// Returns the plan for offspring `slot` (`0..shape.group_size()`).
pub fn slot_plan(shape: &Shape, slot: usize) -> SlotPlan {
    let mut combo = slot / RouteMutation::ALL.len();
    let new_breakpoints = shape.has_breakpoints() && combo % 2 == 1;
    if shape.has_breakpoints() {
        combo /= 2;
    }
    let new_depots = shape.has_depots() && combo % 2 == 1;
    SlotPlan {
        mutation: RouteMutation::ALL[slot % RouteMutation::ALL.len()],
        new_breakpoints,
        new_depots,
    }
}

/// Shuffles the population into groups of `group_size` and returns the
/// index of each group's winner, in group order.
pub fn tournament_winners<R: Rng>(fitness: &[f64], group_size: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.shuffle(rng);
    order
        .chunks(group_size)
        .filter_map(|group| {
            group
                .iter()
                .copied()
                .reduce(|best, i| if fitness[i] < fitness[best] { i } else { best })
        })
        .collect()
}

/// Produces the full offspring set of one tournament winner.
pub fn breed<R: Rng>(
    problem: &MtspProblem,
    parent: &Chromosome,
    rng: &mut R,
) -> Result<Vec<Chromosome>, MtspError> {
    let shape = problem.shape();
    let (i, j) = random_range_pair(parent.len(), rng);

    (0..shape.group_size())
        .map(|slot| -> Result<Chromosome, MtspError> {
            let plan = slot_plan(shape, slot);
            let mut child = parent.clone();
            plan.mutation.apply(child.route_mut(), i, j);
            if plan.new_breakpoints {
                child.set_breakpoints(random_chromosome_breakpoints(problem, rng)?);
            }
            if plan.new_depots {
                child.set_depots(random_depots(problem.depot_pool(), rng));
            }
            Ok(child)
        })
        .collect()
}

/// Builds the next generation from the current one.
///
/// Writes into a fresh buffer; `population` is only read. Each group breeds
/// from its own sub-seed drawn from `rng`, so the result does not depend on
/// `parallel`.
pub fn next_generation<R: Rng>(
    problem: &MtspProblem,
    population: &[Chromosome],
    fitness: &[f64],
    parallel: bool,
    rng: &mut R,
) -> Result<Vec<Chromosome>, MtspError> {
    let group_size = problem.shape().group_size();
    if population.len() != fitness.len() {
        return Err(MtspError::config(format!(
            "{} fitness values for {} chromosomes",
            fitness.len(),
            population.len()
        )));
    }
    if population.len() % group_size != 0 {
        return Err(MtspError::config(format!(
            "population of {} is not a multiple of group size {group_size}",
            population.len()
        )));
    }

    let winners = tournament_winners(fitness, group_size, rng);
    let seeds: Vec<u64> = winners.iter().map(|_| rng.random()).collect();

    let breed_group = |(&winner, &seed): (&usize, &u64)| {
        let mut group_rng = StdRng::seed_from_u64(seed);
        breed(problem, &population[winner], &mut group_rng)
    };
    let groups: Vec<Vec<Chromosome>> = if parallel {
        winners
            .par_iter()
            .zip(&seeds)
            .map(breed_group)
            .collect::<Result<_, _>>()?
    } else {
        winners
            .iter()
            .zip(&seeds)
            .map(breed_group)
            .collect::<Result<_, _>>()?
    };

    Ok(groups.into_iter().flatten().collect())
}
