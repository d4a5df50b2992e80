//! Whole-population fitness evaluation.

use rayon::prelude::*;

use crate::models::{Chromosome, MtspProblem};

/// Computes the total distance of every chromosome, in population order.
///
/// Chromosomes are independent, so `parallel` spreads the work across the
/// rayon thread pool; the result is identical either way.
pub fn evaluate_population(
    problem: &MtspProblem,
    population: &[Chromosome],
    parallel: bool,
) -> Vec<f64> {
    if parallel {
        population.par_iter().map(|c| problem.route_cost(c)).collect()
    } else {
        population.iter().map(|c| problem.route_cost(c)).collect()
    }
}

/// Index and value of the minimum fitness; ties go to the first occurrence.
///
/// Returns `None` for an empty slice.
pub fn best_index(fitness: &[f64]) -> Option<(usize, f64)> {
    fitness
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, f)| match best {
            Some((_, b)) if b <= f => best,
            _ => Some((i, f)),
        })
}
