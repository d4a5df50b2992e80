//! Generation loop.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::MtspError;
use crate::models::{Chromosome, MtspProblem};

use super::config::MtspConfig;
use super::control::{CancelToken, Progress, ProgressSink};
use super::evaluate::{best_index, evaluate_population};
use super::evolve::next_generation;
use super::population::initial_population;

/// How a run ended. Both outcomes carry a valid result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// The iteration budget was exhausted, even if cancellation was
    /// requested during the final iteration.
    Completed,
    /// The cancel token was set.
    Cancelled,
}

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MtspResult {
    /// Best chromosome seen in any evaluated generation.
    pub best: Chromosome,
    /// Total distance of `best`.
    pub best_distance: f64,
    /// Population minimum of each evaluated generation, after the
    /// configured prior history.
    pub history: Vec<f64>,
    /// Number of generations evaluated in this run.
    pub iterations: usize,
    /// Why the run stopped.
    pub status: RunStatus,
}

/// Executes the mutation-only tournament GA.
///
/// Each iteration evaluates the whole population, updates the best-so-far
/// record on strict improvement, appends the generation minimum to the
/// history, reports progress, and then either stops (budget exhausted or
/// cancelled) or replaces the population with the next generation.
///
/// # Examples
///
/// ```
/// use u_mtsp::distance::DistanceMatrix;
/// use u_mtsp::ga::{MtspConfig, MtspRunner, RunStatus};
/// use u_mtsp::models::{MtspProblem, Shape};
///
/// let points: Vec<(f64, f64)> = (0..6).map(|i| (i as f64, 0.0)).collect();
/// let problem = MtspProblem::new(DistanceMatrix::from_points(&points), Shape::fixed_start_path())
///     .unwrap();
/// let config = MtspConfig::default()
///     .with_population_size(16)
///     .with_num_iterations(200)
///     .with_seed(42);
///
/// let result = MtspRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.status, RunStatus::Completed);
/// assert_eq!(result.history.len(), 200);
/// assert!((result.best_distance - 5.0).abs() < 1e-10);
/// ```
pub struct MtspRunner;

impl MtspRunner {
    /// Runs to completion without progress reporting or cancellation.
    pub fn run(problem: &MtspProblem, config: &MtspConfig) -> Result<MtspResult, MtspError> {
        Self::run_with(problem, config, &CancelToken::new(), &mut |_: &Progress<'_>| {})
    }

    /// Runs with a cancel token and a progress sink.
    ///
    /// Fails only on configuration errors, before the first iteration.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            population = config.population_size,
            iterations = config.num_iterations,
            free_cities = problem.free_cities().len()
        )
    )]
    pub fn run_with<S: ProgressSink>(
        problem: &MtspProblem,
        config: &MtspConfig,
        cancel: &CancelToken,
        sink: &mut S,
    ) -> Result<MtspResult, MtspError> {
        config.validate(problem.shape())?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut population = initial_population(
            problem,
            config.population_size,
            config.initial.as_ref(),
            &mut rng,
        )?;

        let mut history = Vec::with_capacity(config.prior_history.len() + config.num_iterations);
        history.extend_from_slice(&config.prior_history);

        let mut best: Option<(Chromosome, f64)> = None;
        let mut iterations = 0;
        let mut status = RunStatus::Completed;
        tracing::info!("Starting optimization run");

        for iteration in 0..config.num_iterations {
            let fitness = evaluate_population(problem, &population, config.parallel);
            let (index, generation_min) = best_index(&fitness)
                .ok_or_else(|| MtspError::config("population is empty"))?;

            if best.as_ref().map_or(true, |(_, d)| generation_min < *d) {
                tracing::debug!(iteration, distance = generation_min, "New best");
                best = Some((population[index].clone(), generation_min));
            }
            history.push(generation_min);
            iterations = iteration + 1;

            if let Some((chromosome, distance)) = &best {
                sink.report(&Progress {
                    iteration,
                    best_distance: *distance,
                    best: chromosome,
                });
            }

            // A spent budget wins over a cancel raised on the last iteration.
            if iterations == config.num_iterations {
                break;
            }
            if cancel.is_cancelled() {
                status = RunStatus::Cancelled;
                break;
            }

            population = next_generation(problem, &population, &fitness, config.parallel, &mut rng)?;
        }

        let (best, best_distance) =
            best.ok_or_else(|| MtspError::config("no generation was evaluated"))?;
        tracing::info!(iterations, best_distance, status = ?status, "Optimization run finished");

        Ok(MtspResult {
            best,
            best_distance,
            history,
            iterations,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Shape;

    fn line_problem(n: usize, shape: Shape) -> MtspProblem {
        let points: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, 0.0)).collect();
        MtspProblem::new(DistanceMatrix::from_points(&points), shape).expect("valid")
    }

    #[test]
    fn test_rejects_bad_population_size() {
        let problem = line_problem(6, Shape::fixed_agents(2, 1));
        let config = MtspConfig::default().with_population_size(20);
        assert!(matches!(
            MtspRunner::run(&problem, &config),
            Err(MtspError::Configuration(_))
        ));
    }

    #[test]
    fn test_best_is_monotone_and_matches_history() {
        let problem = line_problem(12, Shape::fixed_agents(3, 2));
        let config = MtspConfig::default()
            .with_population_size(32)
            .with_num_iterations(60)
            .with_seed(5);

        let mut bests = Vec::new();
        let mut sink = |p: &Progress<'_>| bests.push(p.best_distance);
        let result = MtspRunner::run_with(&problem, &config, &CancelToken::new(), &mut sink)
            .expect("valid config");

        assert_eq!(bests.len(), 60);
        assert!(bests.windows(2).all(|w| w[1] <= w[0]));
        let history_min = result.history.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(result.best_distance, history_min);
        assert!((problem.route_cost(&result.best) - result.best_distance).abs() < 1e-10);
        assert!(problem.validate_chromosome(&result.best).is_ok());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let problem = line_problem(10, Shape::variable_agents(2));
        let config = MtspConfig::default()
            .with_population_size(16)
            .with_num_iterations(25)
            .with_seed(99);
        let a = MtspRunner::run(&problem, &config).expect("ok");
        let b = MtspRunner::run(&problem, &config.clone().with_parallel(false)).expect("ok");
        assert_eq!(a, b);
    }

    #[test]
    fn test_prior_history_is_prefixed() {
        let problem = line_problem(5, Shape::open_path());
        let config = MtspConfig::default()
            .with_population_size(8)
            .with_num_iterations(3)
            .with_seed(1)
            .with_prior_history(vec![10.0, 9.0]);
        let result = MtspRunner::run(&problem, &config).expect("ok");
        assert_eq!(result.history.len(), 5);
        assert_eq!(&result.history[..2], &[10.0, 9.0]);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_valid_seed_bounds_result() {
        let problem = line_problem(8, Shape::fixed_start_path());
        let optimal = Chromosome::path((1..8).collect());
        let config = MtspConfig::default()
            .with_population_size(8)
            .with_num_iterations(1)
            .with_seed(3)
            .with_initial(optimal.clone());
        let result = MtspRunner::run(&problem, &config).expect("ok");
        assert_eq!(result.best, optimal);
        assert!((result.best_distance - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_cancel_from_sink_stops_after_current_iteration() {
        let problem = line_problem(9, Shape::fixed_start_path());
        let config = MtspConfig::default()
            .with_population_size(8)
            .with_num_iterations(100)
            .with_seed(4);
        let token = CancelToken::new();
        let remote = token.clone();
        let mut sink = |p: &Progress<'_>| {
            if p.iteration == 4 {
                remote.cancel();
            }
        };
        let result = MtspRunner::run_with(&problem, &config, &token, &mut sink).expect("ok");
        assert_eq!(result.status, RunStatus::Cancelled);
        assert_eq!(result.iterations, 5);
        assert_eq!(result.history.len(), 5);
    }

    #[test]
    fn test_cancel_on_last_iteration_reports_completed() {
        let problem = line_problem(9, Shape::fixed_start_path());
        let config = MtspConfig::default()
            .with_population_size(8)
            .with_num_iterations(6)
            .with_seed(4);
        let token = CancelToken::new();
        let remote = token.clone();
        let mut sink = |p: &Progress<'_>| {
            if p.iteration == 5 {
                remote.cancel();
            }
        };
        let result = MtspRunner::run_with(&problem, &config, &token, &mut sink).expect("ok");
        assert!(token.is_cancelled());
        assert_eq!(result.status, RunStatus::Completed);
        assert_eq!(result.iterations, 6);
    }
}
