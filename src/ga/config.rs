//! Run configuration.
//!
//! [`MtspConfig`] holds the parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use crate::error::MtspError;
use crate::models::{Chromosome, Shape};

/// Configuration for an optimization run.
///
/// # Defaults
///
/// ```
/// use u_mtsp::ga::MtspConfig;
///
/// let config = MtspConfig::default();
/// assert_eq!(config.population_size, 160);
/// assert_eq!(config.num_iterations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_mtsp::ga::MtspConfig;
/// use u_mtsp::models::Shape;
///
/// let config = MtspConfig::default()
///     .with_population_size(64)
///     .with_num_iterations(500)
///     .with_seed(42);
/// assert!(config.validate(&Shape::fixed_agents(3, 2)).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MtspConfig {
    /// Number of chromosomes per generation.
    ///
    /// Must be a positive multiple of the shape's group size (4, 8 or 16).
    pub population_size: usize,

    /// Number of generations to evaluate.
    pub num_iterations: usize,

    /// Whether to evaluate and breed in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// A known solution placed first in the initial population.
    ///
    /// Silently replaced by a random chromosome if it is not valid for the
    /// problem.
    pub initial: Option<Chromosome>,

    /// History from an earlier run, prepended to this run's history.
    pub prior_history: Vec<f64>,
}

impl Default for MtspConfig {
    fn default() -> Self {
        Self {
            population_size: 160,
            num_iterations: 1000,
            parallel: true,
            seed: None,
            initial: None,
            prior_history: Vec::new(),
        }
    }
}

impl MtspConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_num_iterations(mut self, n: usize) -> Self {
        self.num_iterations = n;
        self
    }

    /// Enables or disables parallel evaluation and breeding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seeds the initial population with a known chromosome.
    pub fn with_initial(mut self, chromosome: Chromosome) -> Self {
        self.initial = Some(chromosome);
        self
    }

    /// Continues the distance history of an earlier run.
    pub fn with_prior_history(mut self, history: Vec<f64>) -> Self {
        self.prior_history = history;
        self
    }

    /// Validates the configuration against a problem shape.
    pub fn validate(&self, shape: &Shape) -> Result<(), MtspError> {
        let group = shape.group_size();
        if self.population_size == 0 || self.population_size % group != 0 {
            return Err(MtspError::config(format!(
                "population_size {} must be a positive multiple of {group}",
                self.population_size
            )));
        }
        if self.num_iterations == 0 {
            return Err(MtspError::config("num_iterations must be at least 1"));
        }
        Ok(())
    }
}
