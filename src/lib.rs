//! # u-mtsp
//!
//! Open-path traveling salesman optimization for one or many agents,
//! driven by a mutation-only tournament genetic algorithm.
//!
//! One engine covers every variant through a traversal [`Shape`](models::Shape):
//! free or fixed start, single, fixed or variable agent count, a minimum
//! number of cities per agent, and optional per-agent depots.
//!
//! ## Modules
//!
//! - [`models`] — Shape, chromosome, problem instance and fitness
//! - [`distance`] — Distance matrix
//! - [`ga`] — Partition sampler, mutation operators, evolution step and runner
//! - [`error`] — Error type

pub mod distance;
pub mod error;
pub mod ga;
pub mod models;

pub use error::MtspError;
