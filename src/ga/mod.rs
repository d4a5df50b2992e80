//! Mutation-only tournament genetic algorithm for open-path salesman problems.
//!
//! - [`random_breakpoints`] — Uniform constrained partition of a route into agent segments
//! - [`RouteMutation`] — Flip, swap and slide route operators
//! - [`initial_population`] / [`random_chromosome`] — Population seeding
//! - [`evaluate_population`] — Whole-generation fitness
//! - [`next_generation`] — Tournament groups and deterministic offspring slots
//! - [`MtspRunner`] — Generation loop with cancellation and progress reporting

mod config;
mod control;
mod evaluate;
mod evolve;
mod operators;
mod partition;
mod population;
mod runner;

pub use config::MtspConfig;
pub use control::{CancelToken, Progress, ProgressSink};
pub use evaluate::{best_index, evaluate_population};
pub use evolve::{breed, next_generation, slot_plan, tournament_winners, SlotPlan};
pub use operators::{random_depots, random_range_pair, RouteMutation};
pub use partition::random_breakpoints;
pub use population::{initial_population, random_chromosome, random_chromosome_breakpoints};
pub use runner::{MtspResult, MtspRunner, RunStatus};
