//! Domain model types for open-path salesman problems.
//!
//! Provides the traversal [`Shape`] that selects a problem variant, the
//! [`Chromosome`] encoding, the validated [`MtspProblem`] instance with its
//! fitness function, and decoded [`AgentRoute`]s.

mod chromosome;
mod problem;
mod route;
mod shape;

pub use chromosome::Chromosome;
pub use problem::MtspProblem;
pub use route::AgentRoute;
pub use shape::{AgentCount, Shape, Start};
