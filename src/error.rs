//! Error types.

/// Errors raised before or while setting up an optimization run.
///
/// Cancellation is not an error: a cancelled run still returns a result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MtspError {
    /// Malformed or inconsistent inputs (matrix size, population size,
    /// agent count versus available cities, invalid chromosome).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No partition of `positions` into `agents` segments of at least
    /// `min_tour` elements exists.
    #[error(
        "infeasible partition: {agents} segments of at least {min_tour} cannot cover {positions} positions"
    )]
    InfeasibleConstraint {
        /// Number of route positions to partition.
        positions: usize,
        /// Requested number of segments.
        agents: usize,
        /// Minimum segment length.
        min_tour: usize,
    },
}

impl MtspError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
