//! Run control: cancellation and progress reporting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::models::Chromosome;

/// A cloneable cancellation flag shared between a run and its caller.
///
/// The runner polls it once per iteration, after the generation has been
/// fully evaluated, so the reported best always comes from a complete
/// generation.
///
/// # Examples
///
/// ```
/// use u_mtsp::ga::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Snapshot passed to a [`ProgressSink`] after each iteration.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Zero-based iteration index within this run.
    pub iteration: usize,
    /// Best distance found so far.
    pub best_distance: f64,
    /// Chromosome achieving `best_distance`.
    pub best: &'a Chromosome,
}

/// Receives one [`Progress`] notification per iteration.
///
/// Implemented for any `FnMut(&Progress)` closure.
pub trait ProgressSink {
    /// Called after iteration `progress.iteration` has been evaluated.
    fn report(&mut self, progress: &Progress<'_>);
}

impl<F> ProgressSink for F
where
    F: FnMut(&Progress<'_>),
{
    fn report(&mut self, progress: &Progress<'_>) {
        self(progress)
    }
}
