//! Error types for the ranking computation.
//!
//! Every failure here is a local, non-recoverable condition for the
//! computation in progress: the algorithm is deterministic, so retrying
//! cannot change the outcome, and no partial results are returned.

use thiserror::Error;

/// Errors surfaced by matrix construction, vector arithmetic, and the
/// power-iteration engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// The dense matrix input was empty or ragged.
    #[error("malformed matrix: {reason}")]
    MalformedMatrix { reason: String },

    /// An elementwise vector operation received vectors of unequal length.
    #[error("vector length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// The propagated score mass had zero 1-norm, so normalization would
    /// divide by zero.
    #[error("degenerate distribution: zero-norm score mass at iteration {iteration}")]
    DegenerateDistribution { iteration: usize },

    /// The convergence threshold was not reached within the iteration bound.
    #[error(
        "power iteration did not converge within {max_iterations} iterations \
         (last delta {last_delta:e})"
    )]
    NonConvergent {
        max_iterations: usize,
        last_delta: f64,
    },
}

impl RankError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMatrix {
            reason: reason.into(),
        }
    }
}
