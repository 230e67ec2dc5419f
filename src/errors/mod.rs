use thiserror::Error;

/// Failure of the bracketed root finder in `rating::solver`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("root finder did not converge within {max_iterations} iterations (bracket width {bracket_width})")]
    MaxIterations {
        max_iterations: usize,
        bracket_width: f64,
    },
    #[error("bracket endpoints do not enclose a sign change")]
    InvalidBracket,
}

/// Errors surfaced by the rating engines.
///
/// The engines are pure: they either return two valid new states or fail
/// outright. Non-convergence indicates numerically pathological inputs and
/// is never swallowed.
#[derive(Debug, Error)]
pub enum RatingError {
    #[error("volatility update failed to converge: {0}")]
    NonConvergence(#[from] SolverError),
    #[error("invalid rating state: {0}")]
    InvalidState(String),
}
