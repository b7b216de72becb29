//! Error types for quilt placement.

use thiserror::Error;

use crate::topology::Lattice;

/// Result type for quilt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or solving a quilt.
///
/// Running out of solutions is not an error: see [`crate::engine::Solve::Infeasible`]
/// and [`crate::diversify::StopReason::Exhausted`].
#[derive(Debug, Error)]
pub enum Error {
    /// A lattice dimension is zero
    #[error("quilt dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// No colors were given
    #[error("color catalog is empty")]
    EmptyCatalog,

    /// A color would never be placed
    #[error("color '{name}' has a count of zero")]
    ZeroCount { name: String },

    /// Color counts do not cover the quilt exactly
    #[error("color counts sum to {actual} but the quilt has {expected} squares")]
    CountMismatch { expected: usize, actual: usize },

    /// Row/column outside a lattice
    #[error("({row}, {col}) is outside the {lattice} lattice")]
    OutOfRange { lattice: Lattice, row: usize, col: usize },

    /// Flat square index outside the quilt
    #[error("square index {index} is outside a quilt of {square_count} squares")]
    IndexOutOfRange { index: usize, square_count: usize },

    /// Malformed `name:count:display` color argument
    #[error("invalid color spec: {0}")]
    InvalidColorSpec(String),

    /// The solving backend failed or answered with something unusable
    #[error("engine error: {0}")]
    Engine(String),

    /// A solve call ran past its deadline
    #[error("solver timed out after {accepted} accepted solution(s)")]
    Timeout { accepted: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error means the quilt configuration itself is unusable.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidDimensions { .. }
                | Error::EmptyCatalog
                | Error::ZeroCount { .. }
                | Error::CountMismatch { .. }
                | Error::InvalidColorSpec(_)
                | Error::Json(_)
        )
    }
}
