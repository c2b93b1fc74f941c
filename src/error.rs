//! Error taxonomy for instance construction, configuration and parsing.

use thiserror::Error;

/// Errors surfaced by the TSP engine.
///
/// Algorithms never fail mid-run once given a valid instance and a
/// validated configuration; every variant here is raised before the
/// search loop starts.
#[derive(Debug, Error)]
pub enum TspError {
    /// The instance has no points.
    #[error("instance contains no points")]
    EmptyInstance,

    /// Two input records share the same id.
    #[error("duplicate point id {id}")]
    DuplicateId { id: i64 },

    /// A coordinate is NaN or infinite.
    #[error("point id {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: i64 },

    /// The coordinate spread is so wide that tour lengths overflow `f64`.
    #[error("coordinate range too large: tour lengths would overflow")]
    CoordinateRange,

    /// A configuration was rejected by `validate()`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A caller-supplied tour violates the closed-permutation invariant.
    #[error("invalid tour: {0}")]
    InvalidTour(String),

    /// Malformed TSPLIB text.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour(message.into())
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
