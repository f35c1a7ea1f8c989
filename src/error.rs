//! Error types for table generation
//!
//! The generation core (samplers, skew detection, partitioning) returns
//! [`GenError`]. Orchestration code wraps these in `anyhow` with context.

use thiserror::Error;

/// Errors raised by configuration loading and the generation core
#[derive(Debug, Error)]
pub enum GenError {
    /// A required configuration key was not supplied
    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    /// A configuration value could not be parsed or is out of range
    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The sampling interval is empty
    #[error("invalid bound: lower_bound ({lower}) must be less than upper_bound ({upper})")]
    InvalidBound { lower: u64, upper: u64 },

    /// Rejection sampling gave up before collecting enough values
    #[error(
        "cannot satisfy bounds [{lower}, {upper}]: collected {collected} of {requested} values in {batches} batches"
    )]
    BoundsUnsatisfiable {
        lower: u64,
        upper: u64,
        requested: usize,
        collected: usize,
        batches: u64,
    },

    /// Partitioning needs at least one node
    #[error("node count must be at least 1, got {0}")]
    InvalidNodeCount(usize),
}

impl GenError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
