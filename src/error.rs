//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while loading instances, validating configuration, or
/// running the bee colony search.
#[derive(Debug, Error)]
pub enum AbcError {
    /// The run configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The instance has too few customers for an enabled operator.
    #[error("operator {operator} needs at least {required} customers, instance has {actual}")]
    InstanceTooSmall {
        /// Operator name.
        operator: &'static str,
        /// Minimum candidate length the operator can work with.
        required: usize,
        /// Candidate length of the instance.
        actual: usize,
    },

    /// A rejection-sampling loop hit its attempt cap.
    #[error("operator {operator} found no valid positions after {attempts} draws")]
    SamplingExhausted {
        /// Operator name.
        operator: &'static str,
        /// Number of draws attempted.
        attempts: usize,
    },

    /// Roulette selection saw a fitness that cannot be inverted.
    #[error("food source {index} has non-positive fitness {fitness}")]
    NonPositiveFitness {
        /// Population position.
        index: usize,
        /// Offending fitness value.
        fitness: f64,
    },

    /// The problem instance is inconsistent.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// An instance or solution file could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Reading an input file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AbcError>;
