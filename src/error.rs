//! Error types for the spatial pooler.
//!
//! This module provides a unified error type for all fallible operations,
//! using the `thiserror` crate for ergonomic error handling.

use thiserror::Error;

/// The main error type for spatial pooler operations.
///
/// Configuration errors surface only from [`crate::SpConfig::validate`] /
/// [`crate::Connections::new`]. Invalid-argument errors surface from
/// [`crate::Connections::compute`] without mutating its receiver. Anything
/// else (out-of-range coordinates, NaN permanences) is a programmer error
/// and panics instead of returning a variant here.
#[derive(Error, Debug)]
pub enum SpError {
    /// `compute` was called before `init`.
    #[error("Connections not initialized - call init() before compute()")]
    NotInitialized,

    /// Input or output bit vector did not match the configured dimensions.
    #[error("invalid input size: expected {expected}, got {actual}")]
    InvalidInputSize {
        /// Expected size
        expected: usize,
        /// Actual size received
        actual: usize,
    },

    /// A configuration value violated one of `SpConfig`'s invariants.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error while (de)serializing an `SpConfig` on behalf of a caller.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized `Result` type for spatial pooler operations.
pub type Result<T> = std::result::Result<T, SpError>;
