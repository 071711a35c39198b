//! Error types for pathbench operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all pathbench crates. Uses `thiserror` for derive macros.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in pathbench operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid generator, benchmark, or configuration parameters.
    ///
    /// Raised before any graph is built or mutated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// More distinct candidates were requested than the pool holds.
    #[error("Sampling exhausted: requested {requested} candidates but only {available} remain")]
    SamplingExhausted {
        /// Number of candidates requested.
        requested: usize,
        /// Number of candidates left in the pool.
        available: usize,
    },

    /// A node was not found in the graph.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A negative-weight cycle was reachable from the source.
    #[error("Negative cycle detected")]
    NegativeCycle,

    /// I/O error tied to a specific path.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error for an item of the given kind.
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{kind} '{id}'"))
    }

    /// Create a sampling exhaustion error.
    pub fn sampling_exhausted(requested: usize, available: usize) -> Self {
        Self::SamplingExhausted {
            requested,
            available,
        }
    }

    /// Wrap an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Whether this error reports invalid parameters.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type alias using pathbench's Error type.
pub type Result<T> = std::result::Result<T, Error>;
