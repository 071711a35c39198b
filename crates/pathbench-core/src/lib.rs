//! Shared error types for the pathbench crates.
//!
//! This crate provides the foundational types used across all pathbench
//! crates. It has no internal pathbench dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias

pub mod error;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
