//! Error types for the visibility pipeline
//!
//! This module defines the error types used throughout the crate.
//! Capacity overflows inside the per-frame hot path are NOT errors in
//! the `Result` sense — they clamp and log (see the entity packer).
//! `Error` covers the cold path: construction-time validation and
//! explicit bounded-container pushes.

use std::fmt;

/// Result type for visibility pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Visibility pipeline errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Pipeline settings failed validation (zero cascades, zero budgets, ...)
    InvalidSettings(String),

    /// A bounded container was pushed past its fixed capacity
    CapacityExceeded {
        /// Capacity of the container that rejected the push
        capacity: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSettings(msg) => write!(f, "Invalid settings: {}", msg),
            Error::CapacityExceeded { capacity } => {
                write!(f, "Capacity exceeded: container holds at most {} entries", capacity)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
