//! Error types raised by generators and their configuration.

use std::time::Duration;

use thiserror::Error;

/// Raised when a generator is asked to shrink a value outside its domain.
///
/// This is an integration error: the caller handed a generator a value it
/// could never have produced. It is never retried or swallowed by the
/// combinators; it propagates straight back to whoever called `shrink`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{generator} generator cannot shrink {value}: value is outside its domain")]
pub struct DomainError {
    /// Label of the generator that rejected the value
    pub generator: &'static str,
    /// Debug rendering of the rejected payload
    pub value: String,
}

impl DomainError {
    /// Create a domain error for the given generator label and payload
    pub fn new(generator: &'static str, value: impl std::fmt::Debug) -> Self {
        Self {
            generator,
            value: format!("{:?}", value),
        }
    }
}

/// Construction-time configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Integer range with `min > max`
    #[error("Invalid integer range: [{min}, {max}] (min must be <= max)")]
    InvalidRange { min: i64, max: i64 },

    /// Character range with `lo > hi`
    #[error("Invalid character range: [{lo:?}, {hi:?}] (lo must be <= hi)")]
    InvalidCharRange { lo: char, hi: char },

    /// Length bounds with `min > max`
    #[error("Invalid length bounds: [{min}, {max}] (min must be <= max)")]
    InvalidLength { min: usize, max: usize },

    /// Choice among zero values
    #[error("Elements generator needs at least one value")]
    EmptyElements,

    /// Generation run of zero iterations
    #[error("Invalid iterations count: {0} (must be > 0)")]
    InvalidIterations(usize),

    /// Initial size above the maximum size
    #[error("Invalid size schedule: initial size {initial} exceeds max size {max}")]
    InvalidSize { initial: usize, max: usize },

    /// Shrink budget of zero steps
    #[error("Invalid shrink step budget: {0} (must be > 0)")]
    InvalidShrinkSteps(usize),

    /// Shrink timeout of zero
    #[error("Invalid shrink timeout: {0:?} (must be > 0)")]
    InvalidTimeout(Duration),
}
