// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Dynamath engine failures.
///
/// Numerical degeneracies inside a tick never surface here; they are
/// absorbed by fixed floors. Errors are reserved for construction and
/// for malformed input at the outer boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DynamathError {
    /// Invalid engine configuration (node count, spreads, neighbor count).
    #[error("config error: {0}")]
    Config(String),

    /// Invalid input value (parameters, sensor reading).
    #[error("validation error: {0}")]
    Validation(String),

    /// Array length does not match the declared shape.
    #[error("shape mismatch: expected {expected} values, got {got}")]
    Shape { expected: usize, got: usize },

    /// Inbound command envelope could not be decoded.
    #[error("command error: {0}")]
    Command(String),

    /// Numerical error (NaN/Inf in computation).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type DynamathResult<T> = Result<T, DynamathError>;
