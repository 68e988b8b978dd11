//! Error types for value construction.

use thiserror::Error;

/// Result type alias for value operations.
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors that can occur while building values.
///
/// Decoding never fails: unknown shapes are kept as plain maps and lists.
/// These errors only surface from explicit, name-based construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Unknown intrinsic function: {0}")]
    UnknownFunction(String),
}
