//! The module contains the error the engine can throw.
//!
//! Filtering and aggregation are total functions and never fail; the only
//! fallible operations are the ones turning user or server text into domain
//! values:
//!
//! - [`InvalidInput`] thrown when an amount, category, description or date
//!   does not satisfy the record invariants.
//!
//!  [`InvalidInput`]: EngineError::InvalidInput
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
