//! Error types for the trip data model

use thiserror::Error;

/// Result type for trip-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trip data model errors
#[derive(Error, Debug)]
pub enum Error {
    /// Expense failed validation (non-positive amount, empty split, etc.)
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),

    /// Referenced member is not on the roster
    #[error("Unknown member: {0}")]
    UnknownMember(String),

    /// Expense not found
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    /// Expense id already present in the book
    #[error("Duplicate expense: {0}")]
    DuplicateExpense(String),

    /// Exchange rate rejected (non-positive, or base currency override)
    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    /// Rate source failed to produce a table
    #[error("Rate source error: {0}")]
    RateSource(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
