//! TripTally Core
//!
//! Domain data model for shared trip expenses.
//!
//! # Architecture
//!
//! - **Exact arithmetic**: all money is `rust_decimal::Decimal`; rounding
//!   happens only at presentation boundaries, never during accumulation
//! - **Stable identifiers**: members and expenses carry string ids that
//!   survive across sessions
//! - **Stale-but-available rates**: a failed rate refresh keeps the previous
//!   table in effect
//!
//! The settlement computation itself lives in the `settlement` crate; this
//! crate only defines the inputs it consumes.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod rates;
pub mod book;
pub mod error;

// Re-exports
pub use error::{Error, Result};
pub use types::{Currency, Expense, ExpenseId, Member, MemberId};
pub use rates::{RateSource, RateTable};
pub use book::ExpenseBook;
