//! Trip Settlement Engine
//!
//! Turns a pile of multi-currency shared expenses into per-member net
//! balances and a short list of settling transfers.
//!
//! # Architecture
//!
//! The computation runs in two pure stages over immutable inputs:
//!
//! 1. **Balance**: convert each expense into the base accounting currency
//!    and accumulate each member's net position (paid minus owed share)
//! 2. **Netting**: greedily match the largest debtors against the largest
//!    creditors into a small set of transfers that zero every balance
//!
//! [`SettlementEngine`] wraps both stages with a validated mutation surface
//! (roster, expense book, rate table) and recomputes a fresh
//! [`SettlementPlan`] on demand; it owns no derived state.
//!
//! # Invariants
//!
//! - Money conservation: with every payer on the roster, balances sum to
//!   zero up to `Decimal` division residue, far below the netting tolerance
//! - Deterministic output: identical inputs yield an identical transfer
//!   sequence, independent of map iteration order
//! - Every emitted transfer has a strictly positive amount
//!
//! # Example
//!
//! ```text
//! Expenses (base JPY):
//!   A pays 1000 JPY, split A+B
//!   A pays  300 HKD (rate 19.2), split A+B+C
//!
//! Balances:
//!   A: +4340   B: -2420   C: -1920
//!
//! Transfers:
//!   B pays A: 2420
//!   C pays A: 1920
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod balance;
pub mod netting;
pub mod engine;
pub mod config;
pub mod error;

// Re-exports
pub use error::{Error, Result};
pub use types::*;
pub use balance::BalanceEngine;
pub use netting::NettingEngine;
pub use config::Config;
pub use engine::SettlementEngine;
