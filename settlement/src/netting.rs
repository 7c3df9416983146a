//! Debt netting
//!
//! Reduces a per-member balance map to a short sequence of settling
//! transfers via greedy largest-debtor/largest-creditor matching.
//!
//! # Algorithm
//!
//! 1. Partition members into debtors (balance below -tolerance) and
//!    creditors (balance above tolerance)
//! 2. Sort debtors most-negative first and creditors most-positive first,
//!    ties broken by member id
//! 3. Repeatedly transfer `min(|debtor|, creditor)` between the current
//!    heads, advancing whichever side lands within tolerance of zero
//! 4. Stop when either side runs out
//!
//! # Example
//!
//! ```text
//! Balances:
//!   A: +3840   B: -1920   C: -1920
//!
//! Transfers:
//!   B pays A: 1920
//!   C pays A: 1920
//! ```
//!
//! Greedy matching keeps the transfer count small but is not a
//! minimum-transfer solver; the exact version is a set-partition problem
//! and out of proportion for a trip ledger.

use crate::types::{Balances, Transfer};
use rust_decimal::Decimal;
use trip_core::MemberId;

/// Default residual below which a balance counts as settled (base units)
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Netting engine
#[derive(Debug, Clone)]
pub struct NettingEngine {
    /// Residual tolerance in base-currency units (must be positive)
    tolerance: Decimal,
}

impl Default for NettingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl NettingEngine {
    /// Create new netting engine
    pub fn new(tolerance: Decimal) -> Self {
        Self { tolerance }
    }

    /// Residual tolerance
    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Compute the transfer sequence settling a balance map.
    ///
    /// Members within tolerance of zero are left untouched. Applying the
    /// returned transfers in order drives every balance to within tolerance
    /// of zero; each amount is strictly positive. Output is deterministic
    /// for identical balances regardless of map iteration order.
    pub fn compute_transfers(&self, balances: &Balances) -> Vec<Transfer> {
        // Partition; near-zero members need no transfer at all
        let mut debtors: Vec<(MemberId, Decimal)> = balances
            .iter()
            .filter(|(_, b)| **b < -self.tolerance)
            .map(|(id, b)| (id.clone(), *b))
            .collect();

        let mut creditors: Vec<(MemberId, Decimal)> = balances
            .iter()
            .filter(|(_, b)| **b > self.tolerance)
            .map(|(id, b)| (id.clone(), *b))
            .collect();

        // Largest first, with id tie-breaks so the sequence is reproducible
        debtors.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        creditors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut transfers = Vec::new();
        let mut d = 0;
        let mut c = 0;

        while d < debtors.len() && c < creditors.len() {
            let amount = debtors[d].1.abs().min(creditors[c].1);

            transfers.push(Transfer {
                from: debtors[d].0.clone(),
                to: creditors[c].0.clone(),
                amount,
            });

            debtors[d].1 += amount;
            creditors[c].1 -= amount;

            // Both cursors may advance when the pair settles exactly
            if debtors[d].1.abs() < self.tolerance {
                d += 1;
            }
            if creditors[c].1.abs() < self.tolerance {
                c += 1;
            }
        }

        transfers
    }
}
