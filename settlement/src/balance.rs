//! Balance computation
//!
//! Folds heterogeneous-currency expenses into per-member net positions in
//! the base accounting currency.
//!
//! # Algorithm
//!
//! 1. Seed a zero position for every roster member
//! 2. Convert each expense into base units (absent rate reads as 1)
//! 3. Credit the full converted amount to the payer
//! 4. Debit an equal share from every member in the split list
//!
//! # Example
//!
//! ```text
//! 300 HKD (rate 19.2) paid by A, split A+B+C:
//!   amount_in_base = 5760
//!   share          = 1920
//!
//! Positions:
//!   A: +5760 paid, -1920 share → net +3840
//!   B:     0 paid, -1920 share → net -1920
//!   C:     0 paid, -1920 share → net -1920
//! ```
//!
//! The payer is credited in full even when not in the split list. All
//! arithmetic is `Decimal`; with every payer on the roster, the resulting
//! balances sum to zero up to the division residue of non-divisible shares
//! (orders of magnitude below the netting tolerance).

use crate::{types::MemberPosition, Balances, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use trip_core::{Error as CoreError, Expense, Member, MemberId, RateTable};

/// Balance engine
#[derive(Debug, Clone)]
pub struct BalanceEngine {
    /// Reject expenses referencing members missing from the roster
    strict_members: bool,
}

impl BalanceEngine {
    /// Create new balance engine
    pub fn new(strict_members: bool) -> Self {
        Self { strict_members }
    }

    /// Compute per-member positions for an expense set.
    ///
    /// Every roster member gets a position, including members with no
    /// expenses. In lenient mode an unknown `split_with` id is skipped and
    /// an unknown payer's credit is dropped (which breaks conservation for
    /// that expense); in strict mode both are errors.
    pub fn compute_positions(
        &self,
        expenses: &[Expense],
        members: &[Member],
        rates: &RateTable,
    ) -> Result<HashMap<MemberId, MemberPosition>> {
        // Step 1: Seed a position for every roster member
        let mut positions: HashMap<MemberId, MemberPosition> = members
            .iter()
            .map(|m| (m.id.clone(), MemberPosition::new(m.id.clone())))
            .collect();

        for expense in expenses {
            // Division guard; the engine facade validates this at the door
            if expense.split_with.is_empty() {
                return Err(CoreError::InvalidExpense(format!(
                    "expense {} has an empty split list",
                    expense.id
                ))
                .into());
            }

            // Step 2: Convert into base units
            let amount_in_base = rates.to_base(expense.amount, expense.currency);
            let share = amount_in_base / Decimal::from(expense.split_with.len());

            // Step 3: Credit the payer in full
            match positions.get_mut(&expense.paid_by) {
                Some(position) => position.credit(amount_in_base),
                None if self.strict_members => {
                    return Err(CoreError::UnknownMember(expense.paid_by.to_string()).into());
                }
                None => {
                    tracing::warn!(
                        "Dropping credit of {} for unknown payer {} (expense {})",
                        amount_in_base,
                        expense.paid_by,
                        expense.id
                    );
                }
            }

            // Step 4: Debit each split member's share
            for member in &expense.split_with {
                match positions.get_mut(member) {
                    Some(position) => position.debit(share),
                    None if self.strict_members => {
                        return Err(CoreError::UnknownMember(member.to_string()).into());
                    }
                    None => {
                        tracing::debug!(
                            "Skipping share for unknown member {} (expense {})",
                            member,
                            expense.id
                        );
                    }
                }
            }
        }

        Ok(positions)
    }

    /// Compute net balances for an expense set.
    ///
    /// Positive = net creditor, negative = net debtor, in base-currency
    /// units.
    pub fn compute_balances(
        &self,
        expenses: &[Expense],
        members: &[Member],
        rates: &RateTable,
    ) -> Result<Balances> {
        let positions = self.compute_positions(expenses, members, rates)?;
        Ok(positions.into_iter().map(|(id, p)| (id, p.net)).collect())
    }
}
