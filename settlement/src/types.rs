//! Core types for the settlement computation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use trip_core::{Currency, MemberId};
use uuid::Uuid;

/// Per-member balance map in base-currency units.
///
/// Positive = net creditor (is owed money), negative = net debtor.
pub type Balances = HashMap<MemberId, Decimal>;

/// A member's accumulated position across all expenses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPosition {
    /// Member ID
    pub member: MemberId,

    /// Total paid on behalf of the group (base currency)
    pub total_paid: Decimal,

    /// Total owed as shares of expenses (base currency)
    pub total_share: Decimal,

    /// Net position (positive = net creditor, negative = net debtor)
    pub net: Decimal,
}

impl MemberPosition {
    /// Create a zeroed position
    pub fn new(member: MemberId) -> Self {
        Self {
            member,
            total_paid: Decimal::ZERO,
            total_share: Decimal::ZERO,
            net: Decimal::ZERO,
        }
    }

    /// Credit an amount this member paid for the group
    pub fn credit(&mut self, amount: Decimal) {
        self.total_paid += amount;
        self.net = self.total_paid - self.total_share;
    }

    /// Debit this member's share of an expense
    pub fn debit(&mut self, share: Decimal) {
        self.total_share += share;
        self.net = self.total_paid - self.total_share;
    }

    /// Check if net creditor (is owed money)
    pub fn is_net_creditor(&self) -> bool {
        self.net > Decimal::ZERO
    }

    /// Check if net debtor (owes money)
    pub fn is_net_debtor(&self) -> bool {
        self.net < Decimal::ZERO
    }

    /// Absolute net position
    pub fn abs_net(&self) -> Decimal {
        self.net.abs()
    }
}

/// A single recommended transfer between two members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Debtor (pays)
    pub from: MemberId,

    /// Creditor (receives)
    pub to: MemberId,

    /// Amount in base-currency units (strictly positive)
    pub amount: Decimal,
}

/// Computed settlement plan
///
/// A pure derived output: recomputed whenever the inputs change, never
/// stored by the engine itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Plan ID
    pub plan_id: Uuid,

    /// Base accounting currency all amounts are expressed in
    pub base_currency: Currency,

    /// Roster size at computation time
    pub member_count: usize,

    /// Expenses folded into the plan
    pub expense_count: usize,

    /// Total spent across all expenses (base currency)
    pub total_spent: Decimal,

    /// Net balance per member (base currency)
    pub balances: Balances,

    /// Recommended transfers, in settlement order
    pub transfers: Vec<Transfer>,

    /// Sum of all transfer amounts
    pub transfer_total: Decimal,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl SettlementPlan {
    /// Whether no transfers are needed ("perfectly balanced")
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Net balance for one member (zero if unknown)
    pub fn balance_of(&self, member: &MemberId) -> Decimal {
        self.balances.get(member).copied().unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_position() {
        let mut position = MemberPosition::new(MemberId::new("alice"));

        position.credit(Decimal::from(5760));
        assert!(position.is_net_creditor());

        position.debit(Decimal::from(1920));
        assert_eq!(position.net, Decimal::from(3840));
        assert!(position.is_net_creditor());

        position.debit(Decimal::from(4000));
        assert!(position.is_net_debtor());
        assert_eq!(position.abs_net(), Decimal::from(160));
    }

    #[test]
    fn test_plan_helpers() {
        let alice = MemberId::new("alice");
        let bob = MemberId::new("bob");
        let mut balances = Balances::new();
        balances.insert(alice.clone(), Decimal::from(500));
        balances.insert(bob.clone(), Decimal::from(-500));

        let plan = SettlementPlan {
            plan_id: Uuid::new_v4(),
            base_currency: Currency::JPY,
            member_count: 2,
            expense_count: 1,
            total_spent: Decimal::from(1000),
            balances,
            transfers: vec![Transfer {
                from: bob.clone(),
                to: alice.clone(),
                amount: Decimal::from(500),
            }],
            transfer_total: Decimal::from(500),
            created_at: Utc::now(),
        };

        assert!(!plan.is_settled());
        assert_eq!(plan.balance_of(&alice), Decimal::from(500));
        assert_eq!(plan.balance_of(&MemberId::new("carol")), Decimal::ZERO);
    }
}
