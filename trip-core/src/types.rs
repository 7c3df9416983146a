//! Core types for the trip data model
//!
//! All types are designed for:
//! - Round-trippable serialization (serde) so an external store can persist them
//! - Exact arithmetic (Decimal for money)
//! - Stable string identifiers

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Trip member identifier (stable across sessions)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    /// Create new member ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Expense record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create new expense ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trip currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Currency {
    /// Japanese Yen
    JPY,
    /// Hong Kong Dollar
    HKD,
    /// Australian Dollar
    AUD,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::JPY => "JPY",
            Currency::HKD => "HKD",
            Currency::AUD => "AUD",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "JPY" => Some(Currency::JPY),
            "HKD" => Some(Currency::HKD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Trip member
///
/// Display metadata (name, avatar) is never read by the settlement
/// computation; only the id matters there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Member ID
    pub id: MemberId,

    /// Display name
    pub name: String,

    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Member {
    /// Create a member with no avatar
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(id),
            name: name.into(),
            avatar_url: None,
        }
    }
}

/// Shared expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID
    pub id: ExpenseId,

    /// Amount in `currency` units (must be positive)
    pub amount: Decimal,

    /// Currency the amount was paid in
    pub currency: Currency,

    /// Free-text category ("Sushi", "Taxi", ...)
    pub category: String,

    /// Member who paid
    pub paid_by: MemberId,

    /// Members the expense is split between (must be non-empty)
    pub split_with: Vec<MemberId>,

    /// Calendar date of the expense
    pub date: NaiveDate,
}

impl Expense {
    /// Validate the record against a roster.
    ///
    /// Always enforced: positive amount, non-empty split list, and a
    /// `paid_by` that is on the roster (the conservation precondition).
    /// With `strict_members` every `split_with` id must be on the roster
    /// too; otherwise unknown split ids are tolerated here and skipped at
    /// computation time.
    pub fn validate(&self, members: &[Member], strict_members: bool) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidExpense(format!(
                "expense {} has non-positive amount {}",
                self.id, self.amount
            )));
        }

        if self.split_with.is_empty() {
            return Err(Error::InvalidExpense(format!(
                "expense {} has an empty split list",
                self.id
            )));
        }

        if !members.iter().any(|m| m.id == self.paid_by) {
            return Err(Error::UnknownMember(self.paid_by.to_string()));
        }

        if strict_members {
            for id in &self.split_with {
                if !members.iter().any(|m| m.id == *id) {
                    return Err(Error::UnknownMember(id.to_string()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Member> {
        vec![Member::new("alice", "Alice"), Member::new("bob", "Bob")]
    }

    fn expense(amount: i64) -> Expense {
        Expense {
            id: ExpenseId::new("e1"),
            amount: Decimal::from(amount),
            currency: Currency::JPY,
            category: "Sushi".to_string(),
            paid_by: MemberId::new("alice"),
            split_with: vec![MemberId::new("alice"), MemberId::new("bob")],
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        }
    }

    #[test]
    fn test_valid_expense() {
        assert!(expense(1000).validate(&roster(), false).is_ok());
        assert!(expense(1000).validate(&roster(), true).is_ok());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let result = expense(0).validate(&roster(), false);
        assert!(matches!(result, Err(Error::InvalidExpense(_))));

        let result = expense(-500).validate(&roster(), false);
        assert!(matches!(result, Err(Error::InvalidExpense(_))));
    }

    #[test]
    fn test_empty_split_rejected() {
        let mut exp = expense(1000);
        exp.split_with.clear();
        let result = exp.validate(&roster(), false);
        assert!(matches!(result, Err(Error::InvalidExpense(_))));
    }

    #[test]
    fn test_unknown_payer_rejected() {
        let mut exp = expense(1000);
        exp.paid_by = MemberId::new("mallory");
        let result = exp.validate(&roster(), false);
        assert!(matches!(result, Err(Error::UnknownMember(_))));
    }

    #[test]
    fn test_unknown_split_member_only_strict() {
        let mut exp = expense(1000);
        exp.split_with.push(MemberId::new("mallory"));

        assert!(exp.validate(&roster(), false).is_ok());
        let result = exp.validate(&roster(), true);
        assert!(matches!(result, Err(Error::UnknownMember(_))));
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!(Currency::from_str("HKD"), Some(Currency::HKD));
        assert_eq!(Currency::from_str("CHF"), None);
        assert_eq!(Currency::AUD.code(), "AUD");
    }

    #[test]
    fn test_expense_round_trip() {
        let exp = expense(1000);
        let json = serde_json::to_string(&exp).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(exp, back);
    }
}
