//! In-memory expense book
//!
//! Ordered newest-first, matching how the expense log is presented.
//! Persistence is an external concern; the serde round-trip of the expense
//! records is the storage contract.

use serde::{Deserialize, Serialize};

use crate::{Error, Expense, ExpenseId, Result};

/// Mutable collection of expense records, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBook {
    expenses: Vec<Expense>,
}

impl ExpenseBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from existing records, keeping their order
    pub fn from_records(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    /// Insert a new expense at the front of the book.
    ///
    /// Rejects ids already present; use [`update`] to replace a record.
    ///
    /// [`update`]: ExpenseBook::update
    pub fn add(&mut self, expense: Expense) -> Result<()> {
        if self.get(&expense.id).is_some() {
            return Err(Error::DuplicateExpense(expense.id.to_string()));
        }
        self.expenses.insert(0, expense);
        Ok(())
    }

    /// Replace the record with the same id
    pub fn update(&mut self, expense: Expense) -> Result<()> {
        match self.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(slot) => {
                *slot = expense;
                Ok(())
            }
            None => Err(Error::ExpenseNotFound(expense.id.to_string())),
        }
    }

    /// Remove and return the record with the given id
    pub fn remove(&mut self, id: &ExpenseId) -> Result<Expense> {
        match self.expenses.iter().position(|e| e.id == *id) {
            Some(index) => Ok(self.expenses.remove(index)),
            None => Err(Error::ExpenseNotFound(id.to_string())),
        }
    }

    /// Look up a record by id
    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == *id)
    }

    /// All records, newest first
    pub fn records(&self) -> &[Expense] {
        &self.expenses
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Whether the book is empty
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Currency, MemberId};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn expense(id: &str, amount: i64) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            amount: Decimal::from(amount),
            currency: Currency::JPY,
            category: "Taxi".to_string(),
            paid_by: MemberId::new("alice"),
            split_with: vec![MemberId::new("alice"), MemberId::new("bob")],
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        }
    }

    #[test]
    fn test_add_newest_first() {
        let mut book = ExpenseBook::new();
        book.add(expense("e1", 100)).unwrap();
        book.add(expense("e2", 200)).unwrap();

        let ids: Vec<&str> = book.records().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e2", "e1"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut book = ExpenseBook::new();
        book.add(expense("e1", 100)).unwrap();

        let result = book.add(expense("e1", 200));
        assert!(matches!(result, Err(Error::DuplicateExpense(_))));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut book = ExpenseBook::new();
        book.add(expense("e1", 100)).unwrap();
        book.add(expense("e2", 200)).unwrap();

        book.update(expense("e1", 150)).unwrap();
        assert_eq!(book.get(&ExpenseId::new("e1")).unwrap().amount, Decimal::from(150));
        // Order untouched
        assert_eq!(book.records()[0].id.as_str(), "e2");

        let result = book.update(expense("missing", 1));
        assert!(matches!(result, Err(Error::ExpenseNotFound(_))));
    }

    #[test]
    fn test_remove() {
        let mut book = ExpenseBook::new();
        book.add(expense("e1", 100)).unwrap();

        let removed = book.remove(&ExpenseId::new("e1")).unwrap();
        assert_eq!(removed.amount, Decimal::from(100));
        assert!(book.is_empty());

        let result = book.remove(&ExpenseId::new("e1"));
        assert!(matches!(result, Err(Error::ExpenseNotFound(_))));
    }
}
