//! Main settlement engine
//!
//! Owns the inputs (roster, expense book, rate table) behind a validated
//! mutation surface and recomputes settlement plans on demand.
//!
//! The engine holds no derived state: every [`compute`] call folds the
//! current inputs from scratch, so callers simply recompute after any
//! change instead of tracking invalidation.
//!
//! [`compute`]: SettlementEngine::compute

use crate::{
    balance::BalanceEngine,
    config::Config,
    netting::NettingEngine,
    types::{Balances, SettlementPlan},
    Error, Result,
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashSet;
use trip_core::{Currency, Expense, ExpenseBook, ExpenseId, Member, MemberId, RateSource, RateTable};
use uuid::Uuid;

/// Settlement engine
#[derive(Debug)]
pub struct SettlementEngine {
    /// Configuration
    config: Config,

    /// Trip roster (static for the lifetime of the engine)
    members: Vec<Member>,

    /// Expense records
    book: ExpenseBook,

    /// Exchange rates into the base currency
    rates: RateTable,

    /// Balance engine
    balance: BalanceEngine,

    /// Netting engine
    netting: NettingEngine,
}

impl SettlementEngine {
    /// Create new settlement engine
    pub fn new(config: Config, members: Vec<Member>) -> Result<Self> {
        config.validate()?;

        let mut seen = HashSet::new();
        for member in &members {
            if !seen.insert(member.id.clone()) {
                return Err(Error::Roster(format!("duplicate member id: {}", member.id)));
            }
        }

        let rates = RateTable::with_rates(config.base_currency, config.rates.clone());
        let balance = BalanceEngine::new(config.validation.strict_members);
        let netting = NettingEngine::new(config.netting.tolerance);

        Ok(Self {
            config,
            members,
            book: ExpenseBook::new(),
            rates,
            balance,
            netting,
        })
    }

    /// Trip roster
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Expense records, newest first
    pub fn expenses(&self) -> &[Expense] {
        self.book.records()
    }

    /// Current rate table
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Add an expense record.
    ///
    /// A blank id gets a generated one. The record is validated against the
    /// roster before it enters the book; returns the id it was stored under.
    pub fn add_expense(&mut self, mut expense: Expense) -> Result<ExpenseId> {
        if expense.id.as_str().is_empty() {
            expense.id = ExpenseId::new(Uuid::new_v4().to_string());
        }
        expense.validate(&self.members, self.config.validation.strict_members)?;

        let id = expense.id.clone();
        self.book.add(expense)?;
        tracing::debug!("Added expense {} ({} records)", id, self.book.len());
        Ok(id)
    }

    /// Replace an existing expense record (validated like [`add_expense`])
    ///
    /// [`add_expense`]: SettlementEngine::add_expense
    pub fn update_expense(&mut self, expense: Expense) -> Result<()> {
        expense.validate(&self.members, self.config.validation.strict_members)?;
        self.book.update(expense)?;
        Ok(())
    }

    /// Remove and return an expense record
    pub fn remove_expense(&mut self, id: &ExpenseId) -> Result<Expense> {
        Ok(self.book.remove(id)?)
    }

    /// Override a single exchange rate
    pub fn set_rate(&mut self, currency: Currency, rate: Decimal) -> Result<()> {
        Ok(self.rates.set_rate(currency, rate)?)
    }

    /// Refresh rates from an external source.
    ///
    /// Stale-but-available: a failed fetch keeps the current table and
    /// returns `false`; the engine itself never fails on a refresh.
    pub fn refresh_rates(&mut self, source: &impl RateSource) -> bool {
        self.rates.refresh(source)
    }

    /// Total spent across all expenses, in base-currency units
    pub fn total_spent(&self) -> Decimal {
        self.book
            .records()
            .iter()
            .map(|e| self.rates.to_base(e.amount, e.currency))
            .sum()
    }

    /// Net balances for the current inputs
    pub fn balances(&self) -> Result<Balances> {
        self.balance
            .compute_balances(self.book.records(), &self.members, &self.rates)
    }

    /// Net balance for one member (zero if the member has no entries)
    pub fn balance_of(&self, member: &MemberId) -> Result<Decimal> {
        Ok(self
            .balances()?
            .get(member)
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    /// Compute a settlement plan from the current inputs.
    ///
    /// Pure recomputation: nothing is cached between calls.
    pub fn compute(&self) -> Result<SettlementPlan> {
        tracing::info!(
            "Computing settlement plan: {} expenses, {} members",
            self.book.len(),
            self.members.len()
        );

        // Step 1: Fold expenses into net balances
        let balances = self.balances()?;

        // Step 2: Net the balances into transfers
        let transfers = self.netting.compute_transfers(&balances);
        let transfer_total: Decimal = transfers.iter().map(|t| t.amount).sum();

        tracing::info!(
            "Netting complete: {} transfers totaling {} {}",
            transfers.len(),
            transfer_total,
            self.rates.base()
        );

        Ok(SettlementPlan {
            plan_id: Uuid::new_v4(),
            base_currency: self.rates.base(),
            member_count: self.members.len(),
            expense_count: self.book.len(),
            total_spent: self.total_spent(),
            balances,
            transfers,
            transfer_total,
            created_at: Utc::now(),
        })
    }
}
