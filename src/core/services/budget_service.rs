//! The budget aggregator: maps a budget's recurrence rule to the window
//! containing "today" and sums the matching expense transactions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{Budget, CategoryKind, DateWindow, Transaction, TransactionKind},
    errors::{LedgerError, Result},
    store::EntityStore,
    storage::StorageBackend,
};

/// Spending position of one budget for its current window.
///
/// `remaining_cents` is signed and goes negative once the budget is blown;
/// `ratio` is the raw spent/limit quotient, `None` for a zero-amount budget.
/// Presentation bands (50%, 80%, ...) are caller policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetProgress {
    pub budget_id: Uuid,
    pub category_id: Uuid,
    pub window: DateWindow,
    pub budget_cents: i64,
    pub spent_cents: i64,
    pub remaining_cents: i64,
    pub ratio: Option<f64>,
    pub status: BudgetStatus,
}

/// How actual spending compares to the configured limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    Under,
    OnTrack,
    Over,
    Empty,
}

/// Stateless budgeting operations over store snapshots.
pub struct BudgetService;

impl BudgetService {
    pub fn add<S: StorageBackend>(store: &mut EntityStore<S>, budget: Budget) -> Result<()> {
        Self::validate(store, &budget)?;
        store.put_budget(budget)
    }

    pub fn edit<S: StorageBackend>(store: &mut EntityStore<S>, changes: Budget) -> Result<()> {
        if store.budget(changes.id).is_none() {
            return Err(LedgerError::BudgetNotFound(changes.id));
        }
        Self::validate(store, &changes)?;
        store.put_budget(changes)
    }

    pub fn remove<S: StorageBackend>(store: &mut EntityStore<S>, id: Uuid) -> Result<Budget> {
        store.remove_budget(id)
    }

    pub fn list<S: StorageBackend>(store: &EntityStore<S>) -> Vec<Budget> {
        store.budgets()
    }

    /// The recurrence window whose `start <= today < end`.
    pub fn current_window(budget: &Budget, today: NaiveDate) -> DateWindow {
        budget.period.window_containing(budget.start_date, today)
    }

    /// Sum of expense amounts in the budget's category inside `window`.
    /// Zero when nothing matches.
    pub fn actual_spending(
        budget: &Budget,
        transactions: &[Transaction],
        window: DateWindow,
    ) -> i64 {
        transactions
            .iter()
            .filter(|txn| {
                txn.category_id == budget.category_id
                    && txn.kind == TransactionKind::Expense
                    && window.contains(txn.date)
            })
            .map(|txn| txn.amount_cents)
            .sum()
    }

    /// Progress of one budget for the window containing `today`.
    pub fn progress<S: StorageBackend>(
        store: &EntityStore<S>,
        budget: &Budget,
        today: NaiveDate,
    ) -> BudgetProgress {
        let window = Self::current_window(budget, today);
        let spent_cents = Self::actual_spending(budget, &store.transactions(), window);
        let ratio = if budget.amount_cents > 0 {
            Some(spent_cents as f64 / budget.amount_cents as f64)
        } else {
            None
        };
        let status = if budget.amount_cents == 0 && spent_cents == 0 {
            BudgetStatus::Empty
        } else {
            match spent_cents.cmp(&budget.amount_cents) {
                std::cmp::Ordering::Greater => BudgetStatus::Over,
                std::cmp::Ordering::Less => BudgetStatus::Under,
                std::cmp::Ordering::Equal => BudgetStatus::OnTrack,
            }
        };
        BudgetProgress {
            budget_id: budget.id,
            category_id: budget.category_id,
            window,
            budget_cents: budget.amount_cents,
            spent_cents,
            remaining_cents: budget.amount_cents - spent_cents,
            ratio,
            status,
        }
    }

    /// Progress for every budget, in stored order.
    pub fn progress_report<S: StorageBackend>(
        store: &EntityStore<S>,
        today: NaiveDate,
    ) -> Vec<BudgetProgress> {
        store
            .budgets()
            .iter()
            .map(|budget| Self::progress(store, budget, today))
            .collect()
    }

    fn validate<S: StorageBackend>(store: &EntityStore<S>, budget: &Budget) -> Result<()> {
        if budget.amount_cents <= 0 {
            return Err(LedgerError::Validation(
                "budget amount must be positive".into(),
            ));
        }
        // Same tolerance as transactions: a dangling category passes, an
        // income category does not.
        if let Some(category) = store.category(budget.category_id) {
            if category.kind != CategoryKind::Expense {
                return Err(LedgerError::Validation(format!(
                    "budgets track expense categories; `{}` is an income category",
                    category.name
                )));
            }
        }
        Ok(())
    }
}
