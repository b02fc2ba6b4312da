//! The ledger engine: transaction mutations that keep account balances
//! consistent with the transaction history.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    currency::format_cents,
    domain::{Transaction, TransactionKind},
    errors::{LedgerError, Result},
    store::EntityStore,
    storage::StorageBackend,
};

/// Optional conjunctive criteria for listing transactions.
/// `from`/`to` bound the date as a half-open range `[from, to)`.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub account_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub kind: Option<TransactionKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(account_id) = self.account_id {
            if transaction.account_id != account_id {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if transaction.category_id != category_id {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }
        if let Some(from) = self.from {
            if transaction.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if transaction.date >= to {
                return false;
            }
        }
        true
    }
}

/// Validated transaction mutations with balance synchronization.
///
/// After every operation, each account's balance equals its opening balance
/// plus the signed sum of the transactions referencing it.
pub struct TransactionService;

impl TransactionService {
    /// Inserts a freshly constructed transaction and applies its balance
    /// impact to the referenced account.
    pub fn add<S: StorageBackend>(
        store: &mut EntityStore<S>,
        transaction: Transaction,
    ) -> Result<Transaction> {
        if store.transaction(transaction.id).is_some() {
            return Err(LedgerError::Validation(format!(
                "transaction {} already exists",
                transaction.id
            )));
        }
        Self::validate(store, &transaction)?;
        store.put_transaction(transaction.clone())?;
        Self::apply_impact(store, transaction.account_id, transaction.signed_cents())?;
        tracing::debug!(
            id = %transaction.id,
            impact = %format_cents(transaction.signed_cents()),
            "transaction added"
        );
        Ok(transaction)
    }

    /// Replaces the stored record with the same id, reversing the old balance
    /// impact and applying the new one. When the account changed, the old
    /// account loses the old impact and the new account gains the new one.
    pub fn update<S: StorageBackend>(
        store: &mut EntityStore<S>,
        updated: Transaction,
    ) -> Result<()> {
        let old = store
            .transaction(updated.id)
            .ok_or(LedgerError::TransactionNotFound(updated.id))?;
        Self::validate(store, &updated)?;
        store.put_transaction(updated.clone())?;
        Self::apply_impact(store, old.account_id, -old.signed_cents())?;
        Self::apply_impact(store, updated.account_id, updated.signed_cents())?;
        tracing::debug!(id = %updated.id, "transaction updated");
        Ok(())
    }

    /// Removes the transaction and reverses its balance impact, returning the
    /// removed record.
    pub fn remove<S: StorageBackend>(
        store: &mut EntityStore<S>,
        id: Uuid,
    ) -> Result<Transaction> {
        let removed = store.remove_transaction(id)?;
        Self::apply_impact(store, removed.account_id, -removed.signed_cents())?;
        tracing::debug!(
            id = %removed.id,
            reversed = %format_cents(-removed.signed_cents()),
            "transaction removed"
        );
        Ok(removed)
    }

    /// Snapshot of transactions matching `filter`, newest first.
    pub fn list<S: StorageBackend>(
        store: &EntityStore<S>,
        filter: Option<&TransactionFilter>,
    ) -> Vec<Transaction> {
        let transactions = store.transactions();
        match filter {
            Some(filter) => transactions
                .into_iter()
                .filter(|t| filter.matches(t))
                .collect(),
            None => transactions,
        }
    }

    fn validate<S: StorageBackend>(store: &EntityStore<S>, transaction: &Transaction) -> Result<()> {
        if transaction.amount_cents <= 0 {
            return Err(LedgerError::Validation(
                "transaction amount must be positive".into(),
            ));
        }
        if transaction.description.trim().is_empty() {
            return Err(LedgerError::Validation(
                "transaction description must not be empty".into(),
            ));
        }
        // A dangling category is tolerated; a mismatching one is not.
        if let Some(category) = store.category(transaction.category_id) {
            let matches = matches!(
                (category.kind, transaction.kind),
                (crate::domain::CategoryKind::Income, TransactionKind::Income)
                    | (crate::domain::CategoryKind::Expense, TransactionKind::Expense)
            );
            if !matches {
                return Err(LedgerError::Validation(format!(
                    "category `{}` does not accept {:?} transactions",
                    category.name, transaction.kind
                )));
            }
        }
        Ok(())
    }

    /// Adjusts the referenced account's balance. A dangling account reference
    /// is a silent no-op; reads degrade to "unknown" instead of failing.
    fn apply_impact<S: StorageBackend>(
        store: &mut EntityStore<S>,
        account_id: Uuid,
        delta_cents: i64,
    ) -> Result<()> {
        if delta_cents == 0 {
            return Ok(());
        }
        if let Some(mut account) = store.account(account_id) {
            account.balance_cents += delta_cents;
            store.put_account(account)?;
        }
        Ok(())
    }
}
