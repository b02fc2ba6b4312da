//! Validated account mutations, including the guards that protect the
//! balance invariant from direct edits.

use uuid::Uuid;

use crate::{
    domain::Account,
    errors::{LedgerError, Result},
    store::EntityStore,
    storage::StorageBackend,
};

pub struct AccountService;

impl AccountService {
    /// Adds a new account after validating its name.
    pub fn add<S: StorageBackend>(store: &mut EntityStore<S>, account: Account) -> Result<()> {
        Self::validate_name(store, None, &account.name)?;
        store.put_account(account)
    }

    /// Updates an existing account. The balance may only change while no
    /// transaction references the account; everything else stays editable.
    pub fn edit<S: StorageBackend>(store: &mut EntityStore<S>, changes: Account) -> Result<()> {
        let existing = store
            .account(changes.id)
            .ok_or(LedgerError::AccountNotFound(changes.id))?;
        Self::validate_name(store, Some(changes.id), &changes.name)?;
        if changes.balance_cents != existing.balance_cents
            && Self::has_transactions(store, changes.id)
        {
            return Err(LedgerError::Validation(
                "balance can only be edited while the account has no transactions".into(),
            ));
        }
        store.put_account(changes)
    }

    /// Removes an account, refusing while transactions still reference it.
    pub fn remove<S: StorageBackend>(store: &mut EntityStore<S>, id: Uuid) -> Result<Account> {
        let count = store
            .transactions()
            .iter()
            .filter(|txn| txn.account_id == id)
            .count();
        if count > 0 {
            return Err(LedgerError::ReferencedByTransactions {
                entity: "account",
                id,
                count,
            });
        }
        store.remove_account(id)
    }

    /// Whether any transaction currently references the account. Callers use
    /// this to decide when a direct balance edit is allowed.
    pub fn has_transactions<S: StorageBackend>(store: &EntityStore<S>, account_id: Uuid) -> bool {
        store
            .transactions()
            .iter()
            .any(|txn| txn.account_id == account_id)
    }

    pub fn list<S: StorageBackend>(store: &EntityStore<S>) -> Vec<Account> {
        store.accounts()
    }

    fn validate_name<S: StorageBackend>(
        store: &EntityStore<S>,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> Result<()> {
        if candidate.trim().is_empty() {
            return Err(LedgerError::Validation("account name must not be empty".into()));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = store.accounts().iter().any(|account| {
            account.name.trim().to_ascii_lowercase() == normalized && exclude != Some(account.id)
        });
        if duplicate {
            Err(LedgerError::Validation(format!(
                "account `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
