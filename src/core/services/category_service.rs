//! Validated category mutations with entry-time kind checks and the
//! referential delete guard.

use uuid::Uuid;

use crate::{
    domain::{Category, CategoryKind, TransactionKind},
    errors::{LedgerError, Result},
    store::EntityStore,
    storage::StorageBackend,
};

pub struct CategoryService;

impl CategoryService {
    pub fn add<S: StorageBackend>(store: &mut EntityStore<S>, category: Category) -> Result<()> {
        Self::validate_name(store, None, &category.name)?;
        store.put_category(category)
    }

    /// Updates an existing category. Changing the kind is refused while any
    /// referencing transaction would stop matching it.
    pub fn edit<S: StorageBackend>(store: &mut EntityStore<S>, changes: Category) -> Result<()> {
        let existing = store
            .category(changes.id)
            .ok_or(LedgerError::CategoryNotFound(changes.id))?;
        Self::validate_name(store, Some(changes.id), &changes.name)?;
        if changes.kind != existing.kind {
            let mismatched = store.transactions().iter().any(|txn| {
                txn.category_id == changes.id && !kind_matches(changes.kind, txn.kind)
            });
            if mismatched {
                return Err(LedgerError::Validation(format!(
                    "category `{}` has transactions of the current kind",
                    existing.name
                )));
            }
        }
        store.put_category(changes)
    }

    /// Removes a category, refusing while transactions still reference it.
    pub fn remove<S: StorageBackend>(store: &mut EntityStore<S>, id: Uuid) -> Result<Category> {
        let count = store
            .transactions()
            .iter()
            .filter(|txn| txn.category_id == id)
            .count();
        if count > 0 {
            return Err(LedgerError::ReferencedByTransactions {
                entity: "category",
                id,
                count,
            });
        }
        store.remove_category(id)
    }

    pub fn list<S: StorageBackend>(store: &EntityStore<S>) -> Vec<Category> {
        store.categories()
    }

    fn validate_name<S: StorageBackend>(
        store: &EntityStore<S>,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> Result<()> {
        if candidate.trim().is_empty() {
            return Err(LedgerError::Validation(
                "category name must not be empty".into(),
            ));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = store.categories().iter().any(|category| {
            category.name.trim().to_ascii_lowercase() == normalized && exclude != Some(category.id)
        });
        if duplicate {
            Err(LedgerError::Validation(format!(
                "category `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

fn kind_matches(category: CategoryKind, transaction: TransactionKind) -> bool {
    matches!(
        (category, transaction),
        (CategoryKind::Income, TransactionKind::Income)
            | (CategoryKind::Expense, TransactionKind::Expense)
    )
}
