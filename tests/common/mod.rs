//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use chrono::NaiveDate;
use uuid::Uuid;

use fintrack_core::domain::{CategoryKind, Transaction, TransactionKind};
use fintrack_core::storage::{MemoryStorage, StorageBackend};
use fintrack_core::store::EntityStore;

pub fn open_memory_store() -> EntityStore<MemoryStorage> {
    EntityStore::open(MemoryStorage::new()).expect("store opens")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn expense_category<S: StorageBackend>(store: &EntityStore<S>) -> Uuid {
    store
        .categories()
        .iter()
        .find(|category| category.kind == CategoryKind::Expense)
        .expect("seeded expense category")
        .id
}

pub fn income_category<S: StorageBackend>(store: &EntityStore<S>) -> Uuid {
    store
        .categories()
        .iter()
        .find(|category| category.kind == CategoryKind::Income)
        .expect("seeded income category")
        .id
}

pub fn expense<S: StorageBackend>(
    store: &EntityStore<S>,
    day: NaiveDate,
    amount_cents: i64,
    account_id: Uuid,
) -> Transaction {
    Transaction::new(
        day,
        "Expense",
        amount_cents,
        TransactionKind::Expense,
        expense_category(store),
        account_id,
    )
}

pub fn income<S: StorageBackend>(
    store: &EntityStore<S>,
    day: NaiveDate,
    amount_cents: i64,
    account_id: Uuid,
) -> Transaction {
    Transaction::new(
        day,
        "Income",
        amount_cents,
        TransactionKind::Income,
        income_category(store),
        account_id,
    )
}

/// Asserts `balance == opening + Σ signed amounts` for the given account.
pub fn assert_balance_invariant<S: StorageBackend>(
    store: &EntityStore<S>,
    account_id: Uuid,
    opening_cents: i64,
) {
    let recomputed: i64 = store
        .transactions()
        .iter()
        .filter(|txn| txn.account_id == account_id)
        .map(|txn| txn.signed_cents())
        .sum();
    let stored = store
        .account(account_id)
        .expect("account exists")
        .balance_cents;
    assert_eq!(
        stored,
        opening_cents + recomputed,
        "balance invariant broken for account {account_id}"
    );
}
