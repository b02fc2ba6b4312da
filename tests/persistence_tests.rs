mod common;

use common::*;

use std::fs;

use fintrack_core::core::services::{AccountService, BudgetService, TransactionService};
use fintrack_core::domain::{Account, AccountKind, Budget, BudgetPeriod};
use fintrack_core::storage::{collections, JsonStorage, StorageBackend};
use fintrack_core::store::EntityStore;
use tempfile::TempDir;

fn open_json_store(temp: &TempDir) -> EntityStore<JsonStorage> {
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
    EntityStore::open(storage).expect("store opens")
}

#[test]
fn first_open_seeds_and_writes_every_collection() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_json_store(&temp);
    assert_eq!(store.accounts().len(), 3);

    for collection in [
        collections::ACCOUNTS,
        collections::CATEGORIES,
        collections::TRANSACTIONS,
        collections::BUDGETS,
    ] {
        assert!(
            temp.path().join(format!("{collection}.json")).exists(),
            "{collection}.json missing after seed"
        );
    }
}

#[test]
fn state_survives_a_reopen() {
    let temp = TempDir::new().expect("temp dir");
    let account_id;
    let budget_id;
    {
        let mut store = open_json_store(&temp);
        let account = Account::new("Durable", AccountKind::Bank, 500_00);
        account_id = account.id;
        AccountService::add(&mut store, account).unwrap();

        let txn = expense(&store, date(2024, 2, 14), 60_00, account_id);
        TransactionService::add(&mut store, txn).unwrap();

        let budget = Budget::new(
            expense_category(&store),
            200_00,
            BudgetPeriod::Monthly,
            date(2024, 1, 1),
        );
        budget_id = budget.id;
        BudgetService::add(&mut store, budget).unwrap();
    }

    let reopened = open_json_store(&temp);
    assert_eq!(
        reopened.account(account_id).unwrap().balance_cents,
        440_00,
        "balance adjustments must persist"
    );
    assert_eq!(reopened.transactions().len(), 1);
    assert!(reopened.budget(budget_id).is_some());
    assert_balance_invariant(&reopened, account_id, 500_00);
}

#[test]
fn mutations_rewrite_only_the_touched_collections() {
    let temp = TempDir::new().expect("temp dir");
    let mut store = open_json_store(&temp);

    let accounts_path = temp.path().join("accounts.json");
    let categories_path = temp.path().join("categories.json");
    let accounts_before = fs::read_to_string(&accounts_path).unwrap();
    let categories_before = fs::read_to_string(&categories_path).unwrap();

    let budget = Budget::new(
        expense_category(&store),
        100_00,
        BudgetPeriod::Monthly,
        date(2024, 1, 1),
    );
    BudgetService::add(&mut store, budget).unwrap();

    assert_eq!(
        fs::read_to_string(&accounts_path).unwrap(),
        accounts_before,
        "adding a budget must not rewrite accounts"
    );
    assert_eq!(
        fs::read_to_string(&categories_path).unwrap(),
        categories_before
    );
}

#[test]
fn existing_collections_are_loaded_not_reseeded() {
    let temp = TempDir::new().expect("temp dir");
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
    let custom = vec![Account::new("Only Account", AccountKind::Cash, 12_34)];
    storage
        .save(
            collections::ACCOUNTS,
            &serde_json::to_string_pretty(&custom).unwrap(),
        )
        .unwrap();

    let store = EntityStore::open(storage).expect("store opens");
    let accounts = store.accounts();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Only Account");
    assert_eq!(accounts[0].balance_cents, 12_34);
    // Categories were absent, so the defaults still apply there.
    assert!(!store.categories().is_empty());
}

#[test]
fn transaction_mutation_persists_balance_alongside() {
    let temp = TempDir::new().expect("temp dir");
    let mut store = open_json_store(&temp);
    let account = Account::new("Paired Writes", AccountKind::Bank, 0);
    AccountService::add(&mut store, account.clone()).unwrap();

    let txn = income(&store, date(2024, 3, 1), 150_00, account.id);
    TransactionService::add(&mut store, txn).unwrap();

    let accounts_blob = fs::read_to_string(temp.path().join("accounts.json")).unwrap();
    let persisted: Vec<Account> = serde_json::from_str(&accounts_blob).unwrap();
    let durable = persisted.iter().find(|a| a.id == account.id).unwrap();
    assert_eq!(durable.balance_cents, 150_00);
}
