//! The entity store: owns the four core collections and their persistence.
//!
//! No domain rules live here beyond existence checks; balance consistency and
//! referential guards belong to the services in [`crate::core`].

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{
    domain::{Account, AccountKind, Budget, Category, CategoryKind, Transaction},
    errors::{LedgerError, Result},
    storage::{collections, StorageBackend},
};

pub struct EntityStore<S: StorageBackend> {
    backend: S,
    accounts: Vec<Account>,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    updated_at: DateTime<Utc>,
}

impl<S: StorageBackend> EntityStore<S> {
    /// Loads every collection from the backend, seeding built-in defaults for
    /// collections that have never been saved.
    pub fn open(backend: S) -> Result<Self> {
        let mut store = Self {
            backend,
            accounts: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
            budgets: Vec::new(),
            updated_at: Utc::now(),
        };
        store.accounts = store.load_or_seed(collections::ACCOUNTS, seed_accounts)?;
        store.categories = store.load_or_seed(collections::CATEGORIES, seed_categories)?;
        store.transactions = store.load_or_seed(collections::TRANSACTIONS, Vec::new)?;
        store.budgets = store.load_or_seed(collections::BUDGETS, Vec::new)?;
        sort_transactions(&mut store.transactions);
        Ok(store)
    }

    fn load_or_seed<T>(&mut self, collection: &str, seed: impl FnOnce() -> Vec<T>) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        match self.backend.load(collection)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => {
                let records = seed();
                tracing::info!(collection, count = records.len(), "seeding collection");
                self.backend
                    .save(collection, &serde_json::to_string_pretty(&records)?)?;
                Ok(records)
            }
        }
    }

    // Snapshot reads. Everything returned is a copy; mutating a returned
    // record never affects stored state.

    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    /// Transactions in authoritative order: date descending, ties stable.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn budgets(&self) -> Vec<Budget> {
        self.budgets.clone()
    }

    pub fn account(&self, id: Uuid) -> Option<Account> {
        self.accounts.iter().find(|a| a.id == id).cloned()
    }

    pub fn category(&self, id: Uuid) -> Option<Category> {
        self.categories.iter().find(|c| c.id == id).cloned()
    }

    pub fn transaction(&self, id: Uuid) -> Option<Transaction> {
        self.transactions.iter().find(|t| t.id == id).cloned()
    }

    pub fn budget(&self, id: Uuid) -> Option<Budget> {
        self.budgets.iter().find(|b| b.id == id).cloned()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutation primitives. Each call persists the one collection it touched
    // before returning.

    pub fn put_account(&mut self, account: Account) -> Result<()> {
        upsert(&mut self.accounts, account, |a| a.id);
        self.persist_accounts()
    }

    pub fn remove_account(&mut self, id: Uuid) -> Result<Account> {
        let removed = take(&mut self.accounts, |a| a.id == id)
            .ok_or(LedgerError::AccountNotFound(id))?;
        self.persist_accounts()?;
        Ok(removed)
    }

    pub fn put_category(&mut self, category: Category) -> Result<()> {
        upsert(&mut self.categories, category, |c| c.id);
        self.persist_categories()
    }

    pub fn remove_category(&mut self, id: Uuid) -> Result<Category> {
        let removed = take(&mut self.categories, |c| c.id == id)
            .ok_or(LedgerError::CategoryNotFound(id))?;
        self.persist_categories()?;
        Ok(removed)
    }

    pub fn put_transaction(&mut self, transaction: Transaction) -> Result<()> {
        upsert(&mut self.transactions, transaction, |t| t.id);
        sort_transactions(&mut self.transactions);
        self.persist_transactions()
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Result<Transaction> {
        let removed = take(&mut self.transactions, |t| t.id == id)
            .ok_or(LedgerError::TransactionNotFound(id))?;
        self.persist_transactions()?;
        Ok(removed)
    }

    pub fn put_budget(&mut self, budget: Budget) -> Result<()> {
        upsert(&mut self.budgets, budget, |b| b.id);
        self.persist_budgets()
    }

    pub fn remove_budget(&mut self, id: Uuid) -> Result<Budget> {
        let removed =
            take(&mut self.budgets, |b| b.id == id).ok_or(LedgerError::BudgetNotFound(id))?;
        self.persist_budgets()?;
        Ok(removed)
    }

    fn persist_accounts(&mut self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.accounts)?;
        self.backend.save(collections::ACCOUNTS, &payload)?;
        self.touch();
        Ok(())
    }

    fn persist_categories(&mut self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.categories)?;
        self.backend.save(collections::CATEGORIES, &payload)?;
        self.touch();
        Ok(())
    }

    fn persist_transactions(&mut self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.transactions)?;
        self.backend.save(collections::TRANSACTIONS, &payload)?;
        self.touch();
        Ok(())
    }

    fn persist_budgets(&mut self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.budgets)?;
        self.backend.save(collections::BUDGETS, &payload)?;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn upsert<T, K: PartialEq>(records: &mut Vec<T>, record: T, key: impl Fn(&T) -> K) {
    let id = key(&record);
    match records.iter_mut().find(|existing| key(existing) == id) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

fn take<T>(records: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> Option<T> {
    let index = records.iter().position(matches)?;
    Some(records.remove(index))
}

fn sort_transactions(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

fn seed_accounts() -> Vec<Account> {
    vec![
        Account::new("Cash", AccountKind::Cash, 0).with_icon("cash"),
        Account::new("Bank Account", AccountKind::Bank, 0).with_icon("bank"),
        Account::new("E-Wallet", AccountKind::EWallet, 0).with_icon("wallet"),
    ]
}

fn seed_categories() -> Vec<Category> {
    vec![
        Category::new("Salary", CategoryKind::Income).with_icon("briefcase"),
        Category::new("Gifts", CategoryKind::Income).with_icon("gift"),
        Category::new("Food & Drink", CategoryKind::Expense).with_icon("utensils"),
        Category::new("Transport", CategoryKind::Expense).with_icon("bus"),
        Category::new("Shopping", CategoryKind::Expense).with_icon("shopping-bag"),
        Category::new("Bills", CategoryKind::Expense).with_icon("file-text"),
        Category::new("Entertainment", CategoryKind::Expense).with_icon("film"),
        Category::new("Health", CategoryKind::Expense).with_icon("heart"),
    ]
}
