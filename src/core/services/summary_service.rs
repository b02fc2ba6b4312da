//! Read-side reporting projections: chart-ready summaries derived from store
//! snapshots. Nothing here mutates state.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{AccountKind, DateWindow, TransactionKind},
    store::EntityStore,
    storage::StorageBackend,
};

const UNKNOWN_CATEGORY: &str = "Unknown";

/// Income/expense totals for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub year: i32,
    pub month: u32,
    pub income_cents: i64,
    pub expense_cents: i64,
    pub net_cents: i64,
}

/// Aggregated total for one category within a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category_id: Uuid,
    pub name: String,
    pub total_cents: i64,
}

/// Balance snapshot across all accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountOverview {
    pub entries: Vec<AccountEntry>,
    pub net_worth_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountEntry {
    pub account_id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub balance_cents: i64,
}

pub struct SummaryService;

impl SummaryService {
    /// Per-month totals for the `months_back` calendar months ending with the
    /// month of `today`, oldest first. Months without transactions appear
    /// with zero totals so trend charts keep a continuous axis.
    pub fn monthly_trend<S: StorageBackend>(
        store: &EntityStore<S>,
        months_back: u32,
        today: NaiveDate,
    ) -> Vec<MonthlyTotals> {
        let mut by_month: HashMap<(i32, u32), (i64, i64)> = HashMap::new();
        for txn in store.transactions() {
            let entry = by_month.entry((txn.date.year(), txn.date.month())).or_default();
            match txn.kind {
                TransactionKind::Income => entry.0 += txn.amount_cents,
                TransactionKind::Expense => entry.1 += txn.amount_cents,
            }
        }

        let newest = today.year() * 12 + today.month() as i32 - 1;
        (0..months_back.max(1))
            .rev()
            .map(|back| {
                let index = newest - back as i32;
                let year = index.div_euclid(12);
                let month = index.rem_euclid(12) as u32 + 1;
                let (income_cents, expense_cents) =
                    by_month.get(&(year, month)).copied().unwrap_or((0, 0));
                MonthlyTotals {
                    year,
                    month,
                    income_cents,
                    expense_cents,
                    net_cents: income_cents - expense_cents,
                }
            })
            .collect()
    }

    /// Per-category totals for transactions of `kind` inside `window`, largest
    /// first. A transaction whose category no longer exists groups under the
    /// "Unknown" placeholder instead of failing.
    pub fn category_breakdown<S: StorageBackend>(
        store: &EntityStore<S>,
        window: DateWindow,
        kind: TransactionKind,
    ) -> Vec<CategoryTotal> {
        let mut by_category: HashMap<Uuid, i64> = HashMap::new();
        for txn in store.transactions() {
            if txn.kind == kind && window.contains(txn.date) {
                *by_category.entry(txn.category_id).or_default() += txn.amount_cents;
            }
        }

        let mut totals: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(category_id, total_cents)| CategoryTotal {
                category_id,
                name: store
                    .category(category_id)
                    .map(|c| c.name)
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.into()),
                total_cents,
            })
            .collect();
        totals.sort_by(|a, b| b.total_cents.cmp(&a.total_cents).then(a.name.cmp(&b.name)));
        totals
    }

    /// Current balance per account plus the net worth total.
    pub fn account_overview<S: StorageBackend>(store: &EntityStore<S>) -> AccountOverview {
        let entries: Vec<AccountEntry> = store
            .accounts()
            .into_iter()
            .map(|account| AccountEntry {
                account_id: account.id,
                name: account.name,
                kind: account.kind,
                balance_cents: account.balance_cents,
            })
            .collect();
        let net_worth_cents = entries.iter().map(|entry| entry.balance_cents).sum();
        AccountOverview {
            entries,
            net_worth_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::TransactionService;
    use crate::domain::{CategoryKind, Transaction};
    use crate::storage::MemoryStorage;

    fn open_store() -> EntityStore<MemoryStorage> {
        EntityStore::open(MemoryStorage::new()).expect("store opens")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_trend_includes_empty_months() {
        let mut store = open_store();
        let account = store.accounts()[0].id;
        let income = store
            .categories()
            .iter()
            .find(|c| c.kind == CategoryKind::Income)
            .unwrap()
            .id;
        let txn = Transaction::new(
            date(2024, 1, 15),
            "Salary",
            2_500_00,
            TransactionKind::Income,
            income,
            account,
        );
        TransactionService::add(&mut store, txn).unwrap();

        let trend = SummaryService::monthly_trend(&store, 3, date(2024, 3, 20));
        assert_eq!(trend.len(), 3);
        assert_eq!((trend[0].year, trend[0].month), (2024, 1));
        assert_eq!(trend[0].net_cents, 2_500_00);
        assert_eq!(trend[1].net_cents, 0);
        assert_eq!(trend[2].net_cents, 0);
    }

    #[test]
    fn monthly_trend_spans_a_year_boundary() {
        let store = open_store();
        let trend = SummaryService::monthly_trend(&store, 4, date(2024, 2, 1));
        let months: Vec<(i32, u32)> = trend.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(months, vec![(2023, 11), (2023, 12), (2024, 1), (2024, 2)]);
    }

    #[test]
    fn breakdown_groups_dangling_category_under_unknown() {
        let mut store = open_store();
        let account = store.accounts()[0].id;
        let txn = Transaction::new(
            date(2024, 4, 3),
            "Orphaned",
            33_00,
            TransactionKind::Expense,
            Uuid::new_v4(),
            account,
        );
        TransactionService::add(&mut store, txn).unwrap();

        let window = DateWindow::new(date(2024, 4, 1), date(2024, 5, 1));
        let breakdown =
            SummaryService::category_breakdown(&store, window, TransactionKind::Expense);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].name, "Unknown");
        assert_eq!(breakdown[0].total_cents, 33_00);
    }

    #[test]
    fn overview_sums_net_worth() {
        let mut store = open_store();
        let mut account = store.accounts()[0].clone();
        account.balance_cents = 1_000_00;
        store.put_account(account).unwrap();

        let overview = SummaryService::account_overview(&store);
        assert_eq!(overview.entries.len(), 3);
        assert_eq!(overview.net_worth_cents, 1_000_00);
    }
}
