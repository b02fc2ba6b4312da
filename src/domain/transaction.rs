use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single money movement against an account.
///
/// `amount_cents` is stored unsigned; the sign of the balance impact is
/// derived from `kind` wherever balances are computed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub amount_cents: i64,
    pub kind: TransactionKind,
    pub category_id: Uuid,
    pub account_id: Uuid,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount_cents: i64,
        kind: TransactionKind,
        category_id: Uuid,
        account_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            amount_cents,
            kind,
            category_id,
            account_id,
        }
    }

    /// Signed contribution of this transaction to its account's balance.
    pub fn signed_cents(&self) -> i64 {
        self.kind.signed(self.amount_cents)
    }
}

/// Whether a transaction credits or debits its account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Applies this kind's sign to an unsigned amount.
    pub fn signed(self, amount_cents: i64) -> i64 {
        match self {
            TransactionKind::Income => amount_cents,
            TransactionKind::Expense => -amount_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_cents_follows_kind() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let income = Transaction::new(
            date,
            "Salary",
            5_000_00,
            TransactionKind::Income,
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        let expense = Transaction::new(
            date,
            "Groceries",
            125_50,
            TransactionKind::Expense,
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        assert_eq!(income.signed_cents(), 5_000_00);
        assert_eq!(expense.signed_cents(), -125_50);
    }
}
