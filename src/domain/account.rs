use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A financial account whose balance tracks its transaction history.
///
/// The stored balance is a running value: once transactions reference the
/// account it may only change through transaction mutations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub balance_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Account {
    /// Creates a new account with the given opening balance.
    pub fn new(name: impl Into<String>, kind: AccountKind, balance_cents: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            balance_cents,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Supported account types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountKind {
    Bank,
    EWallet,
    CreditCard,
    Cash,
}
