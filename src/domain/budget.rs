use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring spending limit for an expense category.
///
/// The budget anchors a repeating window at `start_date`; the window
/// containing any given day is derived by advancing the anchor by whole
/// periods.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Budget {
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount_cents: i64,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
}

impl Budget {
    pub fn new(
        category_id: Uuid,
        amount_cents: i64,
        period: BudgetPeriod,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            amount_cents,
            period,
            start_date,
        }
    }
}

/// Supported budgeting cadences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetPeriod {
    Monthly,
    Yearly,
}
