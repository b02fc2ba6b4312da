//! Calendar arithmetic for recurring budget windows.
//!
//! All stepping is anchor-based: each candidate date is computed from the
//! original anchor, so a Jan-31 anchor yields Feb-28 then Mar-31 rather than
//! drifting to Mar-28 through cumulative clamping.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::budget::BudgetPeriod;

/// A half-open date interval `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start < end, "date window end must be after start");
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

impl BudgetPeriod {
    /// Advances `anchor` by `steps` whole periods, clamping the day of month
    /// to what the target month allows (and Feb-29 to Feb-28 off leap years).
    pub fn advance(self, anchor: NaiveDate, steps: u32) -> NaiveDate {
        match self {
            BudgetPeriod::Monthly => shift_month(anchor, steps as i32),
            BudgetPeriod::Yearly => shift_year(anchor, steps as i32),
        }
    }

    /// Returns the recurrence window whose `start <= today < end`, derived by
    /// advancing `anchor` by whole periods while the next candidate start is
    /// still on or before `today`. When `today` precedes the anchor the first
    /// window is returned.
    pub fn window_containing(self, anchor: NaiveDate, today: NaiveDate) -> DateWindow {
        let mut steps = if today <= anchor {
            0
        } else {
            self.estimate_steps(anchor, today)
        };
        while steps > 0 && self.advance(anchor, steps) > today {
            steps -= 1;
        }
        while self.advance(anchor, steps + 1) <= today {
            steps += 1;
        }
        DateWindow::new(self.advance(anchor, steps), self.advance(anchor, steps + 1))
    }

    /// Cheap first guess for the number of elapsed periods; corrected by the
    /// clamp-aware loops in `window_containing`.
    fn estimate_steps(self, anchor: NaiveDate, today: NaiveDate) -> u32 {
        let diff = match self {
            BudgetPeriod::Monthly => {
                (today.year() - anchor.year()) * 12 + today.month() as i32
                    - anchor.month() as i32
            }
            BudgetPeriod::Yearly => today.year() - anchor.year(),
        };
        diff.max(0) as u32
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap();
    (first_of_next - Duration::days(1)).day()
}
