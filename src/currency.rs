//! Display helpers for minor-unit amounts.
//!
//! The tracker is single-currency; amounts are carried as signed cents and
//! only rendered to decimal strings at the presentation edge.

use crate::errors::{LedgerError, Result};

/// Formats signed cents as a decimal string with digit grouping,
/// e.g. `-1234550` becomes `-12,345.50`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = group_digits(&(abs / 100).to_string());
    format!("{}{}.{:02}", sign, whole, abs % 100)
}

/// Parses a decimal amount string (optional sign, optional grouping commas,
/// at most two fraction digits) into signed cents.
pub fn parse_cents(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed),
    };
    let body = body.replace(',', "");
    let (whole, fraction) = match body.split_once('.') {
        Some((w, f)) => (w, f),
        None => (body.as_str(), ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(LedgerError::Validation(format!(
            "`{}` is not an amount",
            input
        )));
    }
    let all_digits =
        whole.chars().all(|c| c.is_ascii_digit()) && fraction.chars().all(|c| c.is_ascii_digit());
    if fraction.len() > 2 || !all_digits {
        return Err(LedgerError::Validation(format!(
            "`{}` is not an amount",
            input
        )));
    }
    let out_of_range = || LedgerError::Validation(format!("`{}` is out of range", input));
    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| out_of_range())?
    };
    let mut frac: i64 = if fraction.is_empty() {
        0
    } else {
        fraction.parse().map_err(|_| out_of_range())?
    };
    if fraction.len() == 1 {
        frac *= 10;
    }
    whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(frac))
        .map(|v| v * sign)
        .ok_or_else(out_of_range)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_grouping_and_sign() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(1_234_550), "12,345.50");
        assert_eq!(format_cents(-1_234_550), "-12,345.50");
    }

    #[test]
    fn parses_common_shapes() {
        assert_eq!(parse_cents("12,345.50").unwrap(), 1_234_550);
        assert_eq!(parse_cents("-3.5").unwrap(), -350);
        assert_eq!(parse_cents("200").unwrap(), 20_000);
        assert_eq!(parse_cents(".75").unwrap(), 75);
        assert!(parse_cents("12.345").is_err());
        assert!(parse_cents("abc").is_err());
    }
}
