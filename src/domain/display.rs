use chrono::{DateTime, Datelike, Utc};

use super::{Transaction, format_amount};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Amount prefixed with `+` for income and `-` for expense.
/// Example: "+₹1000.00", "-₹250.00"
pub fn format_signed(transaction: &Transaction, symbol: &str) -> String {
    let signed = transaction.signed_amount();
    if signed < 0 {
        format_amount(signed, symbol)
    } else {
        format!("+{}", format_amount(signed, symbol))
    }
}

/// Human-friendly age of a date relative to `now`.
///
/// Whole days elapsed (in either direction) decide the wording: "Today",
/// "Yesterday", "3 days ago" under a week, otherwise a short date that only
/// carries the year when it differs from the current one.
///
/// Days are counted in UTC, not the local time zone, so "Today" follows the
/// UTC calendar.
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_days = (now - date).num_milliseconds().abs() / MILLIS_PER_DAY;

    match diff_days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", diff_days),
        _ if date.year() != now.year() => date.format("%b %-d, %Y").to_string(),
        _ => date.format("%b %-d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::domain::{Category, TransactionDraft, TransactionType};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_date_recent() {
        assert_eq!(format_relative_date(now(), now()), "Today");
        assert_eq!(format_relative_date(now() - Duration::hours(23), now()), "Today");
        assert_eq!(format_relative_date(now() - Duration::hours(25), now()), "Yesterday");
        assert_eq!(format_relative_date(now() - Duration::days(3), now()), "3 days ago");
        assert_eq!(format_relative_date(now() - Duration::days(6), now()), "6 days ago");
    }

    #[test]
    fn test_relative_date_older() {
        assert_eq!(format_relative_date(now() - Duration::days(7), now()), "Jun 8");
        let last_year = Utc.with_ymd_and_hms(2023, 12, 25, 8, 0, 0).unwrap();
        assert_eq!(format_relative_date(last_year, now()), "Dec 25, 2023");
    }

    #[test]
    fn test_relative_date_in_future_uses_absolute_difference() {
        assert_eq!(format_relative_date(now() + Duration::days(2), now()), "2 days ago");
    }

    #[test]
    fn test_format_signed() {
        let income = TransactionDraft::new("Pay", 100000, Category::Salary, TransactionType::Income)
            .into_transaction(1, now());
        let expense = TransactionDraft::new("Cab", 25000, Category::Transport, TransactionType::Expense)
            .into_transaction(2, now());

        assert_eq!(format_signed(&income, "₹"), "+₹1000.00");
        assert_eq!(format_signed(&expense, "₹"), "-₹250.00");
    }
}
