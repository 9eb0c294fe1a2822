// ⏰ Reporting periods - inclusive calendar-day ranges
//
// Ranges are inclusive on both ends and always cover at least one day,
// even when `end` comes before `start`.

use crate::entities::Transaction;
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a YYYY-MM-DD calendar day
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {}", value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Single-day range
    pub fn day(date: NaiveDate) -> Self {
        DateRange { start: date, end: date }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(DateRange {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Number of calendar days covered, never less than 1
    pub fn day_count(&self) -> usize {
        let days = (self.end - self.start).num_days() + 1;
        days.max(1) as usize
    }

    /// Every day of the range in ascending order, starting at `start`
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.day_count())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Range the cockpit opens with: the span of recorded transactions, or the
/// current month to date when there are none.
pub fn default_range(transactions: &[Transaction], today: NaiveDate) -> DateRange {
    let earliest = transactions.iter().map(|t| t.date).min();
    let latest = transactions.iter().map(|t| t.date).max();

    match (earliest, latest) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        _ => DateRange::new(month_start(today), today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{TransactionStatus, TransactionType};

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_day_count_inclusive() {
        assert_eq!(DateRange::parse("2024-01-01", "2024-01-02").unwrap().day_count(), 2);
        assert_eq!(DateRange::parse("2024-01-01", "2024-01-31").unwrap().day_count(), 31);
        assert_eq!(DateRange::day(day("2024-02-29")).day_count(), 1);
    }

    #[test]
    fn test_inverted_range_still_has_one_day() {
        let range = DateRange::parse("2024-03-10", "2024-03-01").unwrap();

        assert!(range.is_inverted());
        assert_eq!(range.day_count(), 1);

        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(days, vec![day("2024-03-10")]);
        assert!(!range.contains(day("2024-03-05")));
    }

    #[test]
    fn test_days_cross_month_boundary() {
        let range = DateRange::parse("2024-01-30", "2024-02-02").unwrap();
        let days: Vec<String> = range.days().map(|d| d.to_string()).collect();
        assert_eq!(days, vec!["2024-01-30", "2024-01-31", "2024-02-01", "2024-02-02"]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("01/02/2024").is_err());
        assert!(parse_date(" 2024-01-02 ").is_ok());
    }

    #[test]
    fn test_default_range_spans_transactions() {
        let txs = vec![
            Transaction::new(day("2024-02-10"), "b", 1.0, TransactionType::Income, "c", "a", TransactionStatus::Paid),
            Transaction::new(day("2024-01-05"), "a", 1.0, TransactionType::Expense, "c", "a", TransactionStatus::Pending),
            Transaction::new(day("2024-03-01"), "c", 1.0, TransactionType::Income, "c", "a", TransactionStatus::Paid),
        ];

        let range = default_range(&txs, day("2024-06-15"));
        assert_eq!(range, DateRange::parse("2024-01-05", "2024-03-01").unwrap());
    }

    #[test]
    fn test_default_range_without_transactions_is_month_to_date() {
        let range = default_range(&[], day("2024-06-15"));
        assert_eq!(range, DateRange::parse("2024-06-01", "2024-06-15").unwrap());
    }
}
