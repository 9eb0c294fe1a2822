// 📈 Trend Series - daily revenue/expense buckets over a date range
//
// Unlike the headline summary, the trend counts every recorded entry
// regardless of payment status: it shows activity, not realized cash.

use crate::entities::{Transaction, TransactionType};
use crate::format::day_label;
use crate::period::DateRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum number of points worth drawing as a line
pub const MIN_CHARTABLE_POINTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Axis label, e.g. "01 jan"
    pub label: String,
    pub revenue: f64,
    pub expense: f64,
}

impl TrendPoint {
    pub fn net(&self) -> f64 {
        self.revenue - self.expense
    }
}

/// One point per calendar day of `range`, ascending. Days without entries
/// are emitted with zero totals.
pub fn build_trend_series(transactions: &[Transaction], range: DateRange) -> Vec<TrendPoint> {
    let mut buckets: HashMap<NaiveDate, (f64, f64)> = HashMap::new();

    for tx in transactions {
        let bucket = buckets.entry(tx.date).or_insert((0.0, 0.0));
        match tx.kind {
            TransactionType::Income => bucket.0 += tx.amount,
            TransactionType::Expense => bucket.1 += tx.amount,
        }
    }

    range
        .days()
        .map(|date| {
            let (revenue, expense) = buckets.get(&date).copied().unwrap_or((0.0, 0.0));
            TrendPoint {
                date,
                label: day_label(date),
                revenue,
                expense,
            }
        })
        .collect()
}

/// Series shorter than two points cannot be drawn as a trend line
pub fn is_chartable(series: &[TrendPoint]) -> bool {
    series.len() >= MIN_CHARTABLE_POINTS
}

/// Totals of a series (revenue, expense)
pub fn series_totals(series: &[TrendPoint]) -> (f64, f64) {
    series
        .iter()
        .fold((0.0, 0.0), |(r, e), p| (r + p.revenue, e + p.expense))
}

// ============================================================================
// TESTS
// ============================================================================
