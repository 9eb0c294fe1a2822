// 🧮 Aggregation Engine - one entry point over every derived view
//
// All aggregations are pure functions of a point-in-time snapshot. The
// engine only carries the settings they read; `AnalyticsCache` skips the
// work when nothing relevant changed since the last report.

use crate::breakdown::{category_breakdown, CategorySlice};
use crate::client_health::{assess_client, HealthReport};
use crate::config::Settings;
use crate::entities::{Client, FinancialAccount, FinancialCategory, Task, Transaction};
use crate::metrics::{health_metrics, HealthMetrics};
use crate::period::DateRange;
use crate::summary::{financial_summary, FinancialSummary};
use crate::trend::{build_trend_series, TrendPoint};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Everything the cockpit shows for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub range: DateRange,
    pub day_count: usize,
    pub trend: Vec<TrendPoint>,
    pub summary: FinancialSummary,
    pub categories: Vec<CategorySlice>,
    pub metrics: HealthMetrics,
}

#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    settings: Settings,
}

impl AggregationEngine {
    pub fn new(settings: Settings) -> Self {
        AggregationEngine { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn trend(&self, transactions: &[Transaction], range: DateRange) -> Vec<TrendPoint> {
        build_trend_series(transactions, range)
    }

    pub fn breakdown(
        &self,
        transactions: &[Transaction],
        categories: &[FinancialCategory],
        range: DateRange,
    ) -> Vec<CategorySlice> {
        category_breakdown(transactions, categories, range)
    }

    pub fn summary(&self, transactions: &[Transaction], accounts: &[FinancialAccount]) -> FinancialSummary {
        financial_summary(transactions, accounts)
    }

    pub fn metrics(&self, summary: &FinancialSummary, categories: &[CategorySlice]) -> HealthMetrics {
        health_metrics(summary, categories, &self.settings.metrics)
    }

    /// Trend, breakdown, summary and metrics in one pass
    pub fn report(
        &self,
        transactions: &[Transaction],
        categories: &[FinancialCategory],
        accounts: &[FinancialAccount],
        range: DateRange,
    ) -> AnalyticsReport {
        let trend = self.trend(transactions, range);
        let slices = self.breakdown(transactions, categories, range);
        let summary = self.summary(transactions, accounts);
        let metrics = self.metrics(&summary, &slices);

        tracing::debug!(
            start = %range.start,
            end = %range.end,
            points = trend.len(),
            categories = slices.len(),
            "analytics report computed"
        );

        AnalyticsReport {
            range,
            day_count: range.day_count(),
            trend,
            summary,
            categories: slices,
            metrics,
        }
    }

    pub fn client_health(&self, client: &Client, tasks: &[Task], as_of: NaiveDateTime) -> HealthReport {
        assess_client(client, tasks, as_of, &self.settings.health)
    }

    /// Health of every client, lowest score first
    pub fn portfolio_health(&self, clients: &[Client], tasks: &[Task], as_of: NaiveDateTime) -> Vec<HealthReport> {
        let mut reports: Vec<HealthReport> = clients
            .iter()
            .map(|c| self.client_health(c, tasks, as_of))
            .collect();
        reports.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.client_id.cmp(&b.client_id)));
        reports
    }
}

// ============================================================================
// MEMOIZATION
// ============================================================================

/// SHA-256 over every field the financial report reads
pub fn fingerprint(
    transactions: &[Transaction],
    categories: &[FinancialCategory],
    accounts: &[FinancialAccount],
    range: DateRange,
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(format!("{}|{}", range.start, range.end));
    for t in transactions {
        hasher.update(format!(
            "T{}|{}|{}|{}|{}|{}|{}",
            t.id,
            t.date,
            t.amount.to_bits(),
            t.kind.as_str(),
            t.category_id,
            t.account_id,
            t.status.as_str()
        ));
    }
    for c in categories {
        hasher.update(format!("C{}|{}|{}", c.id, c.name, c.kind.as_str()));
    }
    for a in accounts {
        hasher.update(format!("A{}|{}", a.id, a.balance.to_bits()));
    }

    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Default)]
pub struct AnalyticsCache {
    key: Option<String>,
    report: Option<AnalyticsReport>,
    pub hits: u64,
    pub misses: u64,
}

impl AnalyticsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached report when the inputs are unchanged, otherwise recompute
    pub fn get_or_compute(
        &mut self,
        engine: &AggregationEngine,
        transactions: &[Transaction],
        categories: &[FinancialCategory],
        accounts: &[FinancialAccount],
        range: DateRange,
    ) -> &AnalyticsReport {
        let key = fingerprint(transactions, categories, accounts, range);

        let fresh = self.key.as_deref() == Some(key.as_str()) && self.report.is_some();
        if fresh {
            self.hits += 1;
            tracing::debug!(hits = self.hits, "analytics cache hit");
        } else {
            self.misses += 1;
            tracing::debug!(misses = self.misses, "analytics cache miss");
            self.key = Some(key);
            self.report = None;
        }

        self.report
            .get_or_insert_with(|| engine.report(transactions, categories, accounts, range))
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.report = None;
    }
}
