// Agency Console - Core Library
// Derived analytics over the agency's books, clients and project board.
// Exposes all modules for use in the CLI, the API server and tests.

pub mod config;
pub mod entities;
pub mod error;
pub mod format;
pub mod period;
pub mod registry;
pub mod snapshot;

// Aggregations
pub mod breakdown;
pub mod client_health;
pub mod engine;
pub mod ledger;
pub mod metrics;
pub mod objectives;
pub mod summary;
pub mod trend;

// Re-export commonly used types
pub use breakdown::{category_breakdown, CategorySlice};
pub use client_health::{assess, assess_client, health_score, Diagnosis, HealthLevel, HealthReport};
pub use config::{HealthWeights, MetricReferences, Settings};
pub use engine::{AggregationEngine, AnalyticsCache, AnalyticsReport};
pub use entities::{
    Client, FinancialAccount, FinancialCategory, Task, Transaction, TransactionStatus,
    TransactionType,
};
pub use error::{StoreError, StoreResult};
pub use format::format_brl;
pub use ledger::{filter_ledger, ledger_totals, KindFilter, LedgerFilter, LedgerTotals};
pub use metrics::{health_metrics, HealthMetrics};
pub use objectives::{progress as objectives_progress, ObjectivesProgress};
pub use period::{default_range, DateRange};
pub use registry::Workspace;
pub use snapshot::{import_csv, load_or_demo, load_snapshot, save_snapshot};
pub use summary::{financial_summary, recent_transactions, FinancialSummary};
pub use trend::{build_trend_series, TrendPoint};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
