// 📒 Bookkeeping ledger - filtered listing and paid totals

use crate::entities::{Transaction, TransactionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KindFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "receita")]
    Income,
    #[serde(rename = "despesa")]
    Expense,
}

impl KindFilter {
    pub fn accepts(&self, kind: TransactionType) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Income => kind == TransactionType::Income,
            KindFilter::Expense => kind == TransactionType::Expense,
        }
    }

    /// Cycle All → Income → Expense → All
    pub fn next(&self) -> Self {
        match self {
            KindFilter::All => KindFilter::Income,
            KindFilter::Income => KindFilter::Expense,
            KindFilter::Expense => KindFilter::All,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerFilter {
    /// Case-insensitive substring of the description
    pub search: String,
    pub kind: KindFilter,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl LedgerFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        let needle = self.search.to_lowercase();
        let match_search = tx.description.to_lowercase().contains(&needle);
        let match_kind = self.kind.accepts(tx.kind);
        let match_date = self.start.map_or(true, |s| tx.date >= s)
            && self.end.map_or(true, |e| tx.date <= e);

        match_search && match_kind && match_date
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub inflow: f64,
    pub outflow: f64,
    pub net: f64,
}

/// Matching entries, newest first
pub fn filter_ledger<'a>(transactions: &'a [Transaction], filter: &LedgerFilter) -> Vec<&'a Transaction> {
    let mut rows: Vec<&Transaction> = transactions.iter().filter(|t| filter.matches(t)).collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

/// Paid inflow/outflow of the given rows
pub fn ledger_totals<'a, I>(rows: I) -> LedgerTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = LedgerTotals::default();
    for tx in rows.into_iter().filter(|t| t.is_paid()) {
        match tx.kind {
            TransactionType::Income => totals.inflow += tx.amount,
            TransactionType::Expense => totals.outflow += tx.amount,
        }
    }
    totals.net = totals.inflow - totals.outflow;
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TransactionStatus;
    use crate::period::parse_date;

    fn tx(date: &str, desc: &str, amount: f64, kind: TransactionType, status: TransactionStatus) -> Transaction {
        Transaction::new(parse_date(date).unwrap(), desc, amount, kind, "cat", "acc", status)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("2024-01-02", "Fee Nubank", 8000.0, TransactionType::Income, TransactionStatus::Paid),
            tx("2024-01-05", "Meta Ads", 1200.0, TransactionType::Expense, TransactionStatus::Paid),
            tx("2024-01-10", "Fee McDonald's", 6000.0, TransactionType::Income, TransactionStatus::Pending),
            tx("2024-02-01", "Aluguel", 3000.0, TransactionType::Expense, TransactionStatus::Paid),
        ]
    }

    #[test]
    fn test_default_filter_lists_everything_newest_first() {
        let txs = sample();
        let rows = filter_ledger(&txs, &LedgerFilter::default());

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].description, "Aluguel");
        assert_eq!(rows[3].description, "Fee Nubank");
    }

    #[test]
    fn test_search_kind_and_dates_combine() {
        let txs = sample();
        let filter = LedgerFilter {
            search: "FEE".to_string(),
            kind: KindFilter::Income,
            start: Some(parse_date("2024-01-01").unwrap()),
            end: Some(parse_date("2024-01-31").unwrap()),
        };

        let rows = filter_ledger(&txs, &filter);
        let names: Vec<&str> = rows.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["Fee McDonald's", "Fee Nubank"]);

        let filter = LedgerFilter { kind: KindFilter::Expense, end: Some(parse_date("2024-01-31").unwrap()), ..Default::default() };
        assert_eq!(filter_ledger(&txs, &filter).len(), 1);
    }

    #[test]
    fn test_totals_paid_only() {
        let txs = sample();
        let totals = ledger_totals(filter_ledger(&txs, &LedgerFilter::default()));

        assert_eq!(totals.inflow, 8000.0);
        assert_eq!(totals.outflow, 4200.0);
        assert_eq!(totals.net, 3800.0);
    }

    #[test]
    fn test_kind_filter_cycle_and_wire_name() {
        assert_eq!(KindFilter::All.next().next().next(), KindFilter::All);
        assert_eq!(serde_json::to_value(KindFilter::Expense).unwrap(), "despesa");
    }
}
