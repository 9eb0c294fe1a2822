// 💰 Financial Summary - realized income/expense and cash on hand
//
// Only paid entries count here. Balance comes from the accounts, not from
// the transactions.

use crate::entities::{total_balance, FinancialAccount, Transaction, TransactionType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl FinancialSummary {
    /// Realized result (income minus expense)
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

pub fn financial_summary(
    transactions: &[Transaction],
    accounts: &[FinancialAccount],
) -> FinancialSummary {
    let mut summary = FinancialSummary {
        balance: total_balance(accounts),
        ..Default::default()
    };

    for tx in transactions.iter().filter(|t| t.is_paid()) {
        match tx.kind {
            TransactionType::Income => summary.income += tx.amount,
            TransactionType::Expense => summary.expense += tx.amount,
        }
    }

    summary
}

/// Newest entries first, at most `limit`
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AccountType, TransactionStatus};
    use crate::period::parse_date;
    use crate::trend::{build_trend_series, series_totals};
    use crate::period::DateRange;

    fn tx(date: &str, amount: f64, kind: TransactionType, status: TransactionStatus) -> Transaction {
        Transaction::new(parse_date(date).unwrap(), date, amount, kind, "cat", "acc", status)
    }

    fn accounts() -> Vec<FinancialAccount> {
        vec![
            FinancialAccount::new("a1", "Itaú", 8000.0, AccountType::Bank),
            FinancialAccount::new("a2", "Caixa", 250.0, AccountType::Cash),
        ]
    }

    #[test]
    fn test_summary_counts_paid_only() {
        let txs = vec![
            tx("2024-01-01", 100.0, TransactionType::Income, TransactionStatus::Paid),
            tx("2024-01-02", 50.0, TransactionType::Expense, TransactionStatus::Pending),
        ];

        let summary = financial_summary(&txs, &accounts());

        assert_eq!(summary.income, 100.0);
        assert_eq!(summary.expense, 0.0);
        assert_eq!(summary.balance, 8250.0);
        assert_eq!(summary.net(), 100.0);
    }

    #[test]
    fn test_summary_differs_from_trend_when_pending_exists() {
        let txs = vec![
            tx("2024-01-01", 100.0, TransactionType::Income, TransactionStatus::Paid),
            tx("2024-01-01", 40.0, TransactionType::Income, TransactionStatus::Pending),
            tx("2024-01-02", 50.0, TransactionType::Expense, TransactionStatus::Pending),
        ];
        let range = DateRange::parse("2024-01-01", "2024-01-02").unwrap();

        let summary = financial_summary(&txs, &accounts());
        let (revenue, expense) = series_totals(&build_trend_series(&txs, range));

        assert_eq!(summary.income, 100.0);
        assert_eq!(revenue, 140.0);
        assert_eq!(summary.expense, 0.0);
        assert_eq!(expense, 50.0);
    }

    #[test]
    fn test_balance_independent_of_transactions() {
        let summary = financial_summary(&[], &accounts());
        assert_eq!(summary, FinancialSummary { income: 0.0, expense: 0.0, balance: 8250.0 });
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let txs = vec![
            tx("2024-01-03", 1.0, TransactionType::Income, TransactionStatus::Paid),
            tx("2024-01-09", 1.0, TransactionType::Income, TransactionStatus::Paid),
            tx("2024-01-01", 1.0, TransactionType::Income, TransactionStatus::Paid),
            tx("2024-01-05", 1.0, TransactionType::Income, TransactionStatus::Paid),
            tx("2024-01-07", 1.0, TransactionType::Income, TransactionStatus::Paid),
        ];

        let recent = recent_transactions(&txs, 4);
        let dates: Vec<String> = recent.iter().map(|t| t.date.to_string()).collect();

        assert_eq!(dates, vec!["2024-01-09", "2024-01-07", "2024-01-05", "2024-01-03"]);
    }
}
