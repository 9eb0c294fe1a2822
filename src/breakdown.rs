// 🥧 Category Breakdown - where the period's expenses went
//
// Only expense categories are considered. Entries pointing at unknown
// categories still count toward the period total but never get a row,
// so percentages may then sum to less than 100.

use crate::entities::{FinancialCategory, Transaction, TransactionType};
use crate::period::DateRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    /// Category id, or the uppercased name when no category matches it
    pub id: String,
    /// Uppercased category name
    pub name: String,
    pub amount: f64,
    /// Rounded share of the period's expense total
    pub percentage: u32,
}

/// Sum of every expense entry in range, all statuses
pub fn period_expense_total(transactions: &[Transaction], range: DateRange) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense && range.contains(t.date))
        .map(|t| t.amount)
        .sum()
}

pub fn category_breakdown(
    transactions: &[Transaction],
    categories: &[FinancialCategory],
    range: DateRange,
) -> Vec<CategorySlice> {
    let period: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense && range.contains(t.date))
        .collect();

    let total: f64 = period.iter().map(|t| t.amount).sum();
    let denominator = if total == 0.0 { 1.0 } else { total };

    // Keyed by name in first-seen order; categories sharing a name merge
    let mut allocation: Vec<(String, f64)> = Vec::new();

    for category in categories.iter().filter(|c| c.is_expense()) {
        let amount: f64 = period
            .iter()
            .filter(|t| t.category_id == category.id)
            .map(|t| t.amount)
            .sum();

        if amount <= 0.0 {
            continue;
        }

        match allocation.iter_mut().find(|(name, _)| *name == category.name) {
            Some((_, existing)) => *existing += amount,
            None => allocation.push((category.name.clone(), amount)),
        }
    }

    // Stable sort keeps first-seen order between equal amounts
    allocation.sort_by(|a, b| b.1.total_cmp(&a.1));

    allocation
        .into_iter()
        .map(|(name, amount)| {
            let display = name.to_uppercase();
            let id = categories
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.id.clone())
                .unwrap_or_else(|| display.clone());

            CategorySlice {
                id,
                name: display,
                amount,
                percentage: ((amount / denominator) * 100.0).round() as u32,
            }
        })
        .collect()
}

/// Slice with the given id, for focus/toggle in the cockpit
pub fn find_slice<'a>(slices: &'a [CategorySlice], id: &str) -> Option<&'a CategorySlice> {
    slices.iter().find(|s| s.id == id)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TransactionStatus;
    use crate::period::parse_date;

    fn expense(date: &str, amount: f64, category: &str) -> Transaction {
        Transaction::new(
            parse_date(date).unwrap(),
            "test",
            amount,
            TransactionType::Expense,
            category,
            "acc",
            TransactionStatus::Pending,
        )
    }

    fn categories() -> Vec<FinancialCategory> {
        vec![
            FinancialCategory::new("cat-ads", "Tráfego Pago", TransactionType::Expense),
            FinancialCategory::new("cat-infra", "Infraestrutura", TransactionType::Expense),
            FinancialCategory::new("cat-team", "Equipe", TransactionType::Expense),
            FinancialCategory::new("cat-fee", "Fee Mensal", TransactionType::Income),
        ]
    }

    fn january() -> DateRange {
        DateRange::parse("2024-01-01", "2024-01-31").unwrap()
    }

    #[test]
    fn test_breakdown_sorted_with_percentages() {
        let txs = vec![
            expense("2024-01-03", 200.0, "cat-infra"),
            expense("2024-01-05", 600.0, "cat-ads"),
            expense("2024-01-20", 200.0, "cat-team"),
            expense("2024-02-01", 5000.0, "cat-team"),
        ];

        let slices = category_breakdown(&txs, &categories(), january());

        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].id, "cat-ads");
        assert_eq!(slices[0].name, "TRÁFEGO PAGO");
        assert_eq!(slices[0].amount, 600.0);
        assert_eq!(slices[0].percentage, 60);
        // equal amounts keep category order
        assert_eq!(slices[1].id, "cat-infra");
        assert_eq!(slices[2].id, "cat-team");
        assert_eq!(slices[2].percentage, 20);
    }

    #[test]
    fn test_no_matching_categories_is_empty() {
        let txs = vec![expense("2024-01-03", 200.0, "cat-unknown")];

        let slices = category_breakdown(&txs, &categories(), january());
        assert!(slices.is_empty());

        let slices = category_breakdown(&[], &categories(), january());
        assert!(slices.is_empty());
    }

    #[test]
    fn test_unknown_category_counts_in_denominator_only() {
        let txs = vec![
            expense("2024-01-03", 50.0, "cat-ads"),
            expense("2024-01-04", 50.0, "cat-unknown"),
        ];

        let slices = category_breakdown(&txs, &categories(), january());

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].percentage, 50);
        assert_eq!(period_expense_total(&txs, january()), 100.0);
    }

    #[test]
    fn test_income_entries_never_counted() {
        let mut income = expense("2024-01-03", 900.0, "cat-ads");
        income.kind = TransactionType::Income;
        let txs = vec![income, expense("2024-01-04", 100.0, "cat-ads")];

        let slices = category_breakdown(&txs, &categories(), january());

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].amount, 100.0);
        assert_eq!(slices[0].percentage, 100);
    }

    #[test]
    fn test_sum_conservation_and_rounding_bound() {
        let txs = vec![
            expense("2024-01-01", 1.0, "cat-ads"),
            expense("2024-01-02", 1.0, "cat-infra"),
            expense("2024-01-03", 1.0, "cat-team"),
        ];

        let slices = category_breakdown(&txs, &categories(), january());
        let amount_sum: f64 = slices.iter().map(|s| s.amount).sum();
        let pct_sum: u32 = slices.iter().map(|s| s.percentage).sum();

        assert!((amount_sum - period_expense_total(&txs, january())).abs() < 1e-9);
        assert_eq!(pct_sum, 99);
        assert!((pct_sum as i64 - 100).abs() <= slices.len() as i64);
    }

    #[test]
    fn test_same_name_categories_merge_under_first_id() {
        let mut cats = categories();
        cats.push(FinancialCategory::new("cat-ads-2", "Tráfego Pago", TransactionType::Expense));
        let txs = vec![
            expense("2024-01-01", 30.0, "cat-ads"),
            expense("2024-01-02", 70.0, "cat-ads-2"),
        ];

        let slices = category_breakdown(&txs, &cats, january());

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].id, "cat-ads");
        assert_eq!(slices[0].amount, 100.0);
        assert!(find_slice(&slices, "cat-ads").is_some());
        assert!(find_slice(&slices, "cat-ads-2").is_none());
    }
}
