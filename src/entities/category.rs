// 🏷️ Financial Category - labels transactions for the expense breakdown

use super::transaction::TransactionType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialCategory {
    pub id: String,

    /// Display name (e.g., "Tráfego Pago", "Infraestrutura")
    pub name: String,

    /// Monthly budget, when one was planned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,

    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl FinancialCategory {
    pub fn new(id: &str, name: &str, kind: TransactionType) -> Self {
        FinancialCategory {
            id: id.to_string(),
            name: name.to_string(),
            budget: None,
            kind,
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip_keeps_budget() {
        let cat = FinancialCategory::new("cat-ads", "Tráfego Pago", TransactionType::Expense)
            .with_budget(5000.0);

        let json = serde_json::to_string(&cat).unwrap();
        assert!(json.contains("\"type\":\"despesa\""));

        let back: FinancialCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cat);
        assert!(back.is_expense());
    }
}
