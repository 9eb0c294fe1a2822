// 🏦 Financial Account - where cash is held
//
// Balances are ground truth: the cockpit sums them directly instead of
// deriving them from transactions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Bank,
    Cash,
    Credit,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Bank => "bank",
            AccountType::Cash => "cash",
            AccountType::Credit => "credit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAccount {
    pub id: String,
    pub name: String,
    pub balance: f64,
    #[serde(rename = "type")]
    pub kind: AccountType,
}

impl FinancialAccount {
    pub fn new(id: &str, name: &str, balance: f64, kind: AccountType) -> Self {
        FinancialAccount {
            id: id.to_string(),
            name: name.to_string(),
            balance,
            kind,
        }
    }
}

/// Cash on hand across every account
pub fn total_balance(accounts: &[FinancialAccount]) -> f64 {
    accounts.iter().map(|a| a.balance).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_balance_includes_negative_credit() {
        let accounts = vec![
            FinancialAccount::new("a1", "Itaú PJ", 12000.0, AccountType::Bank),
            FinancialAccount::new("a2", "Caixa", 500.0, AccountType::Cash),
            FinancialAccount::new("a3", "Cartão", -1500.0, AccountType::Credit),
        ];

        assert_eq!(total_balance(&accounts), 11000.0);
        assert_eq!(total_balance(&[]), 0.0);
    }

    #[test]
    fn test_account_type_wire_name() {
        let acc = FinancialAccount::new("a1", "Itaú", 1.0, AccountType::Credit);
        let value = serde_json::to_value(&acc).unwrap();
        assert_eq!(value["type"], "credit");
    }
}
