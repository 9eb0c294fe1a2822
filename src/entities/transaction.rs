// 💸 Transaction Entity - a single bookkeeping entry
//
// Amounts are always non-negative; the direction lives in `kind`.
// Only `Paid` entries count as realized cash movement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money coming in ("receita")
    #[serde(rename = "receita")]
    Income,

    /// Money going out ("despesa")
    #[serde(rename = "despesa")]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "receita",
            TransactionType::Expense => "despesa",
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, TransactionType::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, TransactionType::Expense)
    }
}

// ============================================================================
// TRANSACTION STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[serde(rename = "pago")]
    Paid,

    #[serde(rename = "pendente")]
    Pending,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Paid => "pago",
            TransactionStatus::Pending => "pendente",
        }
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Assigned by the books when empty
    #[serde(default)]
    pub id: String,

    /// Calendar day of the entry (no time component)
    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    /// Non-negative amount in BRL
    pub amount: f64,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub category_id: String,

    pub account_id: String,

    pub status: TransactionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Transaction {
    /// Create a transaction with a generated id
    pub fn new(
        date: NaiveDate,
        description: &str,
        amount: f64,
        kind: TransactionType,
        category_id: &str,
        account_id: &str,
        status: TransactionStatus,
    ) -> Self {
        Transaction {
            id: format!("txn-{}", uuid::Uuid::new_v4()),
            date,
            description: description.to_string(),
            amount,
            kind,
            category_id: category_id.to_string(),
            account_id: account_id.to_string(),
            status,
            client_id: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == TransactionStatus::Paid
    }

    /// Amount with sign applied (income positive, expense negative)
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_wire_names_match_console_json() {
        let json = r#"{
            "id": "t1",
            "date": "2024-01-02",
            "description": "Hospedagem",
            "amount": 50.0,
            "type": "despesa",
            "categoryId": "cat-infra",
            "accountId": "acc-1",
            "status": "pendente"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.date, day("2024-01-02"));
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.client_id, None);
        assert!(!tx.is_paid());

        let back = serde_json::to_value(&tx).unwrap();
        assert_eq!(back["type"], "despesa");
        assert_eq!(back["categoryId"], "cat-infra");
        assert!(back.get("clientId").is_none());
    }

    #[test]
    fn test_new_generates_prefixed_id() {
        let tx = Transaction::new(
            day("2024-03-01"),
            "Fee",
            1200.0,
            TransactionType::Income,
            "cat-fee",
            "acc-1",
            TransactionStatus::Paid,
        );

        assert!(tx.id.starts_with("txn-"));
        assert_eq!(tx.signed_amount(), 1200.0);
    }

    #[test]
    fn test_signed_amount_for_expense() {
        let mut tx = Transaction::new(
            day("2024-03-01"),
            "Aluguel",
            300.0,
            TransactionType::Expense,
            "cat-office",
            "acc-1",
            TransactionStatus::Paid,
        );
        assert_eq!(tx.signed_amount(), -300.0);

        tx.kind = TransactionType::Income;
        assert_eq!(tx.signed_amount(), 300.0);
    }
}
