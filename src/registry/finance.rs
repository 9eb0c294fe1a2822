// 💳 Finance store - transactions, categories and accounts

use super::new_id;
use crate::entities::{
    AccountType, Client, FinancialAccount, FinancialCategory, Transaction, TransactionStatus,
    TransactionType,
};
use crate::error::{StoreError, StoreResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceRegistry {
    transactions: Vec<Transaction>,
    categories: Vec<FinancialCategory>,
    accounts: Vec<FinancialAccount>,
}

impl FinanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        transactions: Vec<Transaction>,
        categories: Vec<FinancialCategory>,
        accounts: Vec<FinancialAccount>,
    ) -> Self {
        FinanceRegistry {
            transactions,
            categories,
            accounts,
        }
    }

    /// Registry pre-loaded with the demo agency's books
    pub fn with_defaults() -> Self {
        let mut registry = FinanceRegistry::new();
        registry.register_default_books();
        registry
    }

    fn register_default_books(&mut self) {
        self.categories = vec![
            FinancialCategory::new("cat-fee", "Fee Mensal", TransactionType::Income),
            FinancialCategory::new("cat-projeto", "Projetos", TransactionType::Income),
            FinancialCategory::new("cat-midia", "Mídia Paga", TransactionType::Expense).with_budget(8000.0),
            FinancialCategory::new("cat-folha", "Folha", TransactionType::Expense).with_budget(15000.0),
            FinancialCategory::new("cat-software", "Software", TransactionType::Expense).with_budget(1500.0),
            FinancialCategory::new("cat-aluguel", "Aluguel", TransactionType::Expense),
        ];

        self.accounts = vec![
            FinancialAccount::new("acc-itau", "Itaú PJ", 18_500.0, AccountType::Bank),
            FinancialAccount::new("acc-caixa", "Caixa Pequeno", 650.0, AccountType::Cash),
            FinancialAccount::new("acc-cartao", "Cartão Corporativo", -2_300.0, AccountType::Credit),
        ];

        let entries = [
            ((2024, 9, 2), "Fee Nubank setembro", 12_000.0, TransactionType::Income, "cat-fee", Some("cli-1")),
            ((2024, 9, 5), "Fee McDonald's setembro", 9_000.0, TransactionType::Income, "cat-fee", Some("cli-2")),
            ((2024, 9, 6), "Folha setembro", 14_200.0, TransactionType::Expense, "cat-folha", None),
            ((2024, 9, 10), "Meta Ads Nubank", 3_400.0, TransactionType::Expense, "cat-midia", Some("cli-1")),
            ((2024, 9, 10), "Aluguel escritório", 4_000.0, TransactionType::Expense, "cat-aluguel", None),
            ((2024, 9, 18), "Licenças Adobe", 890.0, TransactionType::Expense, "cat-software", None),
            ((2024, 10, 1), "Fee Nubank outubro", 12_000.0, TransactionType::Income, "cat-fee", Some("cli-1")),
            ((2024, 10, 3), "Landing page Black Friday", 6_500.0, TransactionType::Income, "cat-projeto", Some("cli-2")),
            ((2024, 10, 7), "Folha outubro", 14_200.0, TransactionType::Expense, "cat-folha", None),
            ((2024, 10, 10), "Google Ads McDonald's", 2_750.0, TransactionType::Expense, "cat-midia", Some("cli-2")),
            ((2024, 10, 10), "Aluguel escritório", 4_000.0, TransactionType::Expense, "cat-aluguel", None),
            ((2024, 10, 21), "Licenças Figma", 420.0, TransactionType::Expense, "cat-software", None),
        ];

        for ((y, m, d), description, amount, kind, category_id, client_id) in entries {
            let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
                continue;
            };
            // The latest month is still being collected
            let status = if m == 10 && kind == TransactionType::Income {
                TransactionStatus::Pending
            } else {
                TransactionStatus::Paid
            };
            let mut tx = Transaction::new(date, description, amount, kind, category_id, "acc-itau", status);
            tx.client_id = client_id.map(str::to_string);
            self.transactions.push(tx);
        }
    }

    // ========================================================================
    // READS
    // ========================================================================

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[FinancialCategory] {
        &self.categories
    }

    pub fn accounts(&self) -> &[FinancialAccount] {
        &self.accounts
    }

    pub fn find_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn find_category(&self, id: &str) -> Option<&FinancialCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn find_account(&self, id: &str) -> Option<&FinancialAccount> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Display name of a category id, empty when unknown
    pub fn category_name(&self, id: &str) -> &str {
        self.find_category(id).map(|c| c.name.as_str()).unwrap_or("")
    }

    /// Entries tagged with the client, or whose description mentions its name.
    /// Newest first.
    pub fn client_transactions(&self, client: &Client) -> Vec<&Transaction> {
        let name = client.name.to_lowercase();
        let mut rows: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| {
                t.client_id.as_deref() == Some(client.id.as_str())
                    || (!name.is_empty() && t.description.to_lowercase().contains(&name))
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    /// Store a transaction; an empty id gets a fresh one. Returns the id.
    pub fn add_transaction(&mut self, mut tx: Transaction) -> StoreResult<String> {
        if !tx.amount.is_finite() || tx.amount < 0.0 {
            return Err(StoreError::Invalid(format!(
                "amount must be a non-negative number, got {}",
                tx.amount
            )));
        }
        if tx.id.is_empty() {
            tx.id = new_id("txn");
        }
        tracing::debug!(id = %tx.id, amount = tx.amount, kind = tx.kind.as_str(), "transaction added");
        let id = tx.id.clone();
        self.transactions.push(tx);
        Ok(id)
    }

    /// Append many entries, as after a CSV import. Returns how many were kept.
    pub fn extend_transactions<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = Transaction>,
    {
        let mut added = 0;
        for tx in entries {
            match self.add_transaction(tx) {
                Ok(_) => added += 1,
                Err(e) => tracing::warn!(error = %e, "skipping transaction"),
            }
        }
        added
    }

    pub fn delete_transaction(&mut self, id: &str) -> StoreResult<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("transaction", id))?;
        tracing::debug!(id, "transaction deleted");
        Ok(self.transactions.remove(index))
    }

    pub fn set_status(&mut self, id: &str, status: TransactionStatus) -> StoreResult<()> {
        let tx = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("transaction", id))?;
        tx.status = status;
        Ok(())
    }

    pub fn add_category(&mut self, mut category: FinancialCategory) -> String {
        if category.id.is_empty() {
            category.id = new_id("cat");
        }
        let id = category.id.clone();
        self.categories.push(category);
        id
    }

    pub fn add_account(&mut self, mut account: FinancialAccount) -> String {
        if account.id.is_empty() {
            account.id = new_id("acc");
        }
        let id = account.id.clone();
        self.accounts.push(account);
        id
    }
}
