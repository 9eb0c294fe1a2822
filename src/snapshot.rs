// 💾 Snapshot - JSON file of every store, plus CSV import of transactions
//
// A snapshot is the read-only view the aggregations run against. The CLI
// and the server both load one at startup; without a file they fall back
// to the demo workspace.

use crate::entities::{Transaction, TransactionStatus, TransactionType};
use crate::period::parse_date;
use crate::registry::Workspace;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Load a workspace from a JSON snapshot
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Workspace> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let workspace: Workspace = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot JSON: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        transactions = workspace.finance.transactions().len(),
        clients = workspace.clients.clients().len(),
        "snapshot loaded"
    );
    Ok(workspace)
}

/// Write a workspace as pretty JSON
pub fn save_snapshot<P: AsRef<Path>>(workspace: &Workspace, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(workspace).context("Failed to serialize snapshot")?;
    fs::write(path, json).with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
    tracing::info!(path = %path.display(), "snapshot saved");
    Ok(())
}

/// Snapshot at `path` when given, demo workspace otherwise
pub fn load_or_demo(path: Option<&Path>) -> Result<Workspace> {
    match path {
        Some(p) => load_snapshot(p),
        None => {
            tracing::info!("no snapshot configured, using demo workspace");
            Ok(Workspace::with_defaults())
        }
    }
}

// ============================================================================
// CSV IMPORT
// ============================================================================

/// One line of a bookkeeping export.
///
/// Header: `date,description,amount,type,category,account,status[,client]`
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    description: String,
    amount: String,
    #[serde(rename = "type")]
    kind: String,
    category: String,
    account: String,
    status: String,
    #[serde(default)]
    client: Option<String>,
}

/// Parse "1234.56", "1.234", "1.234,56" or "R$ 1.234,56" into a number.
///
/// pt-BR notation wins: a comma is the decimal separator and dots group
/// thousands. Without a comma, dots followed by three-digit groups are
/// thousands separators and a lone dot is a decimal point. The sign is kept.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let cleaned: String = unsigned
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let normalized = normalize_separators(&cleaned)
        .with_context(|| format!("Invalid amount: {}", raw))?;
    let value = normalized
        .parse::<f64>()
        .with_context(|| format!("Invalid amount: {}", raw))?;

    Ok(if negative { -value } else { value })
}

/// Rewrite a pt-BR or plain number as "1234.56"
fn normalize_separators(value: &str) -> Result<String> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        anyhow::bail!("not a number");
    }

    let (integer, fraction) = match value.split_once(',') {
        Some((integer, fraction)) => {
            if fraction.is_empty() || fraction.contains(',') || fraction.contains('.') {
                anyhow::bail!("misplaced separator");
            }
            (integer, Some(fraction))
        }
        None => (value, None),
    };

    let groups: Vec<&str> = integer.split('.').collect();
    if groups.len() == 1 {
        return Ok(match fraction {
            Some(f) => format!("{}.{}", integer, f),
            None => integer.to_string(),
        });
    }

    let thousands = is_grouped(&groups);
    match fraction {
        Some(f) if thousands => Ok(format!("{}.{}", groups.concat(), f)),
        Some(_) => anyhow::bail!("bad thousands grouping"),
        None if thousands => Ok(groups.concat()),
        // a single dot that does not group thousands is a decimal point
        None if groups.len() == 2 && !groups[0].is_empty() && !groups[1].is_empty() => {
            Ok(integer.to_string())
        }
        None => anyhow::bail!("bad thousands grouping"),
    }
}

/// "1", "234", "567": a leading group of 1-3 digits then exact triples.
/// "0.500" is a decimal, not five hundred.
fn is_grouped(groups: &[&str]) -> bool {
    let Some((head, rest)) = groups.split_first() else {
        return false;
    };
    (1..=3).contains(&head.len()) && !head.starts_with('0') && rest.iter().all(|g| g.len() == 3)
}

fn parse_kind(raw: &str) -> Result<TransactionType> {
    match raw.trim().to_lowercase().as_str() {
        "receita" | "income" => Ok(TransactionType::Income),
        "despesa" | "expense" => Ok(TransactionType::Expense),
        other => anyhow::bail!("Unknown transaction type: {}", other),
    }
}

fn parse_status(raw: &str) -> Result<TransactionStatus> {
    match raw.trim().to_lowercase().as_str() {
        "pago" | "paid" => Ok(TransactionStatus::Paid),
        "pendente" | "pending" => Ok(TransactionStatus::Pending),
        other => anyhow::bail!("Unknown transaction status: {}", other),
    }
}

impl CsvRow {
    fn into_transaction(self) -> Result<Transaction> {
        let amount = parse_amount(&self.amount)?;
        if amount < 0.0 {
            anyhow::bail!(
                "Negative amount {}: record refunds with the opposite type",
                self.amount.trim()
            );
        }
        let mut tx = Transaction::new(
            parse_date(&self.date)?,
            self.description.trim(),
            amount,
            parse_kind(&self.kind)?,
            self.category.trim(),
            self.account.trim(),
            parse_status(&self.status)?,
        );
        tx.client_id = self.client.filter(|c| !c.trim().is_empty());
        Ok(tx)
    }
}

/// Read every transaction of a CSV export. Any malformed line fails the
/// whole import with its line number.
pub fn import_csv<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Transaction>> {
    let csv_path = csv_path.as_ref();
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut transactions = Vec::new();

    for (index, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // +2: 1-indexed plus the header row
        let line = index + 2;
        let row = result.with_context(|| format!("Failed to parse CSV line {}", line))?;
        let tx = row
            .into_transaction()
            .with_context(|| format!("Invalid transaction on CSV line {}", line))?;
        transactions.push(tx);
    }

    tracing::info!(path = %csv_path.display(), count = transactions.len(), "CSV imported");
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_amount_formats() {
        assert_eq!(parse_amount("1234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("1.234,56").unwrap(), 1234.56);
        assert_eq!(parse_amount(" R$ 10,00 ").unwrap(), 10.0);
        assert!(parse_amount("dez reais").is_err());
    }

    #[test]
    fn test_parse_amount_dot_thousands_without_comma() {
        assert_eq!(parse_amount("1.234").unwrap(), 1234.0);
        assert_eq!(parse_amount("R$ 1.234").unwrap(), 1234.0);
        assert_eq!(parse_amount("1.234.567").unwrap(), 1_234_567.0);
        assert_eq!(parse_amount("0.500").unwrap(), 0.5);
        assert_eq!(parse_amount("10.5").unwrap(), 10.5);
    }

    #[test]
    fn test_parse_amount_rejects_misplaced_separators() {
        assert!(parse_amount("1,234.56").is_err());
        assert!(parse_amount("1.23.4").is_err());
        assert!(parse_amount("1.2345,00").is_err());
        assert!(parse_amount("1,2,3").is_err());
        assert!(parse_amount("10,").is_err());
        assert!(parse_amount("1e5").is_err());
    }

    #[test]
    fn test_parse_amount_keeps_sign() {
        assert_eq!(parse_amount("-50,00").unwrap(), -50.0);
        assert_eq!(parse_amount("- R$ 1.234,56").unwrap(), -1234.56);
    }

    #[test]
    fn test_import_rejects_negative_amount() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,description,amount,type,category,account,status").unwrap();
        writeln!(file, "2024-10-03,Estorno,\"-50,00\",receita,cat-fee,acc-itau,pago").unwrap();

        let err = import_csv(file.path()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("line 2"));
        assert!(message.contains("Negative amount"));
    }

    #[test]
    fn test_import_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,description,amount,type,category,account,status,client").unwrap();
        writeln!(file, "2024-10-01,Fee Nubank,\"12.000,00\",receita,cat-fee,acc-itau,pago,cli-1").unwrap();
        writeln!(file, "2024-10-02,Meta Ads,3400,despesa,cat-midia,acc-itau,pendente,").unwrap();

        let txs = import_csv(file.path()).unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].amount, 12_000.0);
        assert_eq!(txs[0].kind, TransactionType::Income);
        assert_eq!(txs[0].client_id.as_deref(), Some("cli-1"));
        assert_eq!(txs[1].status, TransactionStatus::Pending);
        assert!(txs[1].client_id.is_none());
        assert!(txs[1].id.starts_with("txn-"));
    }

    #[test]
    fn test_import_reports_bad_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,description,amount,type,category,account,status").unwrap();
        writeln!(file, "2024-10-01,Ok,10,receita,c,a,pago").unwrap();
        writeln!(file, "2024-10-02,Bad,10,transferencia,c,a,pago").unwrap();

        let err = import_csv(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("line 3"));
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let workspace = Workspace::with_defaults();

        save_snapshot(&workspace, &path).unwrap();
        let loaded = load_snapshot(&path).unwrap();

        assert_eq!(loaded, workspace);
    }

    #[test]
    fn test_missing_snapshot_has_context() {
        let err = load_snapshot("/nope/snapshot.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read snapshot"));
    }

    #[test]
    fn test_load_or_demo_without_path() {
        let workspace = load_or_demo(None).unwrap();
        assert!(!workspace.finance.transactions().is_empty());
    }
}
