// 🗂️ Registries - explicit in-memory stores the aggregations read from
//
// Each store owns one family of collections and exposes CRUD on it.
// Readers get plain slices, which are a point-in-time view for the
// aggregation functions.

pub mod calendar;
pub mod clients;
pub mod finance;
pub mod mail;
pub mod tasks;

pub use calendar::CalendarRegistry;
pub use clients::ClientRegistry;
pub use finance::FinanceRegistry;
pub use mail::{MailRegistry, MailGroups};
pub use tasks::TaskRegistry;

use serde::{Deserialize, Serialize};

/// New record id: `<prefix>-<uuid v4>`
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

/// Every store of the console, as loaded from a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workspace {
    pub finance: FinanceRegistry,
    pub tasks: TaskRegistry,
    pub clients: ClientRegistry,
    pub calendar: CalendarRegistry,
    pub mail: MailRegistry,
}

impl Workspace {
    /// Demo agency with a few months of activity
    pub fn with_defaults() -> Self {
        Workspace {
            finance: FinanceRegistry::with_defaults(),
            tasks: TaskRegistry::with_defaults(),
            clients: ClientRegistry::with_defaults(),
            calendar: CalendarRegistry::with_defaults(),
            mail: MailRegistry::with_defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_prefix() {
        let id = new_id("txn");
        assert!(id.starts_with("txn-"));
        assert_eq!(id.len(), "txn-".len() + 36);
        assert_ne!(new_id("txn"), id);
    }

    #[test]
    fn test_defaults_are_populated() {
        let ws = Workspace::with_defaults();
        assert!(!ws.finance.transactions().is_empty());
        assert!(!ws.clients.clients().is_empty());
        assert!(!ws.tasks.projects().is_empty());
        assert!(!ws.mail.folders().is_empty());
    }
}
