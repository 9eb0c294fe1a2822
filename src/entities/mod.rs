// Entity Models
//
// Plain data owned by the registries. The aggregation layer only ever
// reads borrowed slices of these.

pub mod transaction;
pub mod category;
pub mod account;
pub mod client;
pub mod task;
pub mod calendar;
pub mod email;

pub use transaction::{Transaction, TransactionStatus, TransactionType};
pub use category::FinancialCategory;
pub use account::{total_balance, AccountType, FinancialAccount};
pub use client::{
    ActivityType, ChecklistItem, Client, ClientActivity, ClientKeyResult, ClientObjective,
    ClientStatus, ObjectiveStatus,
};
pub use task::{Project, ProjectGroup, Task, TaskPriority, TaskStatus, TaskUpdate};
pub use calendar::{CalendarCategory, CalendarPriority, CalendarStatus, CalendarTask};
pub use email::{Email, EmailAttachment, EmailFolder, FolderIcon, Mailbox};
