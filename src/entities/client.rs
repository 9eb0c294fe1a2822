// 🤝 Client Entity - relationship record with objectives and activity log
//
// Objectives and activities are owned by the client; tasks are linked
// separately through the project board (see `client_health`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// CLIENT STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClientStatus {
    Active,
    Prospect,
    Churned,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "ACTIVE",
            ClientStatus::Prospect => "PROSPECT",
            ClientStatus::Churned => "CHURNED",
        }
    }
}

// ============================================================================
// OBJECTIVES & KEY RESULTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientKeyResult {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveStatus {
    #[serde(rename = "EM_ANDAMENTO")]
    InProgress,
    #[serde(rename = "CONCLUIDO")]
    Completed,
    #[serde(rename = "ATRASADO")]
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientObjective {
    pub id: String,
    pub title: String,
    /// Free-form deadline as typed in the form (usually YYYY-MM-DD, may be empty)
    #[serde(default)]
    pub deadline: String,
    pub status: ObjectiveStatus,
    #[serde(default)]
    pub key_results: Vec<ClientKeyResult>,
}

impl ClientObjective {
    pub fn new(title: &str, deadline: &str) -> Self {
        ClientObjective {
            id: format!("obj-{}", uuid::Uuid::new_v4()),
            title: title.to_string(),
            deadline: deadline.to_string(),
            status: ObjectiveStatus::InProgress,
            key_results: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ObjectiveStatus::Completed
    }
}

// ============================================================================
// ACTIVITY LOG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityType {
    Complaint,
    Incident,
    Meeting,
    Note,
    Email,
    Call,
    /// Anything the log has that the health score does not care about
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientActivity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ClientActivity {
    pub fn new(kind: ActivityType, description: &str, date: Option<NaiveDate>) -> Self {
        ClientActivity {
            id: format!("act-{}", uuid::Uuid::new_v4()),
            kind,
            description: description.to_string(),
            date,
        }
    }
}

// ============================================================================
// CLIENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub status: ClientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_objective: Option<String>,
    #[serde(default)]
    pub objectives: Vec<ClientObjective>,
    #[serde(default)]
    pub activities: Vec<ClientActivity>,
    #[serde(default)]
    pub onboarding_checklist: Vec<ChecklistItem>,
    /// Start of the relationship (YYYY-MM-DD)
    pub since: String,
}

impl Client {
    pub fn new(id: &str, name: &str, status: ClientStatus, since: &str) -> Self {
        Client {
            id: id.to_string(),
            name: name.to_string(),
            company_name: None,
            status,
            cnpj: None,
            responsible_name: None,
            email: None,
            phone: None,
            website: None,
            contract_objective: None,
            objectives: Vec::new(),
            activities: Vec::new(),
            onboarding_checklist: Vec::new(),
            since: since.to_string(),
        }
    }

    /// Share of onboarding items done, 0-100
    pub fn onboarding_progress(&self) -> u32 {
        let total = self.onboarding_checklist.len();
        if total == 0 {
            return 0;
        }
        let done = self.onboarding_checklist.iter().filter(|i| i.completed).count();
        ((done as f64 / total as f64) * 100.0).round() as u32
    }
}
