// 📋 Project board entities - groups, projects and tasks

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "A_FAZER")]
    Todo,
    #[serde(rename = "EM_ANDAMENTO")]
    InProgress,
    #[serde(rename = "CONCLUIDO")]
    Done,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    #[serde(rename = "ALTA")]
    High,
    #[serde(rename = "MEDIA")]
    Medium,
    #[serde(rename = "BAIXA")]
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default)]
    pub is_pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub group_id: String,
    pub name: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub focus: String,
    /// Client display name, not an id
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub is_pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub project_id: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub assignee: String,
}

impl Task {
    /// Loose client linkage: the client id appears somewhere in the project id
    pub fn belongs_to_client(&self, client_id: &str) -> bool {
        !client_id.is_empty() && !self.project_id.is_empty() && self.project_id.contains(client_id)
    }
}

/// Fields that may change on an existing task
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
    pub assignee: Option<String>,
}

impl TaskUpdate {
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(assignee) = self.assignee {
            task.assignee = assignee;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(project_id: &str) -> Task {
        Task {
            id: "t1".to_string(),
            title: "Briefing".to_string(),
            description: String::new(),
            project_id: project_id.to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            assignee: "Ana".to_string(),
        }
    }

    #[test]
    fn test_substring_client_link() {
        assert!(task("proj-cli-1-q4").belongs_to_client("cli-1"));
        assert!(!task("proj-2").belongs_to_client("cli-1"));
        assert!(!task("").belongs_to_client(""));
    }

    #[test]
    fn test_empty_client_id_links_nothing() {
        assert!(!task("proj-cli-1-q4").belongs_to_client(""));
    }

    #[test]
    fn test_task_update_only_touches_given_fields() {
        let mut t = task("proj-1");
        TaskUpdate {
            status: Some(TaskStatus::Done),
            assignee: Some("Bruno".to_string()),
            ..Default::default()
        }
        .apply(&mut t);

        assert_eq!(t.status, TaskStatus::Done);
        assert_eq!(t.assignee, "Bruno");
        assert_eq!(t.title, "Briefing");
    }

    #[test]
    fn test_status_wire_names() {
        let t = task("proj-1");
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["status"], "A_FAZER");
        assert_eq!(value["priority"], "MEDIA");
        assert_eq!(value["dueDate"], "2024-05-01");
    }
}
