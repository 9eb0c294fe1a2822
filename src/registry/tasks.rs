// 📋 Project board store - groups, projects, tasks and the current selection

use super::new_id;
use crate::entities::{Client, Project, ProjectGroup, Task, TaskPriority, TaskStatus, TaskUpdate};
use crate::error::{StoreError, StoreResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskRegistry {
    project_groups: Vec<ProjectGroup>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    selected_project_id: Option<String>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = TaskRegistry::new();

        registry.project_groups = vec![
            ProjectGroup {
                id: "group-nubank".to_string(),
                name: "Campanhas Nubank".to_string(),
                description: "Performance e branding premium.".to_string(),
                client_id: Some("cli-1".to_string()),
                is_pinned: true,
            },
            ProjectGroup {
                id: "group-mcd".to_string(),
                name: "Social McDonald's".to_string(),
                description: "Comunidade e sazonais.".to_string(),
                client_id: Some("cli-2".to_string()),
                is_pinned: false,
            },
            ProjectGroup {
                id: "group-internal".to_string(),
                name: "Operação Interna".to_string(),
                description: "Desenvolvimento e cultura da agência.".to_string(),
                client_id: None,
                is_pinned: false,
            },
        ];

        registry.projects = vec![
            Project {
                id: "proj-cli-1-q4".to_string(),
                group_id: "group-nubank".to_string(),
                name: "Ultravioleta Q4".to_string(),
                purpose: "Adesão premium.".to_string(),
                focus: "Performance".to_string(),
                client: "Nubank".to_string(),
                summary: "Lançamento do novo benefício de cashback.".to_string(),
                deadline: "2024-12-20".to_string(),
                is_pinned: true,
            },
            Project {
                id: "proj-cli-2-bf".to_string(),
                group_id: "group-mcd".to_string(),
                name: "Black Friday".to_string(),
                purpose: "Tráfego para o app.".to_string(),
                focus: "Social".to_string(),
                client: "McDonald's".to_string(),
                summary: "Calendário de posts e mídia da campanha.".to_string(),
                deadline: "2024-11-29".to_string(),
                is_pinned: false,
            },
            Project {
                id: "proj-nexus".to_string(),
                group_id: "group-internal".to_string(),
                name: "Nexus v2".to_string(),
                purpose: "Evolução do HUB.".to_string(),
                focus: "Engenharia".to_string(),
                client: "Agência".to_string(),
                summary: "Nova engine de sincronização contábil.".to_string(),
                deadline: "2024-11-15".to_string(),
                is_pinned: false,
            },
        ];

        let seeds = [
            ("Briefing criativo", "proj-cli-1-q4", TaskStatus::Done, TaskPriority::High, (2024, 9, 20)),
            ("Peças de mídia", "proj-cli-1-q4", TaskStatus::InProgress, TaskPriority::High, (2024, 10, 4)),
            ("Relatório de performance", "proj-cli-1-q4", TaskStatus::Todo, TaskPriority::Medium, (2024, 11, 5)),
            ("Grade de posts", "proj-cli-2-bf", TaskStatus::Todo, TaskPriority::Medium, (2024, 10, 11)),
            ("Aprovação do cliente", "proj-cli-2-bf", TaskStatus::Todo, TaskPriority::Low, (2024, 11, 20)),
            ("Migração do banco", "proj-nexus", TaskStatus::InProgress, TaskPriority::Medium, (2024, 11, 1)),
        ];
        for (title, project_id, status, priority, (y, m, d)) in seeds {
            if let Some(due_date) = NaiveDate::from_ymd_opt(y, m, d) {
                registry.tasks.push(Task {
                    id: new_id("task"),
                    title: title.to_string(),
                    description: String::new(),
                    project_id: project_id.to_string(),
                    status,
                    priority,
                    due_date,
                    assignee: String::new(),
                });
            }
        }

        registry
    }

    // ========================================================================
    // READS
    // ========================================================================

    pub fn project_groups(&self) -> &[ProjectGroup] {
        &self.project_groups
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn tasks_for_project(&self, project_id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.project_id == project_id).collect()
    }

    pub fn projects_in_group(&self, group_id: &str) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.group_id == group_id).collect()
    }

    /// (pinned, regular) groups, each in insertion order
    pub fn partition_groups(&self) -> (Vec<&ProjectGroup>, Vec<&ProjectGroup>) {
        self.project_groups.iter().partition(|g| g.is_pinned)
    }

    /// (pinned, regular) projects, each in insertion order
    pub fn partition_projects(&self) -> (Vec<&Project>, Vec<&Project>) {
        self.projects.iter().partition(|p| p.is_pinned)
    }

    /// Projects of the client's groups plus those naming it directly, deduplicated
    pub fn client_projects(&self, client: &Client) -> Vec<&Project> {
        let group_ids: Vec<&str> = self
            .project_groups
            .iter()
            .filter(|g| g.client_id.as_deref() == Some(client.id.as_str()))
            .map(|g| g.id.as_str())
            .collect();

        self.projects
            .iter()
            .filter(|p| {
                group_ids.contains(&p.group_id.as_str())
                    || p.client == client.name
                    || client.company_name.as_deref() == Some(p.client.as_str())
            })
            .collect()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_project_id
            .as_deref()
            .and_then(|id| self.find_project(id))
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    pub fn select_project(&mut self, project_id: &str) -> StoreResult<()> {
        if self.find_project(project_id).is_none() {
            return Err(StoreError::not_found("project", project_id));
        }
        self.selected_project_id = Some(project_id.to_string());
        Ok(())
    }

    /// New groups start unpinned
    pub fn add_project_group(&mut self, mut group: ProjectGroup) -> String {
        group.id = new_id("group");
        group.is_pinned = false;
        let id = group.id.clone();
        tracing::debug!(id = %id, name = %group.name, "project group added");
        self.project_groups.push(group);
        id
    }

    pub fn update_project_group<F>(&mut self, id: &str, update: F) -> StoreResult<()>
    where
        F: FnOnce(&mut ProjectGroup),
    {
        let group = self
            .project_groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| StoreError::not_found("project group", id))?;
        update(&mut *group);
        group.id = id.to_string();
        Ok(())
    }

    /// New projects start unpinned and must belong to an existing group
    pub fn add_project(&mut self, mut project: Project) -> StoreResult<String> {
        if !self.project_groups.iter().any(|g| g.id == project.group_id) {
            return Err(StoreError::not_found("project group", &project.group_id));
        }
        project.id = new_id("proj");
        project.is_pinned = false;
        let id = project.id.clone();
        tracing::debug!(id = %id, group = %project.group_id, "project added");
        self.projects.push(project);
        Ok(id)
    }

    /// Id and group stay fixed
    pub fn update_project<F>(&mut self, id: &str, update: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Project),
    {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("project", id))?;
        let group_id = project.group_id.clone();
        update(&mut *project);
        project.id = id.to_string();
        project.group_id = group_id;
        Ok(())
    }

    pub fn toggle_pin_project(&mut self, id: &str) -> StoreResult<bool> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("project", id))?;
        project.is_pinned = !project.is_pinned;
        Ok(project.is_pinned)
    }

    pub fn toggle_pin_project_group(&mut self, id: &str) -> StoreResult<bool> {
        let group = self
            .project_groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| StoreError::not_found("project group", id))?;
        group.is_pinned = !group.is_pinned;
        Ok(group.is_pinned)
    }

    pub fn add_task(&mut self, mut task: Task) -> String {
        task.id = new_id("task");
        let id = task.id.clone();
        tracing::debug!(id = %id, project = %task.project_id, "task added");
        self.tasks.push(task);
        id
    }

    fn task_mut(&mut self, id: &str) -> StoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("task", id))
    }

    pub fn update_task(&mut self, id: &str, update: TaskUpdate) -> StoreResult<()> {
        update.apply(self.task_mut(id)?);
        Ok(())
    }

    pub fn update_task_status(&mut self, id: &str, status: TaskStatus) -> StoreResult<()> {
        self.task_mut(id)?.status = status;
        Ok(())
    }

    pub fn delete_task(&mut self, id: &str) -> StoreResult<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("task", id))?;
        tracing::debug!(id, "task deleted");
        Ok(self.tasks.remove(index))
    }
}
