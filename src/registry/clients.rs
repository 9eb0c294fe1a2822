// 🤝 Client store - relationship records, objectives and activity log

use super::new_id;
use crate::entities::{
    ActivityType, ChecklistItem, Client, ClientActivity, ClientKeyResult, ClientObjective,
    ClientStatus, ObjectiveStatus,
};
use crate::error::{StoreError, StoreResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientRegistry {
    clients: Vec<Client>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = ClientRegistry::new();
        let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d);

        let mut nubank = Client::new("cli-1", "Nubank", ClientStatus::Active, "2023-03-01");
        nubank.company_name = Some("Nu Pagamentos S.A.".to_string());
        nubank.contract_objective = Some("Aquisição de clientes premium".to_string());
        let mut leads = ClientObjective::new("Dobrar leads qualificados", "2024-12-31");
        leads.key_results = vec![
            ClientKeyResult { id: new_id("kr"), title: "CPL abaixo de R$ 40".to_string(), is_completed: true },
            ClientKeyResult { id: new_id("kr"), title: "5 mil leads/mês".to_string(), is_completed: false },
        ];
        let mut launch = ClientObjective::new("Lançar Ultravioleta", "2024-09-30");
        launch.status = ObjectiveStatus::Completed;
        nubank.objectives = vec![leads, launch];
        nubank.activities = vec![
            ClientActivity::new(ActivityType::Meeting, "Kickoff Q4", day(9, 2)),
            ClientActivity::new(ActivityType::Complaint, "Atraso nas peças de mídia", day(10, 8)),
        ];
        nubank.onboarding_checklist = vec![
            ChecklistItem { id: new_id("chk"), label: "Contrato assinado".to_string(), completed: true },
            ChecklistItem { id: new_id("chk"), label: "Acessos às contas de anúncio".to_string(), completed: true },
        ];

        let mut mcd = Client::new("cli-2", "McDonald's", ClientStatus::Active, "2022-11-15");
        mcd.activities = vec![
            ClientActivity::new(ActivityType::Complaint, "Post publicado com erro", day(9, 12)),
            ClientActivity::new(ActivityType::Complaint, "Resposta lenta no SAC", day(9, 25)),
            ClientActivity::new(ActivityType::Incident, "Pixel fora do ar", day(10, 2)),
        ];
        mcd.objectives = vec![ClientObjective::new("Engajamento +30%", "2024-12-31")];
        mcd.onboarding_checklist = vec![
            ChecklistItem { id: new_id("chk"), label: "Contrato assinado".to_string(), completed: true },
            ChecklistItem { id: new_id("chk"), label: "Manual de marca".to_string(), completed: false },
        ];

        let natura = Client::new("cli-3", "Natura", ClientStatus::Prospect, "2024-10-01");

        registry.clients = vec![nubank, mcd, natura];
        registry
    }

    // ========================================================================
    // READS
    // ========================================================================

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn find(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn get(&self, id: &str) -> StoreResult<&Client> {
        self.find(id).ok_or_else(|| StoreError::not_found("client", id))
    }

    pub fn by_status(&self, status: ClientStatus) -> Vec<&Client> {
        self.clients.iter().filter(|c| c.status == status).collect()
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    fn client_mut(&mut self, id: &str) -> StoreResult<&mut Client> {
        self.clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("client", id))
    }

    /// Store a client; an empty id gets a fresh one. Returns the id.
    pub fn add_client(&mut self, mut client: Client) -> StoreResult<String> {
        if client.name.trim().is_empty() {
            return Err(StoreError::Invalid("client name is required".to_string()));
        }
        if client.id.is_empty() {
            client.id = new_id("cli");
        }
        if self.find(&client.id).is_some() {
            return Err(StoreError::Invalid(format!("duplicate client id: {}", client.id)));
        }
        let id = client.id.clone();
        tracing::info!(id = %id, name = %client.name, "client added");
        self.clients.push(client);
        Ok(id)
    }

    pub fn update_client<F>(&mut self, id: &str, update: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Client),
    {
        let client = self.client_mut(id)?;
        update(&mut *client);
        client.id = id.to_string();
        Ok(())
    }

    pub fn set_status(&mut self, id: &str, status: ClientStatus) -> StoreResult<()> {
        self.client_mut(id)?.status = status;
        tracing::debug!(id, status = status.as_str(), "client status changed");
        Ok(())
    }

    pub fn delete_client(&mut self, id: &str) -> StoreResult<Client> {
        let index = self
            .clients
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("client", id))?;
        tracing::info!(id, "client deleted");
        Ok(self.clients.remove(index))
    }

    /// New objectives start in progress without key results
    pub fn add_objective(&mut self, client_id: &str, title: &str, deadline: &str) -> StoreResult<String> {
        if title.trim().is_empty() {
            return Err(StoreError::Invalid("objective title is required".to_string()));
        }
        let objective = ClientObjective::new(title, deadline);
        let id = objective.id.clone();
        self.client_mut(client_id)?.objectives.push(objective);
        Ok(id)
    }

    pub fn delete_objective(&mut self, client_id: &str, objective_id: &str) -> StoreResult<()> {
        let client = self.client_mut(client_id)?;
        let before = client.objectives.len();
        client.objectives.retain(|o| o.id != objective_id);
        if client.objectives.len() == before {
            return Err(StoreError::not_found("objective", objective_id));
        }
        Ok(())
    }

    fn objective_mut<'a>(
        &'a mut self,
        client_id: &str,
        objective_id: &str,
    ) -> StoreResult<&'a mut ClientObjective> {
        self.client_mut(client_id)?
            .objectives
            .iter_mut()
            .find(|o| o.id == objective_id)
            .ok_or_else(|| StoreError::not_found("objective", objective_id))
    }

    pub fn add_key_result(&mut self, client_id: &str, objective_id: &str, title: &str) -> StoreResult<String> {
        let key_result = ClientKeyResult {
            id: new_id("kr"),
            title: title.to_string(),
            is_completed: false,
        };
        let id = key_result.id.clone();
        self.objective_mut(client_id, objective_id)?
            .key_results
            .push(key_result);
        Ok(id)
    }

    /// Flip a key result; returns its new completion state
    pub fn toggle_key_result(&mut self, client_id: &str, objective_id: &str, key_result_id: &str) -> StoreResult<bool> {
        let key_result = self
            .objective_mut(client_id, objective_id)?
            .key_results
            .iter_mut()
            .find(|k| k.id == key_result_id)
            .ok_or_else(|| StoreError::not_found("key result", key_result_id))?;
        key_result.is_completed = !key_result.is_completed;
        Ok(key_result.is_completed)
    }

    pub fn set_objective_status(&mut self, client_id: &str, objective_id: &str, status: ObjectiveStatus) -> StoreResult<()> {
        self.objective_mut(client_id, objective_id)?.status = status;
        Ok(())
    }

    /// Append to the activity log; complaints and incidents feed the health score
    pub fn log_activity(&mut self, client_id: &str, activity: ClientActivity) -> StoreResult<()> {
        if matches!(activity.kind, ActivityType::Complaint | ActivityType::Incident) {
            tracing::warn!(client = client_id, kind = ?activity.kind, "negative client activity logged");
        }
        self.client_mut(client_id)?.activities.push(activity);
        Ok(())
    }

    pub fn toggle_checklist_item(&mut self, client_id: &str, item_id: &str) -> StoreResult<bool> {
        let item = self
            .client_mut(client_id)?
            .onboarding_checklist
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| StoreError::not_found("checklist item", item_id))?;
        item.completed = !item.completed;
        Ok(item.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objectives::progress;

    #[test]
    fn test_client_crud() {
        let mut registry = ClientRegistry::new();
        let id = registry
            .add_client(Client::new("", "Natura", ClientStatus::Prospect, "2024-10-01"))
            .unwrap();
        assert!(id.starts_with("cli-"));

        registry.update_client(&id, |c| c.website = Some("natura.com.br".to_string())).unwrap();
        registry.set_status(&id, ClientStatus::Active).unwrap();

        let client = registry.get(&id).unwrap();
        assert_eq!(client.status, ClientStatus::Active);
        assert_eq!(client.website.as_deref(), Some("natura.com.br"));

        registry.delete_client(&id).unwrap();
        assert!(matches!(registry.get(&id), Err(StoreError::NotFound { kind: "client", .. })));
    }

    #[test]
    fn test_add_client_validation() {
        let mut registry = ClientRegistry::with_defaults();
        assert!(registry.add_client(Client::new("", "  ", ClientStatus::Active, "")).is_err());
        assert!(registry.add_client(Client::new("cli-1", "Outro", ClientStatus::Active, "")).is_err());
    }

    #[test]
    fn test_objectives_and_key_results() {
        let mut registry = ClientRegistry::with_defaults();
        let obj = registry.add_objective("cli-3", "Primeira campanha", "2025-03-01").unwrap();
        let kr = registry.add_key_result("cli-3", &obj, "Aprovar briefing").unwrap();

        assert!(registry.toggle_key_result("cli-3", &obj, &kr).unwrap());
        assert_eq!(progress(&registry.get("cli-3").unwrap().objectives).overall_progress, 100);
        assert!(!registry.toggle_key_result("cli-3", &obj, &kr).unwrap());

        assert!(registry.add_objective("cli-3", "", "").is_err());
        assert!(registry.toggle_key_result("cli-3", &obj, "kr-x").is_err());
        assert!(registry.add_key_result("cli-3", "obj-x", "x").is_err());

        registry.delete_objective("cli-3", &obj).unwrap();
        assert!(registry.delete_objective("cli-3", &obj).is_err());
    }

    #[test]
    fn test_log_activity_and_status_columns() {
        let mut registry = ClientRegistry::with_defaults();
        registry
            .log_activity("cli-3", ClientActivity::new(ActivityType::Call, "Apresentação", None))
            .unwrap();
        assert_eq!(registry.get("cli-3").unwrap().activities.len(), 1);
        assert!(registry
            .log_activity("cli-404", ClientActivity::new(ActivityType::Note, "", None))
            .is_err());

        assert_eq!(registry.by_status(ClientStatus::Active).len(), 2);
        assert_eq!(registry.by_status(ClientStatus::Prospect).len(), 1);
        assert!(registry.by_status(ClientStatus::Churned).is_empty());
    }

    #[test]
    fn test_checklist_toggle_moves_onboarding_progress() {
        let mut registry = ClientRegistry::with_defaults();
        let item_id = registry.get("cli-2").unwrap().onboarding_checklist[1].id.clone();

        assert_eq!(registry.get("cli-2").unwrap().onboarding_progress(), 50);
        assert!(registry.toggle_checklist_item("cli-2", &item_id).unwrap());
        assert_eq!(registry.get("cli-2").unwrap().onboarding_progress(), 100);
    }
}
