// ✉️ Mail store - folders, messages and read state

use super::new_id;
use crate::entities::{Email, EmailFolder, Mailbox};
use crate::error::{StoreError, StoreResult};
use chrono::{NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Messages of a folder split by the day they arrived
#[derive(Debug, Default, PartialEq)]
pub struct MailGroups<'a> {
    /// "Hoje"
    pub today: Vec<&'a Email>,
    /// "Anteriores"
    pub earlier: Vec<&'a Email>,
}

impl<'a> MailGroups<'a> {
    /// Non-empty groups with their headings, today first
    pub fn sections(&self) -> Vec<(&'static str, &[&'a Email])> {
        let mut sections = Vec::new();
        if !self.today.is_empty() {
            sections.push(("Hoje", self.today.as_slice()));
        }
        if !self.earlier.is_empty() {
            sections.push(("Anteriores", self.earlier.as_slice()));
        }
        sections
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailRegistry {
    folders: Vec<EmailFolder>,
    emails: Vec<Email>,
}

impl MailRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in folders with no messages
    pub fn with_standard_folders() -> Self {
        let folders = [
            ("inbox", "Caixa de Entrada"),
            ("sent", "Enviados"),
            ("drafts", "Rascunhos"),
            ("spam", "Spam"),
            ("trash", "Lixeira"),
        ];
        MailRegistry {
            folders: folders.iter().map(|(id, name)| EmailFolder::new(id, name)).collect(),
            emails: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = MailRegistry::with_standard_folders();
        let me = Mailbox {
            name: "Agência".to_string(),
            email: "contato@agencia.com.br".to_string(),
        };
        let seeds = [
            ("inbox", "Marina (Nubank)", "marina@nubank.com.br", "Aprovação das peças Q4", (2024, 10, 15, 9), false),
            ("inbox", "Carlos (McDonald's)", "carlos@mcdonalds.com.br", "Erro no post de ontem", (2024, 10, 14, 18), false),
            ("inbox", "Financeiro", "financeiro@agencia.com.br", "Notas fiscais de setembro", (2024, 10, 1, 11), true),
            ("sent", "Agência", "contato@agencia.com.br", "Relatório mensal", (2024, 10, 2, 16), true),
        ];
        for (folder_id, name, address, subject, (y, m, d, h), is_read) in seeds {
            let Some(date) = Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single() else {
                continue;
            };
            registry.emails.push(Email {
                id: new_id("mail"),
                folder_id: folder_id.to_string(),
                from: Mailbox { name: name.to_string(), email: address.to_string() },
                to: vec![me.clone()],
                cc: Vec::new(),
                subject: subject.to_string(),
                snippet: String::new(),
                body: String::new(),
                date,
                is_read,
                attachments: Vec::new(),
            });
        }
        registry.refresh_unread_counts();
        registry
    }

    pub fn folders(&self) -> &[EmailFolder] {
        &self.folders
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn find(&self, id: &str) -> Option<&Email> {
        self.emails.iter().find(|e| e.id == id)
    }

    pub fn folder(&self, id: &str) -> Option<&EmailFolder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Messages in the folder, newest first
    pub fn emails_in(&self, folder_id: &str) -> Vec<&Email> {
        let mut emails: Vec<&Email> = self.emails.iter().filter(|e| e.folder_id == folder_id).collect();
        emails.sort_by(|a, b| b.date.cmp(&a.date));
        emails
    }

    /// Folder messages split into "today" and "earlier" relative to `today` (UTC day)
    pub fn grouped(&self, folder_id: &str, today: NaiveDate) -> MailGroups<'_> {
        let (today_list, earlier): (Vec<&Email>, Vec<&Email>) = self
            .emails_in(folder_id)
            .into_iter()
            .partition(|e| e.date.date_naive() == today);
        MailGroups {
            today: today_list,
            earlier,
        }
    }

    /// Unread counts are derived from the messages, never edited directly
    fn refresh_unread_counts(&mut self) {
        for folder in &mut self.folders {
            folder.unread_count = self
                .emails
                .iter()
                .filter(|e| e.folder_id == folder.id && !e.is_read)
                .count();
        }
    }

    pub fn add_folder(&mut self, id: &str, name: &str) -> StoreResult<()> {
        if self.folder(id).is_some() {
            return Err(StoreError::Invalid(format!("duplicate folder id: {}", id)));
        }
        self.folders.push(EmailFolder::new(id, name));
        Ok(())
    }

    /// Store a message in an existing folder. Returns its id.
    pub fn receive(&mut self, mut email: Email) -> StoreResult<String> {
        if self.folder(&email.folder_id).is_none() {
            return Err(StoreError::not_found("folder", &email.folder_id));
        }
        if email.id.is_empty() {
            email.id = new_id("mail");
        }
        let id = email.id.clone();
        self.emails.push(email);
        self.refresh_unread_counts();
        Ok(id)
    }

    fn email_mut(&mut self, id: &str) -> StoreResult<&mut Email> {
        self.emails
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::not_found("email", id))
    }

    pub fn mark_read(&mut self, id: &str, is_read: bool) -> StoreResult<()> {
        self.email_mut(id)?.is_read = is_read;
        self.refresh_unread_counts();
        Ok(())
    }

    pub fn move_to(&mut self, id: &str, folder_id: &str) -> StoreResult<()> {
        if self.folder(folder_id).is_none() {
            return Err(StoreError::not_found("folder", folder_id));
        }
        self.email_mut(id)?.folder_id = folder_id.to_string();
        tracing::debug!(id, folder = folder_id, "email moved");
        self.refresh_unread_counts();
        Ok(())
    }

    /// Move to trash, or drop for good when already there
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        let in_trash = self
            .find(id)
            .ok_or_else(|| StoreError::not_found("email", id))?
            .folder_id
            == "trash";
        if in_trash || self.folder("trash").is_none() {
            self.emails.retain(|e| e.id != id);
            self.refresh_unread_counts();
            Ok(())
        } else {
            self.move_to(id, "trash")
        }
    }
}
