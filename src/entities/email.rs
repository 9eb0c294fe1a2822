// ✉️ Mailbox entities
//
// Folder icons are a closed set resolved by lookup instead of arbitrary
// renderable values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderIcon {
    Inbox,
    Send,
    Draft,
    Alert,
    Trash,
    Folder,
}

impl FolderIcon {
    /// Terminal glyph for the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            FolderIcon::Inbox => "📥",
            FolderIcon::Send => "📤",
            FolderIcon::Draft => "📝",
            FolderIcon::Alert => "⚠️",
            FolderIcon::Trash => "🗑️",
            FolderIcon::Folder => "📁",
        }
    }

    /// Default icon for the built-in folder ids; custom folders get a plain folder
    pub fn for_folder(folder_id: &str) -> Self {
        match folder_id {
            "inbox" => FolderIcon::Inbox,
            "sent" => FolderIcon::Send,
            "drafts" => FolderIcon::Draft,
            "spam" => FolderIcon::Alert,
            "trash" => FolderIcon::Trash,
            _ => FolderIcon::Folder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailFolder {
    pub id: String,
    pub name: String,
    pub unread_count: usize,
    pub icon: FolderIcon,
}

impl EmailFolder {
    pub fn new(id: &str, name: &str) -> Self {
        EmailFolder {
            id: id.to_string(),
            name: name.to_string(),
            unread_count: 0,
            icon: FolderIcon::for_folder(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mailbox {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAttachment {
    pub id: String,
    pub filename: String,
    /// Size in bytes
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: String,
    pub folder_id: String,
    pub from: Mailbox,
    #[serde(default)]
    pub to: Vec<Mailbox>,
    #[serde(default)]
    pub cc: Vec<Mailbox>,
    pub subject: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub body: String,
    pub date: DateTime<Utc>,
    pub is_read: bool,
    #[serde(default)]
    pub attachments: Vec<EmailAttachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_lookup() {
        assert_eq!(FolderIcon::for_folder("inbox"), FolderIcon::Inbox);
        assert_eq!(FolderIcon::for_folder("spam"), FolderIcon::Alert);
        assert_eq!(FolderIcon::for_folder("clientes-vip"), FolderIcon::Folder);
        assert_eq!(FolderIcon::Trash.glyph(), "🗑️");
    }

    #[test]
    fn test_attachment_type_field() {
        let json = r#"{"id":"f1","filename":"brief.pdf","size":2048,"type":"application/pdf","url":"/f1"}"#;
        let att: EmailAttachment = serde_json::from_str(json).unwrap();
        assert_eq!(att.mime_type, "application/pdf");
    }
}
