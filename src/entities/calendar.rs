// 📅 Marketing calendar entities

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CalendarPriority {
    Baixa,
    Media,
    Alta,
    Urgente,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalendarCategory {
    Campanha,
    SocialMedia,
    Conteudo,
    Email,
    Seo,
    Ads,
    Reuniao,
    Outro,
}

impl CalendarCategory {
    pub const ALL: [CalendarCategory; 8] = [
        CalendarCategory::Campanha,
        CalendarCategory::SocialMedia,
        CalendarCategory::Conteudo,
        CalendarCategory::Email,
        CalendarCategory::Seo,
        CalendarCategory::Ads,
        CalendarCategory::Reuniao,
        CalendarCategory::Outro,
    ];

    /// Label shown in the category filter
    pub fn label(&self) -> &'static str {
        match self {
            CalendarCategory::Campanha => "Campanhas",
            CalendarCategory::SocialMedia => "Social Media",
            CalendarCategory::Conteudo => "Conteúdo",
            CalendarCategory::Email => "Email Marketing",
            CalendarCategory::Seo => "SEO",
            CalendarCategory::Ads => "Ads / Tráfego",
            CalendarCategory::Reuniao => "Reuniões",
            CalendarCategory::Outro => "Outros",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalendarStatus {
    AFazer,
    EmProgresso,
    Revisao,
    Concluido,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarTask {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: CalendarPriority,
    pub category: CalendarCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub status: CalendarStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Estimate in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_link: Option<String>,
    /// Position within its day column
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl CalendarTask {
    pub fn new(
        title: &str,
        due_date: NaiveDate,
        category: CalendarCategory,
        priority: CalendarPriority,
    ) -> Self {
        let now = Utc::now();
        CalendarTask {
            id: format!("cal-{}", uuid::Uuid::new_v4()),
            title: title.to_string(),
            description: None,
            due_date,
            priority,
            category,
            assigned_to: None,
            status: CalendarStatus::AFazer,
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            estimated_time: None,
            related_link: None,
            order: 0,
            client_id: None,
        }
    }

    /// Case-insensitive match on title, description and tags
    pub fn matches_text(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&q)
            || self
                .description
                .as_deref()
                .map_or(false, |d| d.to_lowercase().contains(&q))
            || self.tags.iter().any(|t| t.to_lowercase().contains(&q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        let value = serde_json::to_value(CalendarCategory::SocialMedia).unwrap();
        assert_eq!(value, "SOCIAL_MEDIA");
        let value = serde_json::to_value(CalendarStatus::EmProgresso).unwrap();
        assert_eq!(value, "EM_PROGRESSO");
    }

    #[test]
    fn test_matches_text_searches_tags() {
        let mut task = CalendarTask::new(
            "Post Black Friday",
            NaiveDate::from_ymd_opt(2024, 11, 29).unwrap(),
            CalendarCategory::SocialMedia,
            CalendarPriority::Alta,
        );
        task.tags = vec!["Instagram".to_string()];

        assert!(task.matches_text("black"));
        assert!(task.matches_text("insta"));
        assert!(task.matches_text("   "));
        assert!(!task.matches_text("seo"));
    }
}
