// 📅 Marketing calendar store - weekly board of dated tasks

use super::new_id;
use crate::entities::{
    CalendarCategory, CalendarPriority, CalendarStatus, CalendarTask, Client,
};
use crate::error::{StoreError, StoreResult};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The seven days (Monday to Sunday) of the week containing `date`
pub fn week_of(date: NaiveDate) -> Vec<NaiveDate> {
    week_start(date).iter_days().take(7).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarFilter {
    /// `None` shows every category
    pub category: Option<CalendarCategory>,
    pub search: String,
}

impl CalendarFilter {
    pub fn matches(&self, task: &CalendarTask) -> bool {
        self.category.map_or(true, |c| task.category == c) && task.matches_text(&self.search)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarRegistry {
    tasks: Vec<CalendarTask>,
}

impl CalendarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = CalendarRegistry::new();
        let seeds = [
            ("Post Black Friday", (2024, 11, 29), CalendarCategory::SocialMedia, CalendarPriority::Alta, Some("cli-2")),
            ("Reunião mensal Nubank", (2024, 10, 14), CalendarCategory::Reuniao, CalendarPriority::Media, Some("cli-1")),
            ("Newsletter outubro", (2024, 10, 15), CalendarCategory::Email, CalendarPriority::Baixa, None),
            ("Revisão de campanhas Ads", (2024, 10, 15), CalendarCategory::Ads, CalendarPriority::Urgente, None),
        ];
        for (title, (y, m, d), category, priority, client_id) in seeds {
            if let Some(due) = NaiveDate::from_ymd_opt(y, m, d) {
                let mut task = CalendarTask::new(title, due, category, priority);
                task.client_id = client_id.map(str::to_string);
                registry.add_task(task);
            }
        }
        registry
    }

    pub fn tasks(&self) -> &[CalendarTask] {
        &self.tasks
    }

    pub fn find(&self, id: &str) -> Option<&CalendarTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks due on `day`, by their position in the column
    pub fn tasks_on(&self, day: NaiveDate) -> Vec<&CalendarTask> {
        let mut tasks: Vec<&CalendarTask> = self.tasks.iter().filter(|t| t.due_date == day).collect();
        tasks.sort_by_key(|t| t.order);
        tasks
    }

    /// Week board: one column per day, Monday first, filtered
    pub fn week_board(&self, date: NaiveDate, filter: &CalendarFilter) -> Vec<(NaiveDate, Vec<&CalendarTask>)> {
        week_of(date)
            .into_iter()
            .map(|day| {
                let column = self
                    .tasks_on(day)
                    .into_iter()
                    .filter(|t| filter.matches(t))
                    .collect();
                (day, column)
            })
            .collect()
    }

    /// Every matching task, by due date then position
    pub fn filtered(&self, filter: &CalendarFilter) -> Vec<&CalendarTask> {
        let mut tasks: Vec<&CalendarTask> = self.tasks.iter().filter(|t| filter.matches(t)).collect();
        tasks.sort_by_key(|t| (t.due_date, t.order));
        tasks
    }

    /// Tasks tagged with the client or mentioning its name, soonest first
    pub fn client_events(&self, client: &Client) -> Vec<&CalendarTask> {
        let name = client.name.to_lowercase();
        let mut tasks: Vec<&CalendarTask> = self
            .tasks
            .iter()
            .filter(|t| {
                t.client_id.as_deref() == Some(client.id.as_str())
                    || (!name.is_empty() && t.title.to_lowercase().contains(&name))
            })
            .collect();
        tasks.sort_by_key(|t| t.due_date);
        tasks
    }

    /// New tasks go to the end of their day column
    pub fn add_task(&mut self, mut task: CalendarTask) -> String {
        if task.id.is_empty() {
            task.id = new_id("cal");
        }
        task.order = self
            .tasks
            .iter()
            .filter(|t| t.due_date == task.due_date)
            .map(|t| t.order + 1)
            .max()
            .unwrap_or(0);
        let id = task.id.clone();
        tracing::debug!(id = %id, due = %task.due_date, "calendar task added");
        self.tasks.push(task);
        id
    }

    pub fn update_task<F>(&mut self, id: &str, update: F) -> StoreResult<()>
    where
        F: FnOnce(&mut CalendarTask),
    {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("calendar task", id))?;
        update(&mut *task);
        task.id = id.to_string();
        task.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_status(&mut self, id: &str, status: CalendarStatus) -> StoreResult<()> {
        self.update_task(id, |t| t.status = status)
    }

    pub fn delete_task(&mut self, id: &str) -> StoreResult<CalendarTask> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("calendar task", id))?;
        Ok(self.tasks.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ClientStatus;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_on_monday() {
        // 2024-10-16 is a Wednesday, 2024-10-20 a Sunday
        assert_eq!(week_start(day(2024, 10, 16)), day(2024, 10, 14));
        assert_eq!(week_start(day(2024, 10, 20)), day(2024, 10, 14));
        assert_eq!(week_start(day(2024, 10, 14)), day(2024, 10, 14));

        let week = week_of(day(2024, 10, 31));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], day(2024, 10, 28));
        assert_eq!(week[6], day(2024, 11, 3));
    }

    #[test]
    fn test_day_columns_keep_order() {
        let registry = CalendarRegistry::with_defaults();
        let column = registry.tasks_on(day(2024, 10, 15));

        assert_eq!(column.len(), 2);
        assert_eq!(column[0].title, "Newsletter outubro");
        assert_eq!(column[1].order, 1);
    }

    #[test]
    fn test_week_board_filters() {
        let registry = CalendarRegistry::with_defaults();

        let all = registry.week_board(day(2024, 10, 16), &CalendarFilter::default());
        assert_eq!(all.len(), 7);
        assert_eq!(all.iter().map(|(_, c)| c.len()).sum::<usize>(), 3);

        let ads = CalendarFilter { category: Some(CalendarCategory::Ads), ..Default::default() };
        let board = registry.week_board(day(2024, 10, 16), &ads);
        assert_eq!(board.iter().map(|(_, c)| c.len()).sum::<usize>(), 1);

        let search = CalendarFilter { search: "NUBANK".to_string(), ..Default::default() };
        assert_eq!(registry.filtered(&search).len(), 1);
    }

    #[test]
    fn test_update_and_delete() {
        let mut registry = CalendarRegistry::with_defaults();
        let id = registry.tasks()[0].id.clone();

        registry.set_status(&id, CalendarStatus::Revisao).unwrap();
        assert_eq!(registry.find(&id).unwrap().status, CalendarStatus::Revisao);

        registry.delete_task(&id).unwrap();
        assert!(registry.find(&id).is_none());
        assert!(matches!(
            registry.set_status(&id, CalendarStatus::Concluido),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_client_events() {
        let registry = CalendarRegistry::with_defaults();
        let nubank = Client::new("cli-1", "Nubank", ClientStatus::Active, "2023-03-01");
        let events = registry.client_events(&nubank);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Reunião mensal Nubank");
    }
}
