// 🩺 Client Health - weighted relationship score with a categorical level
//
//   score = 100
//         - 15 x complaints
//         - 10 x incidents
//         -  2 x overdue client tasks
//         + 10 x completed objectives
//   clamped to [0, 100]
//
// Tasks are linked to a client when the client id appears inside the
// task's project id. This is a loose join; see `Task::belongs_to_client`.

use crate::config::HealthWeights;
use crate::entities::{ActivityType, Client, ClientActivity, ClientObjective, Task};
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// HEALTH LEVEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthLevel {
    Healthy,
    AtRisk,
    Critical,
}

impl HealthLevel {
    pub fn from_score(score: u32, weights: &HealthWeights) -> Self {
        if score >= weights.healthy_threshold {
            HealthLevel::Healthy
        } else if score >= weights.at_risk_threshold {
            HealthLevel::AtRisk
        } else {
            HealthLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLevel::Healthy => "HEALTHY",
            HealthLevel::AtRisk => "AT_RISK",
            HealthLevel::Critical => "CRITICAL",
        }
    }

    /// Label shown on the gauge
    pub fn label_pt(&self) -> &'static str {
        match self {
            HealthLevel::Healthy => "SAUDÁVEL",
            HealthLevel::AtRisk => "EM RISCO",
            HealthLevel::Critical => "CRÍTICO",
        }
    }
}

// ============================================================================
// DIAGNOSIS (static text table)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub summary: &'static str,
    pub action: &'static str,
    pub sentiment: Sentiment,
}

impl Diagnosis {
    pub fn for_level(level: HealthLevel) -> Diagnosis {
        match level {
            HealthLevel::Healthy => Diagnosis {
                summary: "Operação em alta performance. O cliente apresenta altos índices de satisfação e metas sendo batidas conforme cronograma.",
                action: "Solicitar depoimento (Case de Sucesso) ou apresentar nova proposta de Upsell.",
                sentiment: Sentiment::Positive,
            },
            HealthLevel::AtRisk => Diagnosis {
                summary: "Alerta de engajamento detectado. Algumas pendências operacionais estão impactando a percepção de valor.",
                action: "Agendar call de alinhamento imediata para revisar prazos de entregas pendentes.",
                sentiment: Sentiment::Neutral,
            },
            HealthLevel::Critical => Diagnosis {
                summary: "Risco iminente de Churn. O volume de reclamações e incidentes técnicos ultrapassou o limite de segurança.",
                action: "War Room: Gestor de conta deve intervir pessoalmente e oferecer plano de recuperação de danos.",
                sentiment: Sentiment::Negative,
            },
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub client_id: String,
    pub score: u32,
    pub level: HealthLevel,
    pub complaints: usize,
    pub incidents: usize,
    pub overdue: usize,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub goals: usize,
    pub total_goals: usize,
    /// Completed objectives as a share of all objectives, 0-100
    pub goal_progress: u32,
}

impl HealthReport {
    pub fn diagnosis(&self) -> Diagnosis {
        Diagnosis::for_level(self.level)
    }
}

/// Linear score from the raw signal counts, clamped to [0, 100]
pub fn health_score(
    complaints: usize,
    incidents: usize,
    overdue: usize,
    completed_goals: usize,
    weights: &HealthWeights,
) -> u32 {
    // Weights are user-supplied and may be huge
    let weighted =
        |weight: i64, count: usize| weight.saturating_mul(i64::try_from(count).unwrap_or(i64::MAX));
    let score = weights
        .base_score
        .saturating_sub(weighted(weights.complaint_penalty, complaints))
        .saturating_sub(weighted(weights.incident_penalty, incidents))
        .saturating_sub(weighted(weights.overdue_penalty, overdue))
        .saturating_add(weighted(weights.completed_goal_bonus, completed_goals));

    score.clamp(0, 100) as u32
}

/// Tasks linked to the client through the project id
pub fn client_tasks<'a>(tasks: &'a [Task], client_id: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.belongs_to_client(client_id)).collect()
}

/// Not done, and the due day started before `as_of`
pub fn is_overdue(task: &Task, as_of: NaiveDateTime) -> bool {
    !task.status.is_done() && task.due_date.and_time(NaiveTime::default()) < as_of
}

pub fn assess(
    client_id: &str,
    activities: &[ClientActivity],
    objectives: &[ClientObjective],
    tasks: &[Task],
    as_of: NaiveDateTime,
    weights: &HealthWeights,
) -> HealthReport {
    let linked = client_tasks(tasks, client_id);
    let overdue = linked.iter().filter(|t| is_overdue(t, as_of)).count();
    let completed_tasks = linked.iter().filter(|t| t.status.is_done()).count();

    let complaints = activities
        .iter()
        .filter(|a| a.kind == ActivityType::Complaint)
        .count();
    let incidents = activities
        .iter()
        .filter(|a| a.kind == ActivityType::Incident)
        .count();
    let goals = objectives.iter().filter(|o| o.is_completed()).count();

    let score = health_score(complaints, incidents, overdue, goals, weights);
    let total_goals = objectives.len();
    let goal_progress = ((goals as f64 / total_goals.max(1) as f64) * 100.0).round() as u32;

    HealthReport {
        client_id: client_id.to_string(),
        score,
        level: HealthLevel::from_score(score, weights),
        complaints,
        incidents,
        overdue,
        completed_tasks,
        total_tasks: linked.len(),
        goals,
        total_goals,
        goal_progress,
    }
}

pub fn assess_client(
    client: &Client,
    tasks: &[Task],
    as_of: NaiveDateTime,
    weights: &HealthWeights,
) -> HealthReport {
    assess(
        &client.id,
        &client.activities,
        &client.objectives,
        tasks,
        as_of,
        weights,
    )
}

// ============================================================================
// TESTS
// ============================================================================
