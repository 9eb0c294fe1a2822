// 🎯 Objective progress - completion of key results

use crate::entities::ClientObjective;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectivesProgress {
    pub total_objectives: usize,
    pub total_key_results: usize,
    pub completed_key_results: usize,
    /// Completed key results across all objectives, 0-100
    pub overall_progress: u32,
}

fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((done as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Progress of a single objective, 0-100 (0 when it has no key results)
pub fn objective_progress(objective: &ClientObjective) -> u32 {
    let done = objective.key_results.iter().filter(|k| k.is_completed).count();
    percent(done, objective.key_results.len())
}

pub fn progress(objectives: &[ClientObjective]) -> ObjectivesProgress {
    let total_key_results: usize = objectives.iter().map(|o| o.key_results.len()).sum();
    let completed_key_results: usize = objectives
        .iter()
        .map(|o| o.key_results.iter().filter(|k| k.is_completed).count())
        .sum();

    ObjectivesProgress {
        total_objectives: objectives.len(),
        total_key_results,
        completed_key_results,
        overall_progress: percent(completed_key_results, total_key_results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ClientKeyResult;

    fn kr(done: bool) -> ClientKeyResult {
        ClientKeyResult {
            id: uuid::Uuid::new_v4().to_string(),
            title: "KR".to_string(),
            is_completed: done,
        }
    }

    #[test]
    fn test_overall_progress() {
        let mut a = ClientObjective::new("Leads", "2024-12-31");
        a.key_results = vec![kr(true), kr(false), kr(false)];
        let mut b = ClientObjective::new("Branding", "");
        b.key_results = vec![kr(true)];
        let c = ClientObjective::new("Sem KRs", "");

        let p = progress(&[a.clone(), b.clone(), c.clone()]);

        assert_eq!(p.total_objectives, 3);
        assert_eq!(p.total_key_results, 4);
        assert_eq!(p.completed_key_results, 2);
        assert_eq!(p.overall_progress, 50);

        assert_eq!(objective_progress(&a), 33);
        assert_eq!(objective_progress(&b), 100);
        assert_eq!(objective_progress(&c), 0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(progress(&[]), ObjectivesProgress::default());
    }
}
