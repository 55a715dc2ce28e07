//! Catch-up plans, their roadmap tasks and the exam-readiness simulator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROADMAP_DAYS: i64 = 5;
pub const MAX_ROADMAP_DAYS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CatchUpPlan {
    pub id: String,
    pub profile_id: String,
    pub subject: String,
    pub exam_date: NaiveDate,
    pub status: PlanStatus,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub progress: i64,
    pub created_at: String,
    pub updated_at: String,
    #[sqlx(skip)]
    pub roadmap: Vec<RoadmapTask>,
}

impl CatchUpPlan {
    /// Recompute the counters after a task changed state.
    pub fn apply_completion(&mut self, completed_tasks: i64) {
        self.completed_tasks = completed_tasks;
        self.progress = progress_percent(completed_tasks, self.total_tasks);
        self.status = if self.progress == 100 {
            PlanStatus::Completed
        } else {
            PlanStatus::InProgress
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapTask {
    pub id: String,
    pub plan_id: String,
    pub day: i64,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    pub subject: String,
    pub exam_date: NaiveDate,
    #[serde(default)]
    pub days: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

/// Completed share of the roadmap, rounded and capped at 100.
pub fn progress_percent(completed: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    let ratio = completed.max(0) as f64 / total as f64 * 100.0;
    (ratio.round() as i64).min(100)
}

/// Default roadmap titles, one per day.
pub fn default_roadmap(days: Option<i64>) -> Vec<(i64, String)> {
    let days = days
        .unwrap_or(DEFAULT_ROADMAP_DAYS)
        .clamp(1, MAX_ROADMAP_DAYS);
    (1..=days)
        .map(|day| (day, format!("Day {day} Study Topic")))
        .collect()
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    pub syllabus_completion: f64,
    pub days_remaining: i64,
    pub daily_study_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub hours_needed: f64,
    pub best_case_days: i64,
    pub realistic_days: i64,
    pub worst_case_days: i64,
    pub can_complete: bool,
    pub shortfall_days: i64,
}

/// Estimate how many days the remaining syllabus needs.
///
/// Each remaining percent of syllabus is half an hour of study. Estimates are
/// clamped to `[1, days_remaining]`, while `can_complete` and the shortfall
/// use the unclamped realistic figure.
pub fn simulate(input: SimulationInput) -> Option<SimulationResult> {
    if input.days_remaining < 1 || input.daily_study_hours <= 0.0 {
        return None;
    }

    let completion = input.syllabus_completion.clamp(0.0, 100.0);
    let hours = (100.0 - completion) * 0.5;
    let daily = input.daily_study_hours;

    let best = (0.8 * hours / (1.2 * daily)).ceil() as i64;
    let realistic = (hours / daily).ceil() as i64;
    let worst = (1.3 * hours / (0.7 * daily)).ceil() as i64;

    let clamp = |days: i64| days.clamp(1, input.days_remaining);

    Some(SimulationResult {
        hours_needed: hours,
        best_case_days: clamp(best),
        realistic_days: clamp(realistic),
        worst_case_days: clamp(worst),
        can_complete: realistic <= input.days_remaining,
        shortfall_days: (realistic - input.days_remaining).max(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_rounds_and_caps() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(5, 5), 100);
        assert_eq!(progress_percent(9, 5), 100);
    }

    #[test]
    fn completion_status_flips_exactly_at_hundred() {
        let mut plan = CatchUpPlan {
            id: "plan".into(),
            profile_id: "p".into(),
            subject: "DSP".into(),
            exam_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            status: PlanStatus::InProgress,
            total_tasks: 4,
            completed_tasks: 0,
            progress: 0,
            created_at: String::new(),
            updated_at: String::new(),
            roadmap: Vec::new(),
        };

        plan.apply_completion(3);
        assert_eq!(plan.progress, 75);
        assert_eq!(plan.status, PlanStatus::InProgress);

        plan.apply_completion(4);
        assert_eq!(plan.progress, 100);
        assert_eq!(plan.status, PlanStatus::Completed);

        plan.apply_completion(2);
        assert_eq!(plan.status, PlanStatus::InProgress);
    }

    #[test]
    fn default_roadmap_titles_and_clamp() {
        let roadmap = default_roadmap(None);
        assert_eq!(roadmap.len(), 5);
        assert_eq!(roadmap[0], (1, "Day 1 Study Topic".to_string()));
        assert_eq!(roadmap[4].1, "Day 5 Study Topic");

        assert_eq!(default_roadmap(Some(0)).len(), 1);
        assert_eq!(default_roadmap(Some(500)).len(), 60);
    }

    #[test]
    fn simulator_matches_reference_numbers() {
        let result = simulate(SimulationInput {
            syllabus_completion: 40.0,
            days_remaining: 12,
            daily_study_hours: 3.0,
        })
        .unwrap();

        assert_eq!(result.hours_needed, 30.0);
        assert_eq!(result.best_case_days, 7);
        assert_eq!(result.realistic_days, 10);
        assert_eq!(result.worst_case_days, 12);
        assert!(result.can_complete);
        assert_eq!(result.shortfall_days, 0);
    }

    #[test]
    fn simulator_clamps_to_remaining_days() {
        let result = simulate(SimulationInput {
            syllabus_completion: 0.0,
            days_remaining: 3,
            daily_study_hours: 2.0,
        })
        .unwrap();

        assert_eq!(result.realistic_days, 3);
        assert_eq!(result.worst_case_days, 3);
        assert!(!result.can_complete);
        assert_eq!(result.shortfall_days, 22);

        let finished = simulate(SimulationInput {
            syllabus_completion: 100.0,
            days_remaining: 7,
            daily_study_hours: 3.0,
        })
        .unwrap();
        assert_eq!(finished.best_case_days, 1);
        assert!(finished.can_complete);
    }

    #[test]
    fn simulator_rejects_degenerate_input() {
        assert!(simulate(SimulationInput {
            syllabus_completion: 10.0,
            days_remaining: 0,
            daily_study_hours: 2.0,
        })
        .is_none());
        assert!(simulate(SimulationInput {
            syllabus_completion: 10.0,
            days_remaining: 5,
            daily_study_hours: 0.0,
        })
        .is_none());
    }
}
