//! Study log and community feed entities

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudyLog {
    pub id: String,
    pub profile_id: String,
    pub subject: String,
    pub duration_minutes: i64,
    pub notes: String,
    pub date: NaiveDate,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudyLogRequest {
    pub subject: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub notes: String,
}

/// A study log as shown on the community feed.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub id: String,
    pub profile_id: String,
    pub author_name: String,
    pub subject: String,
    pub duration_minutes: i64,
    pub notes: String,
    pub date: NaiveDate,
    pub created_at: String,
    pub like_count: i64,
    pub liked_by_me: bool,
}

/// Totals shown above the caller's own study history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySummary {
    pub total_hours: f64,
    pub logs_this_week: i64,
    pub current_streak: i64,
}

impl StudySummary {
    /// Summarise logs relative to `today`; the week covers the trailing seven days.
    pub fn from_logs(logs: &[StudyLog], today: NaiveDate, current_streak: i64) -> Self {
        let total_minutes: i64 = logs.iter().map(|log| log.duration_minutes).sum();
        let week_start = today - chrono::Duration::days(7);
        let logs_this_week = logs
            .iter()
            .filter(|log| log.date > week_start && log.date <= today)
            .count() as i64;

        Self {
            total_hours: total_minutes as f64 / 60.0,
            logs_this_week,
            current_streak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(date: NaiveDate, minutes: i64) -> StudyLog {
        StudyLog {
            id: cuid2::create_id(),
            profile_id: "p".into(),
            subject: "Maths".into(),
            duration_minutes: minutes,
            notes: String::new(),
            date,
            created_at: String::new(),
        }
    }

    #[test]
    fn summary_counts_trailing_week_and_hours() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let logs = vec![
            log(today, 90),
            log(today - chrono::Duration::days(6), 30),
            log(today - chrono::Duration::days(7), 60),
            log(today - chrono::Duration::days(30), 60),
        ];

        let summary = StudySummary::from_logs(&logs, today, 3);
        assert_eq!(summary.logs_this_week, 2);
        assert!((summary.total_hours - 4.0).abs() < f64::EPSILON);
        assert_eq!(summary.current_streak, 3);
    }
}
