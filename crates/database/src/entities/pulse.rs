//! Weekly mentee pulse check-ins

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PulseStatus {
    #[default]
    OnTrack,
    Concern,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PulseCheckin {
    pub mentor_id: String,
    pub mentee_id: String,
    pub week_starting: NaiveDate,
    pub status: PulseStatus,
    pub notes: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseUpdate {
    #[serde(default)]
    pub status: PulseStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPulseEntry {
    pub mentee_id: String,
    #[serde(flatten)]
    pub update: PulseUpdate,
}

/// One row of the weekly pulse board.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseBoardEntry {
    pub mentee_id: String,
    pub full_name: String,
    pub department: String,
    pub week_starting: NaiveDate,
    pub status: PulseStatus,
    pub notes: String,
}

/// The Sunday on or before `date`.
pub fn week_starting(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date - Duration::days(i64::from(offset))
}
