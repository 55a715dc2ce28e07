//! Month-by-month growth metrics for a mentee

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::study_log::StudyLog;

const MONTHS_SHOWN: usize = 12;
const CONSISTENT_LOGS_PER_MONTH: f64 = 30.0;
const DEVELOPMENT_MINUTES_PER_MONTH: f64 = 1200.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    /// Month label such as `3/25`.
    pub month: String,
    pub logs: i64,
    pub minutes: i64,
    pub consistency: i64,
    pub skill_development: i64,
}

/// Bucket logs by calendar month, oldest first, keeping the latest twelve months.
pub fn monthly_growth(logs: &[StudyLog]) -> Vec<GrowthPoint> {
    let mut buckets: BTreeMap<(i32, u32), (i64, i64)> = BTreeMap::new();
    for log in logs {
        let entry = buckets.entry(month_key(log.date)).or_default();
        entry.0 += 1;
        entry.1 += log.duration_minutes;
    }

    let skip = buckets.len().saturating_sub(MONTHS_SHOWN);
    buckets
        .into_iter()
        .skip(skip)
        .map(|((year, month), (count, minutes))| GrowthPoint {
            month: format!("{}/{:02}", month, year.rem_euclid(100)),
            logs: count,
            minutes,
            consistency: percent_of(count as f64, CONSISTENT_LOGS_PER_MONTH),
            skill_development: percent_of(minutes as f64, DEVELOPMENT_MINUTES_PER_MONTH),
        })
        .collect()
}

fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

fn percent_of(value: f64, full: f64) -> i64 {
    (value / full * 100.0).min(100.0).round() as i64
}
