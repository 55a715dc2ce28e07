use chrono::NaiveDate;
use padikk_database::{
    CreateStudyLogRequest, FeedEntry, LikeToggle, Profile, StudyLog, StudySummary, UserStreak,
};

use super::error::{required, ServiceError, ServiceResult};
use crate::AppState;

pub const DEFAULT_FEED_LIMIT: i64 = 20;
pub const MAX_FEED_LIMIT: i64 = 100;

pub async fn log_study(
    state: &AppState,
    profile: &Profile,
    mut request: CreateStudyLogRequest,
    today: NaiveDate,
) -> ServiceResult<(StudyLog, UserStreak)> {
    request.subject = required(&request.subject, "subject")?.to_string();
    if request.duration_minutes <= 0 {
        return Err(ServiceError::bad_request("durationMinutes must be positive"));
    }

    Ok(state.study_logs().create(&profile.id, &request, today).await?)
}

pub async fn history(
    state: &AppState,
    profile: &Profile,
    today: NaiveDate,
) -> ServiceResult<(Vec<StudyLog>, StudySummary)> {
    let logs = state.study_logs().list_for_profile(&profile.id).await?;
    let current_streak = state
        .profiles()
        .streak(&profile.id)
        .await?
        .map_or(0, |streak| streak.current_streak);

    let summary = StudySummary::from_logs(&logs, today, current_streak);
    Ok((logs, summary))
}

pub async fn feed(
    state: &AppState,
    viewer: &Profile,
    limit: Option<i64>,
) -> ServiceResult<Vec<FeedEntry>> {
    let limit = feed_limit(limit);
    Ok(state.study_logs().feed(&viewer.id, limit).await?)
}

pub async fn toggle_like(
    state: &AppState,
    profile: &Profile,
    log_id: &str,
) -> ServiceResult<LikeToggle> {
    Ok(state.study_logs().toggle_like(log_id, &profile.id).await?)
}

fn feed_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT)
}
