use chrono::NaiveDate;
use padikk_auth::User;
use padikk_database::{
    achievements, Achievement, CreateProfileRequest, Profile, ProfileStats, UpdateProfileRequest,
};
use serde::Serialize;

use super::error::{required, ServiceError, ServiceResult};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOverview {
    pub profile: Profile,
    pub stats: ProfileStats,
    pub total_hours: f64,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub mentor_count: i64,
    pub study_logs_today: i64,
    pub active_plans: i64,
    pub current_streak: i64,
}

pub async fn complete_profile(
    state: &AppState,
    user: &User,
    mut request: CreateProfileRequest,
) -> ServiceResult<Profile> {
    request.full_name = required(&request.full_name, "fullName")?.to_string();

    let profile = state
        .profiles()
        .create(user.id, user.email.as_deref(), &request)
        .await?;
    Ok(profile)
}

pub async fn overview(state: &AppState, profile: Profile) -> ServiceResult<ProfileOverview> {
    let stats = state.profiles().stats(&profile.id).await?;
    Ok(ProfileOverview {
        total_hours: stats.total_hours(),
        achievements: achievements(&stats),
        profile,
        stats,
    })
}

pub async fn update_profile(
    state: &AppState,
    profile: &Profile,
    mut request: UpdateProfileRequest,
) -> ServiceResult<Profile> {
    if let Some(name) = request.full_name.as_deref() {
        request.full_name = Some(required(name, "fullName")?.to_string());
    }
    if matches!(request.year, Some(year) if year < 1) {
        return Err(ServiceError::bad_request("year must be at least 1"));
    }

    Ok(state.profiles().update(&profile.id, &request).await?)
}

pub async fn dashboard_stats(
    state: &AppState,
    profile: &Profile,
    today: NaiveDate,
) -> ServiceResult<DashboardStats> {
    let mentor_count = state.profiles().count_guides().await?;
    let study_logs_today = state.study_logs().count_on(today).await?;
    let active_plans = state.catch_up().count_in_progress().await?;
    let current_streak = state
        .profiles()
        .streak(&profile.id)
        .await?
        .map_or(0, |streak| streak.current_streak);

    Ok(DashboardStats {
        mentor_count,
        study_logs_today,
        active_plans,
        current_streak,
    })
}
