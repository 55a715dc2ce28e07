use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use padikk_database::{CreateProfileRequest, Profile, UpdateProfileRequest};
use serde::Serialize;

use super::JsonBody;
use crate::{
    services::profile::{self as profile_service, DashboardStats, ProfileOverview},
    util::require_bearer,
    ApiError, AppState,
};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
}

pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileOverview>, ApiError> {
    let caller = state.caller(&headers).await?;
    let overview = profile_service::overview(&state, caller.profile).await?;
    Ok(Json(overview))
}

pub async fn complete_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<CreateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let profile = profile_service::complete_profile(&state, &user, request).await?;
    Ok(Json(ProfileResponse { profile }))
}

pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let profile = profile_service::update_profile(&state, &caller.profile, request).await?;
    Ok(Json(ProfileResponse { profile }))
}

pub async fn dashboard_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardStats>, ApiError> {
    let caller = state.caller(&headers).await?;
    let today = Utc::now().date_naive();
    let stats = profile_service::dashboard_stats(&state, &caller.profile, today).await?;
    Ok(Json(stats))
}
