use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use padikk_database::{CreateStudyLogRequest, FeedEntry, StudyLog, StudySummary, UserStreak};
use serde::{Deserialize, Serialize};

use super::JsonBody;
use crate::{services::study as study_service, ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct StudyLogCreatedResponse {
    pub log: StudyLog,
    pub streak: UserStreak,
}

#[derive(Debug, Serialize)]
pub struct StudyLogsResponse {
    pub logs: Vec<StudyLog>,
    pub summary: StudySummary,
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub entries: Vec<FeedEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub liked: bool,
    pub like_count: i64,
}

pub async fn create_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<CreateStudyLogRequest>,
) -> Result<Json<StudyLogCreatedResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let today = Utc::now().date_naive();
    let (log, streak) = study_service::log_study(&state, &caller.profile, request, today).await?;
    Ok(Json(StudyLogCreatedResponse { log, streak }))
}

pub async fn list_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StudyLogsResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let today = Utc::now().date_naive();
    let (logs, summary) = study_service::history(&state, &caller.profile, today).await?;
    Ok(Json(StudyLogsResponse { logs, summary }))
}

pub async fn feed(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let entries = study_service::feed(&state, &caller.profile, query.limit).await?;
    Ok(Json(FeedResponse { entries }))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Path(log_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<LikeResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let toggle = study_service::toggle_like(&state, &caller.profile, &log_id).await?;
    Ok(Json(LikeResponse {
        liked: toggle.liked,
        like_count: toggle.like_count,
    }))
}
