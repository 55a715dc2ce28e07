use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::{NaiveDate, Utc};
use padikk_database::{
    BatchPulseEntry, CreatePlaybookRequest, MentorPlaybook, PulseBoardEntry, PulseCheckin,
    PulseUpdate, PLAYBOOK_CATEGORIES,
};
use serde::{Deserialize, Serialize};

use super::{JsonBody, SuccessResponse};
use crate::{services::mentor_tools as mentor_service, ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct PlaybooksResponse {
    pub playbooks: Vec<MentorPlaybook>,
    pub categories: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct PlaybookResponse {
    pub playbook: MentorPlaybook,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseBoardResponse {
    pub week_starting: NaiveDate,
    pub mentees: Vec<PulseBoardEntry>,
}

#[derive(Debug, Serialize)]
pub struct PulseCheckinResponse {
    pub checkin: PulseCheckin,
}

#[derive(Debug, Deserialize)]
pub struct PulseBatchRequest {
    pub entries: Vec<BatchPulseEntry>,
}

pub async fn list_playbooks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PlaybooksResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let playbooks = mentor_service::list_playbooks(&state, &caller.profile).await?;
    Ok(Json(PlaybooksResponse {
        playbooks,
        categories: PLAYBOOK_CATEGORIES,
    }))
}

pub async fn create_playbook(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<CreatePlaybookRequest>,
) -> Result<Json<PlaybookResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let playbook = mentor_service::create_playbook(&state, &caller.profile, request).await?;
    Ok(Json(PlaybookResponse { playbook }))
}

pub async fn delete_playbook(
    State(state): State<AppState>,
    Path(playbook_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    mentor_service::delete_playbook(&state, &caller.profile, &playbook_id).await?;
    Ok(SuccessResponse::ok())
}

pub async fn duplicate_playbook(
    State(state): State<AppState>,
    Path(playbook_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<PlaybookResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let playbook = mentor_service::duplicate_playbook(&state, &caller.profile, &playbook_id).await?;
    Ok(Json(PlaybookResponse { playbook }))
}

pub async fn pulse_board(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PulseBoardResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let today = Utc::now().date_naive();
    let (week_starting, mentees) = mentor_service::pulse_board(&state, &caller.profile, today).await?;
    Ok(Json(PulseBoardResponse {
        week_starting,
        mentees,
    }))
}

pub async fn save_pulse(
    State(state): State<AppState>,
    Path(mentee_id): Path<String>,
    headers: HeaderMap,
    WithRejection(Json(update), _): JsonBody<PulseUpdate>,
) -> Result<Json<PulseCheckinResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let today = Utc::now().date_naive();
    let checkin =
        mentor_service::save_pulse(&state, &caller.profile, &mentee_id, update, today).await?;
    Ok(Json(PulseCheckinResponse { checkin }))
}

pub async fn save_pulse_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<PulseBatchRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let today = Utc::now().date_naive();
    mentor_service::save_pulse_batch(&state, &caller.profile, request.entries, today).await?;
    Ok(SuccessResponse::ok())
}
