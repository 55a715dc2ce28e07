use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::WithRejection;
use padikk_database::{
    ConnectionStatus, ConnectionSummary, CreateConnectionRequest, Mentee, MentorshipConnection,
    Profile,
};
use serde::{Deserialize, Serialize};

use super::JsonBody;
use crate::{services::mentorship as mentorship_service, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct MentorSearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MentorsResponse {
    pub mentors: Vec<Profile>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionResponse {
    pub connection: MentorshipConnection,
}

#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    pub connections: Vec<ConnectionSummary>,
}

#[derive(Debug, Serialize)]
pub struct MenteesResponse {
    pub mentees: Vec<Mentee>,
}

pub async fn search_mentors(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MentorSearchQuery>,
) -> Result<Json<MentorsResponse>, ApiError> {
    state.caller(&headers).await?;
    let mentors = mentorship_service::search_mentors(&state, query.search.as_deref()).await?;
    Ok(Json(MentorsResponse { mentors }))
}

pub async fn request_connection(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<CreateConnectionRequest>,
) -> Result<Json<ConnectionResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let connection =
        mentorship_service::request_connection(&state, &caller.profile, request).await?;
    Ok(Json(ConnectionResponse { connection }))
}

pub async fn list_connections(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ConnectionsResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let connections = mentorship_service::list_connections(&state, &caller.profile).await?;
    Ok(Json(ConnectionsResponse { connections }))
}

pub async fn accept_connection(
    State(state): State<AppState>,
    Path(connection_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ConnectionResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let connection = mentorship_service::respond(
        &state,
        &caller.profile,
        &connection_id,
        ConnectionStatus::Active,
    )
    .await?;
    Ok(Json(ConnectionResponse { connection }))
}

pub async fn decline_connection(
    State(state): State<AppState>,
    Path(connection_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ConnectionResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let connection = mentorship_service::respond(
        &state,
        &caller.profile,
        &connection_id,
        ConnectionStatus::Declined,
    )
    .await?;
    Ok(Json(ConnectionResponse { connection }))
}

pub async fn list_mentees(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MenteesResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let mentees = mentorship_service::mentees(&state, &caller.profile).await?;
    Ok(Json(MenteesResponse { mentees }))
}
