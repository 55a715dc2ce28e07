use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::WithRejection;
use padikk_database::{ProjectRequest, StudentProject};
use serde::Serialize;

use super::{JsonBody, SuccessResponse};
use crate::{services::projects as project_service, ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<StudentProject>,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: StudentProject,
}

pub async fn list_projects(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let projects = project_service::list_projects(&state, &caller.profile).await?;
    Ok(Json(ProjectsResponse { projects }))
}

pub async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<ProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let project = project_service::create_project(&state, &caller.profile, request).await?;
    Ok(Json(ProjectResponse { project }))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<ProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let project =
        project_service::update_project(&state, &caller.profile, &project_id, request).await?;
    Ok(Json(ProjectResponse { project }))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    project_service::delete_project(&state, &caller.profile, &project_id).await?;
    Ok(SuccessResponse::ok())
}
