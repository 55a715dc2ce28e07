use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use padikk_database::{
    AlumniRoadmap, CreateRecommendationRequest, CreateRoadmapRequest, GrowthPoint,
    SkillRecommendation,
};
use serde::Serialize;

use super::JsonBody;
use crate::{
    services::alumni::{self as alumni_service, YearComparison},
    ApiError, AppState,
};

#[derive(Debug, Serialize)]
pub struct RoadmapsResponse {
    pub roadmaps: Vec<AlumniRoadmap>,
}

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub roadmap: AlumniRoadmap,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<SkillRecommendation>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendation: SkillRecommendation,
}

#[derive(Debug, Serialize)]
pub struct GrowthResponse {
    pub months: Vec<GrowthPoint>,
}

pub async fn list_roadmaps(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RoadmapsResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let roadmaps = alumni_service::list_roadmaps(&state, &caller.profile).await?;
    Ok(Json(RoadmapsResponse { roadmaps }))
}

pub async fn create_roadmap(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<CreateRoadmapRequest>,
) -> Result<Json<RoadmapResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let roadmap = alumni_service::create_roadmap(&state, &caller.profile, request).await?;
    Ok(Json(RoadmapResponse { roadmap }))
}

pub async fn list_recommendations(
    State(state): State<AppState>,
    Path(mentee_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let recommendations =
        alumni_service::list_recommendations(&state, &caller.profile, &mentee_id).await?;
    Ok(Json(RecommendationsResponse { recommendations }))
}

pub async fn create_recommendation(
    State(state): State<AppState>,
    Path(mentee_id): Path<String>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<CreateRecommendationRequest>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let recommendation =
        alumni_service::create_recommendation(&state, &caller.profile, &mentee_id, request)
            .await?;
    Ok(Json(RecommendationResponse { recommendation }))
}

pub async fn compare_year(
    State(state): State<AppState>,
    Path(mentee_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<YearComparison>, ApiError> {
    let caller = state.caller(&headers).await?;
    let today = Utc::now().date_naive();
    let comparison = alumni_service::compare_year(&state, &caller.profile, &mentee_id, today).await?;
    Ok(Json(comparison))
}

pub async fn growth(
    State(state): State<AppState>,
    Path(mentee_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<GrowthResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let months = alumni_service::growth(&state, &caller.profile, &mentee_id).await?;
    Ok(Json(GrowthResponse { months }))
}
