use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::WithRejection;
use padikk_database::{
    CatchUpPlan, CreatePlanRequest, CreateTaskRequest, SimulationInput, SimulationResult,
};
use serde::Serialize;

use super::{JsonBody, SuccessResponse};
use crate::{services::catch_up as catch_up_service, ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: CatchUpPlan,
}

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub plans: Vec<CatchUpPlan>,
}

pub async fn create_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<CreatePlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let plan = catch_up_service::create_plan(&state, &caller.profile, request).await?;
    Ok(Json(PlanResponse { plan }))
}

pub async fn list_plans(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PlansResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let plans = catch_up_service::list_plans(&state, &caller.profile).await?;
    Ok(Json(PlansResponse { plans }))
}

pub async fn add_task(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    headers: HeaderMap,
    WithRejection(Json(request), _): JsonBody<CreateTaskRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let plan = catch_up_service::add_task(&state, &caller.profile, &plan_id, request).await?;
    Ok(Json(PlanResponse { plan }))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path((plan_id, task_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<PlanResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let plan = catch_up_service::toggle_task(&state, &caller.profile, &plan_id, &task_id).await?;
    Ok(Json(PlanResponse { plan }))
}

pub async fn delete_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    catch_up_service::delete_plan(&state, &caller.profile, &plan_id).await?;
    Ok(SuccessResponse::ok())
}

pub async fn simulate(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(input), _): JsonBody<SimulationInput>,
) -> Result<Json<SimulationResult>, ApiError> {
    state.caller(&headers).await?;
    let result = catch_up_service::run_simulation(input)?;
    Ok(Json(result))
}
