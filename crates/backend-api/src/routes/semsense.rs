use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use padikk_semsense::{SemesterPlan, SemesterPlanRequest};
use serde::Serialize;

use super::JsonBody;
use crate::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct SemesterPlanResponse {
    pub success: bool,
    pub data: SemesterPlan,
}

pub async fn generate_plan(
    State(state): State<AppState>,
    WithRejection(Json(request), _): JsonBody<SemesterPlanRequest>,
) -> Result<Json<SemesterPlanResponse>, ApiError> {
    let plan = state.semsense().plan(request).await?;

    Ok(Json(SemesterPlanResponse {
        success: true,
        data: plan,
    }))
}
