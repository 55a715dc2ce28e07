use padikk_database::{
    simulate, CatchUpPlan, CreatePlanRequest, CreateTaskRequest, Profile, SimulationInput,
    SimulationResult,
};

use super::error::{required, ServiceError, ServiceResult};
use crate::AppState;

pub async fn create_plan(
    state: &AppState,
    profile: &Profile,
    mut request: CreatePlanRequest,
) -> ServiceResult<CatchUpPlan> {
    request.subject = required(&request.subject, "subject")?.to_string();
    Ok(state.catch_up().create(&profile.id, &request).await?)
}

pub async fn list_plans(state: &AppState, profile: &Profile) -> ServiceResult<Vec<CatchUpPlan>> {
    Ok(state.catch_up().list_for_profile(&profile.id).await?)
}

pub async fn add_task(
    state: &AppState,
    profile: &Profile,
    plan_id: &str,
    request: CreateTaskRequest,
) -> ServiceResult<CatchUpPlan> {
    let title = required(&request.title, "title")?;
    owned_plan(state, profile, plan_id).await?;
    Ok(state.catch_up().add_task(plan_id, title).await?)
}

pub async fn toggle_task(
    state: &AppState,
    profile: &Profile,
    plan_id: &str,
    task_id: &str,
) -> ServiceResult<CatchUpPlan> {
    owned_plan(state, profile, plan_id).await?;
    Ok(state.catch_up().toggle_task(plan_id, task_id).await?)
}

pub async fn delete_plan(state: &AppState, profile: &Profile, plan_id: &str) -> ServiceResult<()> {
    owned_plan(state, profile, plan_id).await?;
    state.catch_up().delete(plan_id).await?;
    Ok(())
}

pub fn run_simulation(input: SimulationInput) -> ServiceResult<SimulationResult> {
    simulate(input).ok_or_else(|| {
        ServiceError::bad_request("daysRemaining and dailyStudyHours must be positive")
    })
}

async fn owned_plan(state: &AppState, profile: &Profile, plan_id: &str) -> ServiceResult<CatchUpPlan> {
    let plan = state
        .catch_up()
        .find_by_id(plan_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Catch-up plan not found"))?;

    if plan.profile_id != profile.id {
        return Err(ServiceError::forbidden("This catch-up plan belongs to someone else"));
    }
    Ok(plan)
}
