use padikk_database::{Profile, ProjectRequest, StudentProject};

use super::error::{required, ServiceError, ServiceResult};
use crate::AppState;

pub async fn list_projects(state: &AppState, owner: &Profile) -> ServiceResult<Vec<StudentProject>> {
    Ok(state.projects().list_for_profile(&owner.id).await?)
}

pub async fn create_project(
    state: &AppState,
    owner: &Profile,
    request: ProjectRequest,
) -> ServiceResult<StudentProject> {
    let request = validated(request)?;
    Ok(state.projects().create(&owner.id, request).await?)
}

pub async fn update_project(
    state: &AppState,
    owner: &Profile,
    project_id: &str,
    request: ProjectRequest,
) -> ServiceResult<StudentProject> {
    let request = validated(request)?;
    owned_project(state, owner, project_id).await?;
    Ok(state.projects().update(project_id, request).await?)
}

pub async fn delete_project(state: &AppState, owner: &Profile, project_id: &str) -> ServiceResult<()> {
    owned_project(state, owner, project_id).await?;
    state.projects().delete(project_id).await?;
    Ok(())
}

fn validated(request: ProjectRequest) -> ServiceResult<ProjectRequest> {
    Ok(ProjectRequest {
        title: required(&request.title, "title")?.to_string(),
        description: required(&request.description, "description")?.to_string(),
        ..request
    })
}

async fn owned_project(
    state: &AppState,
    owner: &Profile,
    project_id: &str,
) -> ServiceResult<StudentProject> {
    let project = state
        .projects()
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project not found"))?;

    if project.profile_id != owner.id {
        return Err(ServiceError::forbidden("Only the owner may change this project"));
    }
    Ok(project)
}
