use padikk_database::{
    ConnectionStatus, ConnectionSummary, CreateConnectionRequest, Mentee, MentorshipConnection,
    Profile,
};
use tracing::info;

use super::error::{required, ServiceError, ServiceResult};
use crate::AppState;

pub async fn search_mentors(state: &AppState, query: Option<&str>) -> ServiceResult<Vec<Profile>> {
    let query = query.map(str::trim).unwrap_or_default();
    Ok(state.profiles().search_guides(query).await?)
}

pub async fn request_connection(
    state: &AppState,
    mentee: &Profile,
    request: CreateConnectionRequest,
) -> ServiceResult<MentorshipConnection> {
    let message = required(&request.message, "message")?;

    let guide = state
        .profiles()
        .find_by_id(&request.mentor_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Mentor not found"))?;

    if guide.id == mentee.id {
        return Err(ServiceError::bad_request("You cannot connect with yourself"));
    }
    if !guide.is_guide() {
        return Err(ServiceError::bad_request(
            "Connections can only be requested from mentors or alumni",
        ));
    }

    Ok(state.connections().create(&mentee.id, &guide, message).await?)
}

pub async fn list_connections(
    state: &AppState,
    profile: &Profile,
) -> ServiceResult<Vec<ConnectionSummary>> {
    Ok(state.connections().list_for_profile(&profile.id).await?)
}

/// Accept or decline a request. Only the guiding side may answer.
pub async fn respond(
    state: &AppState,
    guide: &Profile,
    connection_id: &str,
    status: ConnectionStatus,
) -> ServiceResult<MentorshipConnection> {
    let connections = state.connections();
    let connection = connections
        .find_by_id(connection_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Connection not found"))?;

    if connection.guide_id() != Some(guide.id.as_str()) {
        return Err(ServiceError::forbidden(
            "Only the mentor on this connection can respond to it",
        ));
    }

    let updated = connections.set_status(connection_id, status).await?;
    info!(connection_id, status = ?status, "mentorship request answered");
    Ok(updated)
}

pub async fn mentees(state: &AppState, guide: &Profile) -> ServiceResult<Vec<Mentee>> {
    Ok(state.connections().active_mentees(&guide.id).await?)
}

/// Load a mentee's profile, provided `guide` has an active connection with them.
pub async fn linked_mentee(
    state: &AppState,
    guide: &Profile,
    mentee_id: &str,
) -> ServiceResult<Profile> {
    let mentee = state
        .profiles()
        .find_by_id(mentee_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Student not found"))?;

    if !state.connections().has_active_link(&guide.id, &mentee.id).await? {
        return Err(ServiceError::forbidden(
            "No active mentorship connection with this student",
        ));
    }

    Ok(mentee)
}

pub fn ensure_guide(profile: &Profile) -> ServiceResult<()> {
    if profile.is_guide() {
        Ok(())
    } else {
        Err(ServiceError::forbidden("Only mentors and alumni can use this tool"))
    }
}
