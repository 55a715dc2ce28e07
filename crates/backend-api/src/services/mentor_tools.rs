use chrono::NaiveDate;
use futures_util::future::join_all;
use padikk_database::{
    is_known_category, week_starting, BatchPulseEntry, CreatePlaybookRequest, MentorPlaybook,
    Profile, PulseBoardEntry, PulseCheckin, PulseUpdate,
};
use tracing::{info, warn};

use super::error::{required, ServiceError, ServiceResult};
use super::mentorship::{ensure_guide, linked_mentee};
use crate::AppState;

pub async fn list_playbooks(state: &AppState, mentor: &Profile) -> ServiceResult<Vec<MentorPlaybook>> {
    Ok(state.playbooks().list_for_mentor(&mentor.id).await?)
}

pub async fn create_playbook(
    state: &AppState,
    mentor: &Profile,
    request: CreatePlaybookRequest,
) -> ServiceResult<MentorPlaybook> {
    ensure_guide(mentor)?;

    let request = CreatePlaybookRequest {
        title: required(&request.title, "title")?.to_string(),
        category: required(&request.category, "category")?.to_string(),
        guidance: required(&request.guidance, "guidance")?.to_string(),
    };
    if !is_known_category(&request.category) {
        return Err(ServiceError::bad_request(format!(
            "Unknown playbook category: {}",
            request.category
        )));
    }

    Ok(state.playbooks().create(&mentor.id, &request).await?)
}

pub async fn delete_playbook(
    state: &AppState,
    mentor: &Profile,
    playbook_id: &str,
) -> ServiceResult<()> {
    owned_playbook(state, mentor, playbook_id).await?;
    state.playbooks().delete(playbook_id).await?;
    Ok(())
}

pub async fn duplicate_playbook(
    state: &AppState,
    mentor: &Profile,
    playbook_id: &str,
) -> ServiceResult<MentorPlaybook> {
    owned_playbook(state, mentor, playbook_id).await?;
    Ok(state.playbooks().duplicate(playbook_id).await?)
}

async fn owned_playbook(
    state: &AppState,
    mentor: &Profile,
    playbook_id: &str,
) -> ServiceResult<MentorPlaybook> {
    let playbook = state
        .playbooks()
        .find_by_id(playbook_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Playbook not found"))?;

    if playbook.mentor_id != mentor.id {
        return Err(ServiceError::forbidden("This playbook belongs to another mentor"));
    }
    Ok(playbook)
}

/// Every active mentee with this week's check-in, defaulting to on track.
pub async fn pulse_board(
    state: &AppState,
    mentor: &Profile,
    today: NaiveDate,
) -> ServiceResult<(NaiveDate, Vec<PulseBoardEntry>)> {
    ensure_guide(mentor)?;
    let week = week_starting(today);

    let mentees = state.connections().active_mentees(&mentor.id).await?;
    let checkins = state.pulse().for_week(&mentor.id, week).await?;

    let board = mentees
        .into_iter()
        .map(|mentee| {
            let checkin = checkins
                .iter()
                .find(|checkin| checkin.mentee_id == mentee.profile_id);
            PulseBoardEntry {
                week_starting: week,
                status: checkin.map(|c| c.status).unwrap_or_default(),
                notes: checkin
                    .and_then(|c| c.notes.clone())
                    .unwrap_or_default(),
                mentee_id: mentee.profile_id,
                full_name: mentee.full_name,
                department: mentee.department,
            }
        })
        .collect();

    Ok((week, board))
}

pub async fn save_pulse(
    state: &AppState,
    mentor: &Profile,
    mentee_id: &str,
    update: PulseUpdate,
    today: NaiveDate,
) -> ServiceResult<PulseCheckin> {
    linked_mentee(state, mentor, mentee_id).await?;
    let week = week_starting(today);
    Ok(state.pulse().upsert(&mentor.id, mentee_id, week, &update).await?)
}

/// Save each entry as its own write. Failures are logged and skipped.
pub async fn save_pulse_batch(
    state: &AppState,
    mentor: &Profile,
    entries: Vec<BatchPulseEntry>,
    today: NaiveDate,
) -> ServiceResult<()> {
    ensure_guide(mentor)?;
    let submitted = entries.len();

    let writes = entries.into_iter().map(|entry| async move {
        let result = save_pulse(state, mentor, &entry.mentee_id, entry.update, today).await;
        if let Err(error) = &result {
            warn!(mentee_id = %entry.mentee_id, error = ?error, "pulse check-in not saved");
        }
        result.is_ok()
    });

    let saved = join_all(writes).await.into_iter().filter(|ok| *ok).count();
    info!(mentor_id = %mentor.id, submitted, saved, "pulse batch processed");
    Ok(())
}
