use chrono::{DateTime, Datelike, NaiveDate};
use padikk_database::{
    monthly_growth, skill_gaps, student_year, AlumniRoadmap, CreateRecommendationRequest,
    CreateRoadmapRequest, GrowthPoint, Profile, SkillRecommendation,
};
use serde::Serialize;

use super::error::{required, ServiceError, ServiceResult};
use super::mentorship::{ensure_guide, linked_mentee};
use crate::AppState;

/// A mentee set against the alumni's roadmap for the year they are in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearComparison {
    pub mentee: Profile,
    pub student_year: i64,
    pub logs_this_month: i64,
    pub current_streak: i64,
    pub roadmap: Option<AlumniRoadmap>,
    pub skill_gaps: Vec<String>,
}

pub async fn list_roadmaps(state: &AppState, alumni: &Profile) -> ServiceResult<Vec<AlumniRoadmap>> {
    Ok(state.alumni().list_roadmaps(&alumni.id).await?)
}

pub async fn create_roadmap(
    state: &AppState,
    alumni: &Profile,
    mut request: CreateRoadmapRequest,
) -> ServiceResult<AlumniRoadmap> {
    ensure_guide(alumni)?;
    request.title = required(&request.title, "title")?.to_string();
    if request.target_year < 1 {
        return Err(ServiceError::bad_request("targetYear must be at least 1"));
    }

    Ok(state.alumni().create_roadmap(&alumni.id, &request).await?)
}

pub async fn list_recommendations(
    state: &AppState,
    alumni: &Profile,
    mentee_id: &str,
) -> ServiceResult<Vec<SkillRecommendation>> {
    linked_mentee(state, alumni, mentee_id).await?;
    Ok(state.alumni().list_recommendations(&alumni.id, mentee_id).await?)
}

pub async fn create_recommendation(
    state: &AppState,
    alumni: &Profile,
    mentee_id: &str,
    mut request: CreateRecommendationRequest,
) -> ServiceResult<SkillRecommendation> {
    request.skill_name = required(&request.skill_name, "skillName")?.to_string();
    linked_mentee(state, alumni, mentee_id).await?;

    Ok(state
        .alumni()
        .create_recommendation(&alumni.id, mentee_id, &request)
        .await?)
}

pub async fn compare_year(
    state: &AppState,
    alumni: &Profile,
    mentee_id: &str,
    today: NaiveDate,
) -> ServiceResult<YearComparison> {
    let mentee = linked_mentee(state, alumni, mentee_id).await?;

    let joined = DateTime::parse_from_rfc3339(&mentee.created_at)
        .map(|created| created.date_naive())
        .unwrap_or(today);
    let year = student_year((today - joined).num_days());

    let month_start = today.with_day(1).unwrap_or(today);
    let logs_this_month = state.study_logs().count_since(&mentee.id, month_start).await?;
    let current_streak = state
        .profiles()
        .streak(&mentee.id)
        .await?
        .map_or(0, |streak| streak.current_streak);

    let roadmap = state
        .alumni()
        .latest_roadmap_for_year(&alumni.id, year)
        .await?;
    let gaps = roadmap
        .as_ref()
        .map(|roadmap| skill_gaps(&roadmap.skills_focus, mentee.expertise()))
        .unwrap_or_default();

    Ok(YearComparison {
        mentee,
        student_year: year,
        logs_this_month,
        current_streak,
        roadmap,
        skill_gaps: gaps,
    })
}

pub async fn growth(
    state: &AppState,
    alumni: &Profile,
    mentee_id: &str,
) -> ServiceResult<Vec<GrowthPoint>> {
    let mentee = linked_mentee(state, alumni, mentee_id).await?;
    let logs = state.study_logs().list_for_profile(&mentee.id).await?;
    Ok(monthly_growth(&logs))
}
