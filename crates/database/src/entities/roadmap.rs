//! Alumni roadmap vault entries

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AlumniRoadmap {
    pub id: String,
    pub alumni_id: String,
    pub title: String,
    pub description: String,
    pub target_year: i64,
    pub academic_focus: Json<Vec<String>>,
    pub skills_focus: Json<Vec<String>>,
    pub key_learnings: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoadmapRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_year: i64,
    #[serde(default)]
    pub academic_focus: Vec<String>,
    #[serde(default)]
    pub skills_focus: Vec<String>,
    #[serde(default)]
    pub key_learnings: String,
}

/// Roadmap skills the student has not listed in their expertise.
///
/// Comparison ignores case; the roadmap's own spelling is returned.
pub fn skill_gaps(roadmap_skills: &[String], expertise: &[String]) -> Vec<String> {
    roadmap_skills
        .iter()
        .filter(|skill| {
            !expertise
                .iter()
                .any(|known| known.eq_ignore_ascii_case(skill))
        })
        .cloned()
        .collect()
}

/// Academic year of a student derived from account age, never below one.
pub fn student_year(days_since_joining: i64) -> i64 {
    match days_since_joining.max(0) / 365 {
        0 => 1,
        year => year,
    }
}
