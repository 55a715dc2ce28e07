//! Skill recommendations from alumni to mentees

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecommendation {
    pub id: String,
    pub alumni_id: String,
    pub mentee_id: String,
    pub skill_name: String,
    pub resource_url: String,
    pub action_item: String,
    pub priority: Priority,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecommendationRequest {
    pub skill_name: String,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub action_item: String,
    #[serde(default)]
    pub priority: Priority,
}
