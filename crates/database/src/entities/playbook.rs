//! Mentor playbook entities

use serde::{Deserialize, Serialize};

pub const PLAYBOOK_CATEGORIES: &[&str] = &[
    "Time Management",
    "Study Techniques",
    "Motivation",
    "Exam Prep",
    "Project Management",
    "Learning Strategies",
    "Work-Life Balance",
    "Leadership",
];

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MentorPlaybook {
    pub id: String,
    pub mentor_id: String,
    pub title: String,
    pub category: String,
    pub guidance: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaybookRequest {
    pub title: String,
    pub category: String,
    pub guidance: String,
}

pub fn is_known_category(category: &str) -> bool {
    PLAYBOOK_CATEGORIES.contains(&category)
}

pub fn duplicate_title(title: &str) -> String {
    format!("{title} (Copy)")
}
