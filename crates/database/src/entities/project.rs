//! Student portfolio projects

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::profile::normalize_tags;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudentProject {
    pub id: String,
    pub profile_id: String,
    pub title: String,
    pub description: String,
    pub technologies: Json<Vec<String>>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Technologies as typed in the form or as an already split list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TechnologyInput {
    Csv(String),
    List(Vec<String>),
}

impl Default for TechnologyInput {
    fn default() -> Self {
        TechnologyInput::List(Vec::new())
    }
}

impl TechnologyInput {
    pub fn into_list(self) -> Vec<String> {
        match self {
            TechnologyInput::Csv(raw) => normalize_tags(raw.split(',')),
            TechnologyInput::List(items) => normalize_tags(items),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: TechnologyInput,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

/// Blank URL fields are stored as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
