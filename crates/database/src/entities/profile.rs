//! Profile entity definitions

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Dashboard profile attached to an authenticated account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub email: Option<String>,
    pub full_name: String,
    pub role: ProfileRole,
    pub college: String,
    pub department: String,
    pub year: Option<i64>,
    pub bio: Option<String>,
    pub areas_of_expertise: Json<Vec<String>>,
    pub is_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Profile {
    /// Mentors and alumni are the guidance-providing roles.
    pub fn is_guide(&self) -> bool {
        self.role.is_guide()
    }

    pub fn expertise(&self) -> &[String] {
        &self.areas_of_expertise.0
    }

    /// Case-insensitive match against name, department, or any expertise entry.
    ///
    /// An empty query matches every profile.
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.full_name.to_lowercase().contains(&needle)
            || self.department.to_lowercase().contains(&needle)
            || self
                .expertise()
                .iter()
                .any(|entry| entry.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    Student,
    Mentor,
    Alumni,
}

impl ProfileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::Student => "student",
            ProfileRole::Mentor => "mentor",
            ProfileRole::Alumni => "alumni",
        }
    }

    pub fn is_guide(&self) -> bool {
        matches!(self, ProfileRole::Mentor | ProfileRole::Alumni)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub full_name: String,
    pub role: ProfileRole,
    pub college: String,
    pub department: String,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub areas_of_expertise: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub year: Option<i64>,
    pub bio: Option<String>,
    pub areas_of_expertise: Option<Vec<String>>,
}

/// Aggregates shown on the profile tab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub study_logs: i64,
    pub total_minutes: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub connections: i64,
}

impl ProfileStats {
    pub fn total_hours(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub earned: bool,
}

/// Badge list derived from the profile aggregates.
pub fn achievements(stats: &ProfileStats) -> Vec<Achievement> {
    vec![
        Achievement {
            id: "first-log",
            name: "First Study Log",
            earned: stats.study_logs > 0,
        },
        Achievement {
            id: "7-day-streak",
            name: "7-Day Streak",
            earned: stats.longest_streak >= 7,
        },
        Achievement {
            id: "30-day-streak",
            name: "30-Day Streak",
            earned: stats.longest_streak >= 30,
        },
        Achievement {
            id: "100-hours",
            name: "100 Hours Logged",
            earned: stats.total_minutes >= 100 * 60,
        },
    ]
}

/// Trim entries, drop blanks and keep the first occurrence of each value.
pub fn normalize_tags<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() || tags.iter().any(|existing| existing == trimmed) {
            continue;
        }
        tags.push(trimmed.to_string());
    }
    tags
}
