//! Mentorship connection entities

use serde::{Deserialize, Serialize};

const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipConnection {
    pub id: String,
    pub mentee_id: String,
    pub mentor_id: Option<String>,
    pub alumni_id: Option<String>,
    pub status: ConnectionStatus,
    pub message: String,
    pub last_message: String,
    pub created_at: String,
    pub updated_at: String,
}

impl MentorshipConnection {
    /// The profile on the guiding side, whichever slot it occupies.
    pub fn guide_id(&self) -> Option<&str> {
        self.mentor_id.as_deref().or(self.alumni_id.as_deref())
    }

    pub fn involves(&self, profile_id: &str) -> bool {
        self.mentee_id == profile_id || self.guide_id() == Some(profile_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Active,
    Declined,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConnectionRequest {
    pub mentor_id: String,
    pub message: String,
}

/// Which side of a connection the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Mentor,
    Mentee,
}

/// A connection annotated for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSummary {
    pub id: String,
    pub status: ConnectionStatus,
    pub message: String,
    pub last_message: String,
    pub counterpart_id: String,
    pub counterpart_name: String,
    pub counterpart_department: String,
    pub relationship: Relationship,
    pub created_at: String,
    pub updated_at: String,
}

/// An active mentee of a mentor or alumni.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Mentee {
    pub connection_id: String,
    pub profile_id: String,
    pub full_name: String,
    pub department: String,
    pub year: Option<i64>,
    pub connected_at: String,
}

/// First fifty characters of the intro message followed by an ellipsis.
pub fn message_preview(message: &str) -> String {
    let head: String = message.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_messages() {
        let message = "a".repeat(80);
        let preview = message_preview(&message);
        assert_eq!(preview.len(), 53);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_always_appends_ellipsis() {
        assert_eq!(message_preview("Hi there"), "Hi there...");
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let message = "പഠിക്ക്".repeat(20);
        let preview = message_preview(&message);
        assert_eq!(preview.chars().count(), 53);
    }

    #[test]
    fn guide_id_prefers_mentor_slot() {
        let connection = MentorshipConnection {
            id: "c".into(),
            mentee_id: "s".into(),
            mentor_id: None,
            alumni_id: Some("a".into()),
            status: ConnectionStatus::Pending,
            message: String::new(),
            last_message: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert_eq!(connection.guide_id(), Some("a"));
        assert!(connection.involves("s"));
        assert!(connection.involves("a"));
        assert!(!connection.involves("x"));
    }
}
