//! Repository for mentorship connections.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::entities::connection::message_preview;
use crate::entities::{
    ConnectionStatus, ConnectionSummary, Mentee, MentorshipConnection, Profile, ProfileRole,
};
use crate::types::{DatabaseError, DatabaseResult};

const CONNECTION_COLUMNS: &str =
    "id, mentee_id, mentor_id, alumni_id, status, message, last_message, created_at, updated_at";

/// Repository for mentorship connection database operations
#[derive(Clone)]
pub struct ConnectionRepository {
    pool: SqlitePool,
}

impl ConnectionRepository {
    /// Create a new connection repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pending request from `mentee_id` to `guide`.
    ///
    /// Alumni land in the alumni slot, everyone else in the mentor slot.
    pub async fn create(
        &self,
        mentee_id: &str,
        guide: &Profile,
        message: &str,
    ) -> DatabaseResult<MentorshipConnection> {
        let now = Utc::now().to_rfc3339();
        let (mentor_id, alumni_id) = match guide.role {
            ProfileRole::Alumni => (None, Some(guide.id.clone())),
            _ => (Some(guide.id.clone()), None),
        };

        let connection = MentorshipConnection {
            id: cuid2::create_id(),
            mentee_id: mentee_id.to_string(),
            mentor_id,
            alumni_id,
            status: ConnectionStatus::Pending,
            message: message.to_string(),
            last_message: message_preview(message),
            created_at: now.clone(),
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO mentorship_connections \
             (id, mentee_id, mentor_id, alumni_id, status, message, last_message, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&connection.id)
        .bind(&connection.mentee_id)
        .bind(connection.mentor_id.as_deref())
        .bind(connection.alumni_id.as_deref())
        .bind(connection.status)
        .bind(&connection.message)
        .bind(&connection.last_message)
        .bind(&connection.created_at)
        .bind(&connection.updated_at)
        .execute(&self.pool)
        .await?;

        info!(
            connection_id = %connection.id,
            mentee_id,
            guide_id = %guide.id,
            "mentorship request created"
        );

        Ok(connection)
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<MentorshipConnection>> {
        let connection = sqlx::query_as::<_, MentorshipConnection>(&format!(
            "SELECT {CONNECTION_COLUMNS} FROM mentorship_connections WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(connection)
    }

    /// Every connection the profile takes part in, newest first.
    pub async fn list_for_profile(&self, profile_id: &str) -> DatabaseResult<Vec<ConnectionSummary>> {
        let summaries = sqlx::query_as::<_, ConnectionSummary>(
            "SELECT c.id, c.status, c.message, c.last_message, \
                    p.id AS counterpart_id, p.full_name AS counterpart_name, \
                    p.department AS counterpart_department, \
                    CASE WHEN c.mentee_id = ? THEN 'mentee' ELSE 'mentor' END AS relationship, \
                    c.created_at, c.updated_at \
             FROM mentorship_connections c \
             JOIN profiles p ON p.id = CASE WHEN c.mentee_id = ? \
                                            THEN COALESCE(c.mentor_id, c.alumni_id) \
                                            ELSE c.mentee_id END \
             WHERE c.mentee_id = ? OR c.mentor_id = ? OR c.alumni_id = ? \
             ORDER BY c.created_at DESC",
        )
        .bind(profile_id)
        .bind(profile_id)
        .bind(profile_id)
        .bind(profile_id)
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(summaries)
    }

    pub async fn set_status(
        &self,
        id: &str,
        status: ConnectionStatus,
    ) -> DatabaseResult<MentorshipConnection> {
        let updated = sqlx::query(
            "UPDATE mentorship_connections SET status = ?, updated_at = ? WHERE id = ?",
        )
        .bind(status)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(DatabaseError::not_found("Connection"));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Connection"))
    }

    /// Students with an active connection to `guide_id` in either guide slot.
    pub async fn active_mentees(&self, guide_id: &str) -> DatabaseResult<Vec<Mentee>> {
        let mentees = sqlx::query_as::<_, Mentee>(
            "SELECT c.id AS connection_id, p.id AS profile_id, p.full_name, p.department, p.year, \
                    c.updated_at AS connected_at \
             FROM mentorship_connections c \
             JOIN profiles p ON p.id = c.mentee_id \
             WHERE c.status = 'active' AND (c.mentor_id = ? OR c.alumni_id = ?) \
             ORDER BY p.full_name COLLATE NOCASE ASC",
        )
        .bind(guide_id)
        .bind(guide_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(mentees)
    }

    pub async fn has_active_link(&self, guide_id: &str, mentee_id: &str) -> DatabaseResult<bool> {
        let (linked,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM mentorship_connections \
             WHERE status = 'active' AND mentee_id = ? AND (mentor_id = ? OR alumni_id = ?))",
        )
        .bind(mentee_id)
        .bind(guide_id)
        .bind(guide_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(linked)
    }
}
