//! Repository for weekly pulse check-ins.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::entities::{PulseCheckin, PulseUpdate};
use crate::types::DatabaseResult;

/// Repository for pulse check-in database operations
#[derive(Clone)]
pub struct PulseRepository {
    pool: SqlitePool,
}

impl PulseRepository {
    /// Create a new pulse repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn for_week(
        &self,
        mentor_id: &str,
        week_starting: NaiveDate,
    ) -> DatabaseResult<Vec<PulseCheckin>> {
        let checkins = sqlx::query_as::<_, PulseCheckin>(
            "SELECT mentor_id, mentee_id, week_starting, status, notes, updated_at \
             FROM mentor_pulse_checkins WHERE mentor_id = ? AND week_starting = ?",
        )
        .bind(mentor_id)
        .bind(week_starting)
        .fetch_all(&self.pool)
        .await?;
        Ok(checkins)
    }

    /// Insert or replace the check-in for one mentee and week.
    pub async fn upsert(
        &self,
        mentor_id: &str,
        mentee_id: &str,
        week_starting: NaiveDate,
        update: &PulseUpdate,
    ) -> DatabaseResult<PulseCheckin> {
        let checkin = PulseCheckin {
            mentor_id: mentor_id.to_string(),
            mentee_id: mentee_id.to_string(),
            week_starting,
            status: update.status,
            notes: update.notes.clone(),
            updated_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            "INSERT INTO mentor_pulse_checkins (mentor_id, mentee_id, week_starting, status, notes, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT(mentor_id, mentee_id, week_starting) DO UPDATE SET \
             status = excluded.status, notes = excluded.notes, updated_at = excluded.updated_at",
        )
        .bind(&checkin.mentor_id)
        .bind(&checkin.mentee_id)
        .bind(checkin.week_starting)
        .bind(checkin.status)
        .bind(checkin.notes.as_deref())
        .bind(&checkin.updated_at)
        .execute(&self.pool)
        .await?;

        debug!(mentor_id, mentee_id, %week_starting, status = ?checkin.status, "pulse check-in saved");
        Ok(checkin)
    }
}
