//! Repository for study logs, streak updates and feed likes.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::entities::{CreateStudyLogRequest, FeedEntry, StudyLog, UserStreak};
use crate::types::{DatabaseError, DatabaseResult};

const LOG_COLUMNS: &str = "id, profile_id, subject, duration_minutes, notes, date, created_at";

/// Outcome of toggling a like on a feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    pub liked: bool,
    pub like_count: i64,
}

/// Repository for study log database operations
#[derive(Clone)]
pub struct StudyLogRepository {
    pool: SqlitePool,
}

impl StudyLogRepository {
    /// Create a new study log repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a study session dated `today` and advance the author's streak.
    pub async fn create(
        &self,
        profile_id: &str,
        request: &CreateStudyLogRequest,
        today: NaiveDate,
    ) -> DatabaseResult<(StudyLog, UserStreak)> {
        let now = Utc::now().to_rfc3339();
        let log = StudyLog {
            id: cuid2::create_id(),
            profile_id: profile_id.to_string(),
            subject: request.subject.trim().to_string(),
            duration_minutes: request.duration_minutes,
            notes: request.notes.trim().to_string(),
            date: today,
            created_at: now.clone(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO study_logs (id, profile_id, subject, duration_minutes, notes, date, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&log.id)
        .bind(&log.profile_id)
        .bind(&log.subject)
        .bind(log.duration_minutes)
        .bind(&log.notes)
        .bind(log.date)
        .bind(&log.created_at)
        .execute(&mut *tx)
        .await?;

        let mut streak = sqlx::query_as::<_, UserStreak>(
            "SELECT profile_id, current_streak, longest_streak, last_activity_date, updated_at \
             FROM user_streaks WHERE profile_id = ?",
        )
        .bind(profile_id)
        .fetch_optional(&mut *tx)
        .await?
        .unwrap_or_else(|| UserStreak::empty(profile_id, now.clone()));

        streak.record_activity(today);
        streak.updated_at = now;

        sqlx::query(
            "INSERT INTO user_streaks (profile_id, current_streak, longest_streak, last_activity_date, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(profile_id) DO UPDATE SET current_streak = excluded.current_streak, \
             longest_streak = excluded.longest_streak, last_activity_date = excluded.last_activity_date, \
             updated_at = excluded.updated_at",
        )
        .bind(&streak.profile_id)
        .bind(streak.current_streak)
        .bind(streak.longest_streak)
        .bind(streak.last_activity_date)
        .bind(&streak.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            log_id = %log.id,
            profile_id,
            minutes = log.duration_minutes,
            streak = streak.current_streak,
            "study log recorded"
        );

        Ok((log, streak))
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<StudyLog>> {
        let log = sqlx::query_as::<_, StudyLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM study_logs WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(log)
    }

    /// Logs by one profile, newest first.
    pub async fn list_for_profile(&self, profile_id: &str) -> DatabaseResult<Vec<StudyLog>> {
        let logs = sqlx::query_as::<_, StudyLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM study_logs WHERE profile_id = ? \
             ORDER BY date DESC, created_at DESC"
        ))
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    pub async fn count_since(&self, profile_id: &str, since: NaiveDate) -> DatabaseResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM study_logs WHERE profile_id = ? AND date >= ?")
                .bind(profile_id)
                .bind(since)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Logs from every student dated `date`.
    pub async fn count_on(&self, date: NaiveDate) -> DatabaseResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM study_logs WHERE date = ?")
            .bind(date)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Newest logs across all students, annotated for `viewer_id`.
    pub async fn feed(&self, viewer_id: &str, limit: i64) -> DatabaseResult<Vec<FeedEntry>> {
        let entries = sqlx::query_as::<_, FeedEntry>(
            "SELECT l.id, l.profile_id, p.full_name AS author_name, l.subject, l.duration_minutes, \
                    l.notes, l.date, l.created_at, \
                    (SELECT COUNT(*) FROM study_log_likes k WHERE k.study_log_id = l.id) AS like_count, \
                    EXISTS (SELECT 1 FROM study_log_likes k WHERE k.study_log_id = l.id AND k.profile_id = ?) AS liked_by_me \
             FROM study_logs l \
             JOIN profiles p ON p.id = l.profile_id \
             ORDER BY l.created_at DESC \
             LIMIT ?",
        )
        .bind(viewer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn like_count(&self, log_id: &str) -> DatabaseResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM study_log_likes WHERE study_log_id = ?")
                .bind(log_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Like the log if the profile has not yet, otherwise remove the like.
    pub async fn toggle_like(&self, log_id: &str, profile_id: &str) -> DatabaseResult<LikeToggle> {
        if self.find_by_id(log_id).await?.is_none() {
            return Err(DatabaseError::not_found("Study log"));
        }

        let removed = sqlx::query(
            "DELETE FROM study_log_likes WHERE study_log_id = ? AND profile_id = ?",
        )
        .bind(log_id)
        .bind(profile_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        let liked = if removed == 0 {
            sqlx::query(
                "INSERT INTO study_log_likes (study_log_id, profile_id, created_at) VALUES (?, ?, ?) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(log_id)
            .bind(profile_id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
            true
        } else {
            false
        };

        let like_count = self.like_count(log_id).await?;
        debug!(log_id, profile_id, liked, like_count, "toggled study log like");

        Ok(LikeToggle { liked, like_count })
    }
}
