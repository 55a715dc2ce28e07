//! Repository for profile and streak data access operations.

use chrono::Utc;
use sqlx::{types::Json, SqlitePool};
use tracing::info;

use crate::entities::profile::normalize_tags;
use crate::entities::{CreateProfileRequest, Profile, ProfileStats, UpdateProfileRequest, UserStreak};
use crate::types::{DatabaseError, DatabaseResult};

const PROFILE_COLUMNS: &str = "id, user_id, email, full_name, role, college, department, year, bio, \
     areas_of_expertise, is_verified, created_at, updated_at";

/// Repository for profile database operations
#[derive(Clone)]
pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    /// Create a new profile repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Complete the profile for an account and open its streak row.
    pub async fn create(
        &self,
        user_id: i64,
        email: Option<&str>,
        request: &CreateProfileRequest,
    ) -> DatabaseResult<Profile> {
        let now = Utc::now().to_rfc3339();
        let id = cuid2::create_id();
        let expertise = normalize_tags(&request.areas_of_expertise);

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO profiles (id, user_id, email, full_name, role, college, department, year, bio, \
             areas_of_expertise, is_verified, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(email)
        .bind(request.full_name.trim())
        .bind(request.role)
        .bind(request.college.trim())
        .bind(request.department.trim())
        .bind(request.year)
        .bind(request.bio.as_deref())
        .bind(Json(&expertise))
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await;

        if let Err(error) = inserted {
            return Err(match DatabaseError::from(error) {
                DatabaseError::Duplicate(_) => {
                    DatabaseError::Duplicate("profile already completed".to_string())
                }
                other => other,
            });
        }

        sqlx::query(
            "INSERT INTO user_streaks (profile_id, current_streak, longest_streak, last_activity_date, updated_at) \
             VALUES (?, 0, 0, NULL, ?)",
        )
        .bind(&id)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(profile_id = %id, user_id, role = request.role.as_str(), "profile completed");

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Profile"))
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn find_by_user_id(&self, user_id: i64) -> DatabaseResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Apply the fields present in `request`, leaving the rest untouched.
    pub async fn update(&self, id: &str, request: &UpdateProfileRequest) -> DatabaseResult<Profile> {
        let mut profile = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Profile"))?;

        if let Some(full_name) = &request.full_name {
            profile.full_name = full_name.trim().to_string();
        }
        if let Some(college) = &request.college {
            profile.college = college.trim().to_string();
        }
        if let Some(department) = &request.department {
            profile.department = department.trim().to_string();
        }
        if request.year.is_some() {
            profile.year = request.year;
        }
        if request.bio.is_some() {
            profile.bio = request.bio.clone();
        }
        if let Some(expertise) = &request.areas_of_expertise {
            profile.areas_of_expertise = Json(normalize_tags(expertise));
        }
        profile.updated_at = Utc::now().to_rfc3339();

        sqlx::query(
            "UPDATE profiles SET full_name = ?, college = ?, department = ?, year = ?, bio = ?, \
             areas_of_expertise = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&profile.full_name)
        .bind(&profile.college)
        .bind(&profile.department)
        .bind(profile.year)
        .bind(profile.bio.as_deref())
        .bind(&profile.areas_of_expertise)
        .bind(&profile.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Mentors and alumni, alphabetically.
    pub async fn list_guides(&self) -> DatabaseResult<Vec<Profile>> {
        let guides = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE role IN ('mentor', 'alumni') \
             ORDER BY full_name COLLATE NOCASE ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(guides)
    }

    pub async fn search_guides(&self, query: &str) -> DatabaseResult<Vec<Profile>> {
        let guides = self.list_guides().await?;
        Ok(guides
            .into_iter()
            .filter(|guide| guide.matches_search(query))
            .collect())
    }

    pub async fn count_guides(&self) -> DatabaseResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM profiles WHERE role IN ('mentor', 'alumni')")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn streak(&self, profile_id: &str) -> DatabaseResult<Option<UserStreak>> {
        let streak = sqlx::query_as::<_, UserStreak>(
            "SELECT profile_id, current_streak, longest_streak, last_activity_date, updated_at \
             FROM user_streaks WHERE profile_id = ?",
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(streak)
    }

    pub async fn stats(&self, profile_id: &str) -> DatabaseResult<ProfileStats> {
        let (study_logs, total_minutes): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(duration_minutes), 0) FROM study_logs WHERE profile_id = ?",
        )
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await?;

        let (connections,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM mentorship_connections \
             WHERE status = 'active' AND (mentee_id = ? OR mentor_id = ? OR alumni_id = ?)",
        )
        .bind(profile_id)
        .bind(profile_id)
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await?;

        let streak = self.streak(profile_id).await?;

        Ok(ProfileStats {
            study_logs,
            total_minutes,
            current_streak: streak.as_ref().map_or(0, |s| s.current_streak),
            longest_streak: streak.as_ref().map_or(0, |s| s.longest_streak),
            connections,
        })
    }
}
