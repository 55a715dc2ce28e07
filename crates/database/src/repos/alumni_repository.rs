//! Repository for alumni roadmaps and skill recommendations.

use chrono::Utc;
use sqlx::{types::Json, SqlitePool};
use tracing::info;

use crate::entities::profile::normalize_tags;
use crate::entities::{
    AlumniRoadmap, CreateRecommendationRequest, CreateRoadmapRequest, SkillRecommendation,
};
use crate::types::DatabaseResult;

const ROADMAP_COLUMNS: &str = "id, alumni_id, title, description, target_year, academic_focus, \
     skills_focus, key_learnings, created_at";

const RECOMMENDATION_COLUMNS: &str =
    "id, alumni_id, mentee_id, skill_name, resource_url, action_item, priority, created_at";

/// Repository for alumni tool database operations
#[derive(Clone)]
pub struct AlumniRepository {
    pool: SqlitePool,
}

impl AlumniRepository {
    /// Create a new alumni repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Roadmaps authored by `alumni_id`, by target year.
    pub async fn list_roadmaps(&self, alumni_id: &str) -> DatabaseResult<Vec<AlumniRoadmap>> {
        let roadmaps = sqlx::query_as::<_, AlumniRoadmap>(&format!(
            "SELECT {ROADMAP_COLUMNS} FROM alumni_roadmaps WHERE alumni_id = ? \
             ORDER BY target_year ASC, created_at ASC"
        ))
        .bind(alumni_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roadmaps)
    }

    pub async fn create_roadmap(
        &self,
        alumni_id: &str,
        request: &CreateRoadmapRequest,
    ) -> DatabaseResult<AlumniRoadmap> {
        let roadmap = AlumniRoadmap {
            id: cuid2::create_id(),
            alumni_id: alumni_id.to_string(),
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            target_year: request.target_year,
            academic_focus: Json(normalize_tags(&request.academic_focus)),
            skills_focus: Json(normalize_tags(&request.skills_focus)),
            key_learnings: request.key_learnings.trim().to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            "INSERT INTO alumni_roadmaps (id, alumni_id, title, description, target_year, \
             academic_focus, skills_focus, key_learnings, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&roadmap.id)
        .bind(&roadmap.alumni_id)
        .bind(&roadmap.title)
        .bind(&roadmap.description)
        .bind(roadmap.target_year)
        .bind(&roadmap.academic_focus)
        .bind(&roadmap.skills_focus)
        .bind(&roadmap.key_learnings)
        .bind(&roadmap.created_at)
        .execute(&self.pool)
        .await?;

        info!(roadmap_id = %roadmap.id, alumni_id, target_year = roadmap.target_year, "roadmap created");
        Ok(roadmap)
    }

    /// Newest roadmap the alumni wrote for `target_year`.
    pub async fn latest_roadmap_for_year(
        &self,
        alumni_id: &str,
        target_year: i64,
    ) -> DatabaseResult<Option<AlumniRoadmap>> {
        let roadmap = sqlx::query_as::<_, AlumniRoadmap>(&format!(
            "SELECT {ROADMAP_COLUMNS} FROM alumni_roadmaps WHERE alumni_id = ? AND target_year = ? \
             ORDER BY created_at DESC LIMIT 1"
        ))
        .bind(alumni_id)
        .bind(target_year)
        .fetch_optional(&self.pool)
        .await?;
        Ok(roadmap)
    }

    pub async fn list_recommendations(
        &self,
        alumni_id: &str,
        mentee_id: &str,
    ) -> DatabaseResult<Vec<SkillRecommendation>> {
        let recommendations = sqlx::query_as::<_, SkillRecommendation>(&format!(
            "SELECT {RECOMMENDATION_COLUMNS} FROM skill_recommendations \
             WHERE alumni_id = ? AND mentee_id = ? ORDER BY created_at DESC"
        ))
        .bind(alumni_id)
        .bind(mentee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(recommendations)
    }

    pub async fn create_recommendation(
        &self,
        alumni_id: &str,
        mentee_id: &str,
        request: &CreateRecommendationRequest,
    ) -> DatabaseResult<SkillRecommendation> {
        let recommendation = SkillRecommendation {
            id: cuid2::create_id(),
            alumni_id: alumni_id.to_string(),
            mentee_id: mentee_id.to_string(),
            skill_name: request.skill_name.trim().to_string(),
            resource_url: request.resource_url.trim().to_string(),
            action_item: request.action_item.trim().to_string(),
            priority: request.priority,
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(&format!(
            "INSERT INTO skill_recommendations ({RECOMMENDATION_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&recommendation.id)
        .bind(&recommendation.alumni_id)
        .bind(&recommendation.mentee_id)
        .bind(&recommendation.skill_name)
        .bind(&recommendation.resource_url)
        .bind(&recommendation.action_item)
        .bind(recommendation.priority)
        .bind(&recommendation.created_at)
        .execute(&self.pool)
        .await?;

        info!(
            recommendation_id = %recommendation.id,
            alumni_id,
            mentee_id,
            "skill recommendation created"
        );
        Ok(recommendation)
    }
}
