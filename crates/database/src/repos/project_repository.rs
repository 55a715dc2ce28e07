//! Repository for student portfolio projects.

use chrono::Utc;
use sqlx::{types::Json, SqlitePool};
use tracing::info;

use crate::entities::project::non_blank;
use crate::entities::{ProjectRequest, StudentProject};
use crate::types::{DatabaseError, DatabaseResult};

const PROJECT_COLUMNS: &str = "id, profile_id, title, description, technologies, project_url, \
     github_url, created_at, updated_at";

/// Repository for project database operations
#[derive(Clone)]
pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    /// Create a new project repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_profile(&self, profile_id: &str) -> DatabaseResult<Vec<StudentProject>> {
        let projects = sqlx::query_as::<_, StudentProject>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM student_projects WHERE profile_id = ? ORDER BY created_at DESC"
        ))
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<StudentProject>> {
        let project = sqlx::query_as::<_, StudentProject>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM student_projects WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    pub async fn create(
        &self,
        profile_id: &str,
        request: ProjectRequest,
    ) -> DatabaseResult<StudentProject> {
        let now = Utc::now().to_rfc3339();
        let project = StudentProject {
            id: cuid2::create_id(),
            profile_id: profile_id.to_string(),
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            technologies: Json(request.technologies.into_list()),
            project_url: non_blank(request.project_url),
            github_url: non_blank(request.github_url),
            created_at: now.clone(),
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO student_projects ({PROJECT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&project.id)
        .bind(&project.profile_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.technologies)
        .bind(project.project_url.as_deref())
        .bind(project.github_url.as_deref())
        .bind(&project.created_at)
        .bind(&project.updated_at)
        .execute(&self.pool)
        .await?;

        info!(project_id = %project.id, profile_id, "project created");
        Ok(project)
    }

    /// Replace the editable fields of a project.
    pub async fn update(&self, id: &str, request: ProjectRequest) -> DatabaseResult<StudentProject> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Project"))?;

        let project = StudentProject {
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            technologies: Json(request.technologies.into_list()),
            project_url: non_blank(request.project_url),
            github_url: non_blank(request.github_url),
            updated_at: Utc::now().to_rfc3339(),
            ..existing
        };

        sqlx::query(
            "UPDATE student_projects SET title = ?, description = ?, technologies = ?, \
             project_url = ?, github_url = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.technologies)
        .bind(project.project_url.as_deref())
        .bind(project.github_url.as_deref())
        .bind(&project.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(project)
    }

    pub async fn delete(&self, id: &str) -> DatabaseResult<()> {
        let deleted = sqlx::query("DELETE FROM student_projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DatabaseError::not_found("Project"));
        }
        Ok(())
    }
}
