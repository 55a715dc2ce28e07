//! Repository for mentor playbooks.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::entities::playbook::duplicate_title;
use crate::entities::{CreatePlaybookRequest, MentorPlaybook};
use crate::types::{DatabaseError, DatabaseResult};

/// Repository for playbook database operations
#[derive(Clone)]
pub struct PlaybookRepository {
    pool: SqlitePool,
}

impl PlaybookRepository {
    /// Create a new playbook repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_mentor(&self, mentor_id: &str) -> DatabaseResult<Vec<MentorPlaybook>> {
        let playbooks = sqlx::query_as::<_, MentorPlaybook>(
            "SELECT id, mentor_id, title, category, guidance, created_at FROM mentor_playbooks \
             WHERE mentor_id = ? ORDER BY created_at DESC",
        )
        .bind(mentor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(playbooks)
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<MentorPlaybook>> {
        let playbook = sqlx::query_as::<_, MentorPlaybook>(
            "SELECT id, mentor_id, title, category, guidance, created_at FROM mentor_playbooks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(playbook)
    }

    pub async fn create(
        &self,
        mentor_id: &str,
        request: &CreatePlaybookRequest,
    ) -> DatabaseResult<MentorPlaybook> {
        let playbook = MentorPlaybook {
            id: cuid2::create_id(),
            mentor_id: mentor_id.to_string(),
            title: request.title.trim().to_string(),
            category: request.category.clone(),
            guidance: request.guidance.trim().to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.insert(&playbook).await?;

        info!(playbook_id = %playbook.id, mentor_id, category = %playbook.category, "playbook created");
        Ok(playbook)
    }

    /// Copy an existing playbook under the same mentor with a `(Copy)` title.
    pub async fn duplicate(&self, id: &str) -> DatabaseResult<MentorPlaybook> {
        let original = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Playbook"))?;

        let copy = MentorPlaybook {
            id: cuid2::create_id(),
            title: duplicate_title(&original.title),
            created_at: Utc::now().to_rfc3339(),
            ..original
        };
        self.insert(&copy).await?;
        Ok(copy)
    }

    pub async fn delete(&self, id: &str) -> DatabaseResult<()> {
        let deleted = sqlx::query("DELETE FROM mentor_playbooks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DatabaseError::not_found("Playbook"));
        }
        Ok(())
    }

    async fn insert(&self, playbook: &MentorPlaybook) -> DatabaseResult<()> {
        sqlx::query(
            "INSERT INTO mentor_playbooks (id, mentor_id, title, category, guidance, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&playbook.id)
        .bind(&playbook.mentor_id)
        .bind(&playbook.title)
        .bind(&playbook.category)
        .bind(&playbook.guidance)
        .bind(&playbook.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
