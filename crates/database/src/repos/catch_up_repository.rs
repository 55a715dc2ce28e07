//! Repository for catch-up plans and their roadmap tasks.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::entities::catch_up::default_roadmap;
use crate::entities::{CatchUpPlan, CreatePlanRequest, PlanStatus, RoadmapTask};
use crate::types::{DatabaseError, DatabaseResult};

const PLAN_COLUMNS: &str = "id, profile_id, subject, exam_date, status, total_tasks, \
     completed_tasks, progress, created_at, updated_at";

/// Repository for catch-up plan database operations
#[derive(Clone)]
pub struct CatchUpRepository {
    pool: SqlitePool,
}

impl CatchUpRepository {
    /// Create a new catch-up plan repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a plan together with its generated day-by-day roadmap.
    pub async fn create(
        &self,
        profile_id: &str,
        request: &CreatePlanRequest,
    ) -> DatabaseResult<CatchUpPlan> {
        let now = Utc::now().to_rfc3339();
        let plan_id = cuid2::create_id();
        let roadmap = default_roadmap(request.days);
        let total = roadmap.len() as i64;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO catch_up_plans (id, profile_id, subject, exam_date, status, total_tasks, \
             completed_tasks, progress, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?, ?)",
        )
        .bind(&plan_id)
        .bind(profile_id)
        .bind(request.subject.trim())
        .bind(request.exam_date)
        .bind(PlanStatus::InProgress)
        .bind(total)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        for (day, title) in &roadmap {
            insert_task(&mut tx, &plan_id, *day, title).await?;
        }

        tx.commit().await?;

        info!(plan_id = %plan_id, profile_id, tasks = total, "catch-up plan created");

        self.find_by_id(&plan_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Catch-up plan"))
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<CatchUpPlan>> {
        let plan = sqlx::query_as::<_, CatchUpPlan>(&format!(
            "SELECT {PLAN_COLUMNS} FROM catch_up_plans WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match plan {
            Some(mut plan) => {
                plan.roadmap = self.tasks(&plan.id).await?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    /// The profile's plans with roadmaps, newest first.
    pub async fn list_for_profile(&self, profile_id: &str) -> DatabaseResult<Vec<CatchUpPlan>> {
        let mut plans = sqlx::query_as::<_, CatchUpPlan>(&format!(
            "SELECT {PLAN_COLUMNS} FROM catch_up_plans WHERE profile_id = ? ORDER BY created_at DESC"
        ))
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;

        for plan in &mut plans {
            plan.roadmap = self.tasks(&plan.id).await?;
        }
        Ok(plans)
    }

    pub async fn tasks(&self, plan_id: &str) -> DatabaseResult<Vec<RoadmapTask>> {
        let tasks = sqlx::query_as::<_, RoadmapTask>(
            "SELECT id, plan_id, day, title, completed FROM roadmap_tasks \
             WHERE plan_id = ? ORDER BY day ASC, rowid ASC",
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    /// Append a task on the day after the current last one.
    pub async fn add_task(&self, plan_id: &str, title: &str) -> DatabaseResult<CatchUpPlan> {
        let mut plan = self
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Catch-up plan"))?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO roadmap_tasks (id, plan_id, day, title, completed) \
             SELECT ?, ?, COALESCE(MAX(day), 0) + 1, ?, 0 FROM roadmap_tasks WHERE plan_id = ?",
        )
        .bind(cuid2::create_id())
        .bind(plan_id)
        .bind(title.trim())
        .bind(plan_id)
        .execute(&mut *tx)
        .await?;

        recount(&mut tx, &mut plan).await?;
        tx.commit().await?;

        self.find_by_id(plan_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Catch-up plan"))
    }

    /// Flip one task and recompute the plan's progress from the stored tasks.
    pub async fn toggle_task(&self, plan_id: &str, task_id: &str) -> DatabaseResult<CatchUpPlan> {
        let mut plan = self
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Catch-up plan"))?;

        if !plan.roadmap.iter().any(|task| task.id == task_id) {
            return Err(DatabaseError::not_found("Roadmap task"));
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE roadmap_tasks SET completed = NOT completed WHERE id = ? AND plan_id = ?")
            .bind(task_id)
            .bind(plan_id)
            .execute(&mut *tx)
            .await?;

        recount(&mut tx, &mut plan).await?;
        tx.commit().await?;

        info!(plan_id, task_id, progress = plan.progress, "roadmap task toggled");

        self.find_by_id(plan_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Catch-up plan"))
    }

    pub async fn delete(&self, id: &str) -> DatabaseResult<()> {
        let deleted = sqlx::query("DELETE FROM catch_up_plans WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DatabaseError::not_found("Catch-up plan"));
        }
        Ok(())
    }

    pub async fn count_in_progress(&self) -> DatabaseResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM catch_up_plans WHERE status = 'in_progress'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

async fn insert_task(
    tx: &mut Transaction<'_, Sqlite>,
    plan_id: &str,
    day: i64,
    title: &str,
) -> DatabaseResult<()> {
    sqlx::query("INSERT INTO roadmap_tasks (id, plan_id, day, title, completed) VALUES (?, ?, ?, ?, 0)")
        .bind(cuid2::create_id())
        .bind(plan_id)
        .bind(day)
        .bind(title)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Refresh the plan counters from the tasks visible to `tx` and store them.
async fn recount(tx: &mut Transaction<'_, Sqlite>, plan: &mut CatchUpPlan) -> DatabaseResult<()> {
    let (total, completed): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM roadmap_tasks WHERE plan_id = ?",
    )
    .bind(&plan.id)
    .fetch_one(&mut **tx)
    .await?;

    plan.total_tasks = total;
    plan.apply_completion(completed);
    store_counters(tx, plan).await
}

async fn store_counters(tx: &mut Transaction<'_, Sqlite>, plan: &CatchUpPlan) -> DatabaseResult<()> {
    sqlx::query(
        "UPDATE catch_up_plans SET total_tasks = ?, completed_tasks = ?, progress = ?, status = ?, \
         updated_at = ? WHERE id = ?",
    )
    .bind(plan.total_tasks)
    .bind(plan.completed_tasks)
    .bind(plan.progress)
    .bind(plan.status)
    .bind(Utc::now().to_rfc3339())
    .bind(&plan.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
