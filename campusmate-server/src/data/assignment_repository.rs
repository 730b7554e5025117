use crate::domain::assignment::{Assignment, AssignmentUpdate};
use crate::domain::error::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// Every lookup is keyed by both the assignment id and the owner id, so a
/// record owned by somebody else looks exactly like a missing one.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn create(&self, assignment: Assignment) -> Result<Assignment, DomainError>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Assignment>, DomainError>;
    async fn find(&self, id: Uuid, user_id: Uuid) -> Result<Option<Assignment>, DomainError>;
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: AssignmentUpdate,
    ) -> Result<Option<Assignment>, DomainError>;
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError>;
}

#[derive(sqlx::FromRow)]
struct AssignmentRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    course: String,
    status: String,
    score: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = DomainError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Assignment {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            course: row.course,
            status: row.status.parse().map_err(DomainError::Internal)?,
            score: row.score,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> Result<Assignment, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO assignments (id, user_id, title, course, status, score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(assignment.id)
        .bind(assignment.user_id)
        .bind(&assignment.title)
        .bind(&assignment.course)
        .bind(assignment.status.as_str())
        .bind(&assignment.score)
        .bind(assignment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create assignment: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(assignment_id = %assignment.id, user_id = %assignment.user_id, "assignment created");
        Ok(assignment)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Assignment>, DomainError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, user_id, title, course, status, score, created_at
            FROM assignments
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing assignments: {}", e);
            DomainError::Internal(e.to_string())
        })?;

        rows.into_iter().map(Assignment::try_from).collect()
    }

    async fn find(&self, id: Uuid, user_id: Uuid) -> Result<Option<Assignment>, DomainError> {
        sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, user_id, title, course, status, score, created_at
            FROM assignments WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find assignment {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?
        .map(Assignment::try_from)
        .transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: AssignmentUpdate,
    ) -> Result<Option<Assignment>, DomainError> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            UPDATE assignments
            SET
                title = COALESCE($1, title),
                course = COALESCE($2, course),
                status = COALESCE($3, status),
                score = COALESCE($4, score)
            WHERE id = $5 AND user_id = $6
            RETURNING id, user_id, title, course, status, score, created_at
            "#,
        )
        .bind(update.title)
        .bind(update.course)
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.score.map(|s| crate::domain::assignment::normalize_score(Some(s))))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update assignment {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        if row.is_some() {
            info!(assignment_id = %id, "assignment updated");
        }

        row.map(Assignment::try_from).transpose()
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM assignments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(assignment_id = %id, "assignment deleted");
        }
        Ok(removed)
    }
}
