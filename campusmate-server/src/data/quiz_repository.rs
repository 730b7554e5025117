use crate::domain::error::DomainError;
use crate::domain::quiz::{NewQuizAttempt, QuizHistoryRecord};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// Append-only log of quiz attempts.
#[async_trait]
pub trait QuizHistoryRepository: Send + Sync {
    async fn append(&self, attempt: NewQuizAttempt) -> Result<QuizHistoryRecord, DomainError>;
    /// Oldest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<QuizHistoryRecord>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresQuizHistoryRepository {
    pool: PgPool,
}

impl PostgresQuizHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizHistoryRepository for PostgresQuizHistoryRepository {
    async fn append(&self, attempt: NewQuizAttempt) -> Result<QuizHistoryRecord, DomainError> {
        let record = sqlx::query_as::<_, QuizHistoryRecord>(
            r#"
            INSERT INTO quiz_history (user_id, topic, score, total_questions, percentage)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, topic, score, total_questions, percentage, created_at
            "#,
        )
        .bind(attempt.user_id)
        .bind(&attempt.topic)
        .bind(attempt.score)
        .bind(attempt.total_questions)
        .bind(attempt.percentage)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to store quiz result: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(
            record_id = record.id,
            user_id = %record.user_id,
            percentage = record.percentage,
            "quiz result stored"
        );
        Ok(record)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<QuizHistoryRecord>, DomainError> {
        sqlx::query_as::<_, QuizHistoryRecord>(
            r#"
            SELECT id, user_id, topic, score, total_questions, percentage, created_at
            FROM quiz_history
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching quiz history: {}", e);
            DomainError::Internal(e.to_string())
        })
    }
}
