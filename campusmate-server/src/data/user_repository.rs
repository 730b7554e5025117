use crate::domain::error::DomainError;
use crate::domain::user::{ProfileUpdate, User};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> Result<User, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<User>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, major, group_name, gpa, study_goal, \
                            weak_subjects, study_hours_per_week, created_at";

fn is_email_conflict(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| {
            db.is_unique_violation()
                || db.constraint().map(|c| c.contains("users_email")) == Some(true)
        })
        .unwrap_or(false)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, major, group_name, gpa,
                               study_goal, weak_subjects, study_hours_per_week, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {USER_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.major)
            .bind(&user.group)
            .bind(user.gpa)
            .bind(&user.study_goal)
            .bind(&user.weak_subjects)
            .bind(user.study_hours_per_week)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_email_conflict(&e) {
                    DomainError::UserAlreadyExists
                } else {
                    error!("failed to create user: {}", e);
                    DomainError::Internal(format!("database error: {}", e))
                }
            })?;

        info!(user_id = %created.id, "user created");
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to find user by email: {}", e);
                DomainError::Internal(format!("database error: {}", e))
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to find user by id {}: {}", id, e);
                DomainError::Internal(format!("database error: {}", e))
            })
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<User>, DomainError> {
        // Read-modify-write inside one transaction; dropping `tx` on an early
        // return rolls it back.
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        let Some(mut user) = sqlx::query_as::<_, User>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        user.apply(update);

        let update_sql = format!(
            r#"
            UPDATE users
            SET name = $1, major = $2, group_name = $3, gpa = $4, study_goal = $5,
                weak_subjects = $6, study_hours_per_week = $7
            WHERE id = $8
            RETURNING {USER_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, User>(&update_sql)
            .bind(&user.name)
            .bind(&user.major)
            .bind(&user.group)
            .bind(user.gpa)
            .bind(&user.study_goal)
            .bind(&user.weak_subjects)
            .bind(user.study_hours_per_week)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("failed to update user {}: {}", id, e);
                DomainError::Internal(format!("database error: {}", e))
            })?;

        tx.commit().await?;

        info!(user_id = %id, "profile updated");
        Ok(Some(updated))
    }
}
