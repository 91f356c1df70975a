use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::InterviewStore;
use crate::errors::AppError;
use crate::models::progress::{InterviewAttemptRow, NewAttempt, SkillProgressRow};
use crate::models::user::User;

/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => {
                info!("Created user {}", user.username);
                Ok(user)
            }
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(AppError::Conflict("User already exists!".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn record_submission(
        &self,
        attempt: NewAttempt,
        skill: &str,
        weak_observed: bool,
    ) -> Result<SkillProgressRow, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO interview_attempts
                (id, user_id, role, topic, difficulty, answer, feedback)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(attempt.user_id)
        .bind(&attempt.role)
        .bind(&attempt.topic)
        .bind(&attempt.difficulty)
        .bind(&attempt.answer)
        .bind(&attempt.feedback)
        .execute(&mut *tx)
        .await?;

        // Single-statement upsert: no check-then-insert window, weak is sticky.
        let progress = sqlx::query_as::<_, SkillProgressRow>(
            r#"
            INSERT INTO skill_progress (id, user_id, skill, attempts, weak)
            VALUES ($1, $2, $3, 1, $4)
            ON CONFLICT (user_id, skill) DO UPDATE
                SET attempts   = skill_progress.attempts + 1,
                    weak       = skill_progress.weak OR EXCLUDED.weak,
                    updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(attempt.user_id)
        .bind(skill)
        .bind(weak_observed)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Recorded attempt for user {} on skill '{}' (attempts={}, weak={})",
            attempt.user_id, progress.skill, progress.attempts, progress.weak
        );
        Ok(progress)
    }

    async fn list_skills(&self, user_id: Uuid) -> Result<Vec<SkillProgressRow>, AppError> {
        Ok(sqlx::query_as::<_, SkillProgressRow>(
            "SELECT * FROM skill_progress WHERE user_id = $1 ORDER BY skill ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn recent_attempts(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<InterviewAttemptRow>, AppError> {
        Ok(sqlx::query_as::<_, InterviewAttemptRow>(
            r#"
            SELECT * FROM interview_attempts
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }
}
