//! Persistence seam for users, attempts and skill progress.
//!
//! `AppState` carries an `Arc<dyn InterviewStore>`; production uses
//! `PgInterviewStore`, tests swap in an in-memory double.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::progress::{InterviewAttemptRow, NewAttempt, SkillProgressRow};
use crate::models::user::User;

pub mod postgres;

pub use postgres::PgInterviewStore;

#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Fails with `Conflict` when the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError>;

    /// Appends the attempt and upserts the skill counter in one transaction.
    /// `weak_observed` can set the weak flag but never clears it.
    async fn record_submission(
        &self,
        attempt: NewAttempt,
        skill: &str,
        weak_observed: bool,
    ) -> Result<SkillProgressRow, AppError>;

    async fn list_skills(&self, user_id: Uuid) -> Result<Vec<SkillProgressRow>, AppError>;

    async fn recent_attempts(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<InterviewAttemptRow>, AppError>;
}
