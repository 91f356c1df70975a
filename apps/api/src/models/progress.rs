use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Skill label used by the adaptive interview flow.
pub const AUTO_SKILL: &str = "auto";

/// Per-user counter for one skill label. `weak` only ever flips to true.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillProgressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill: String,
    pub attempts: i32,
    pub weak: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewAttemptRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub topic: String,
    pub difficulty: String,
    pub answer: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

/// An attempt about to be written; ids and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub user_id: Uuid,
    pub role: String,
    pub topic: String,
    pub difficulty: String,
    pub answer: String,
    pub feedback: String,
}
