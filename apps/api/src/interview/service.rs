//! Interview orchestration.
//!
//! Flow per user: start, then any number of submits, with the session lock held across the whole
//! submit exchange, so two submissions for one user never interleave.
//!
//! Persistence happens before the session is advanced. If the write fails the
//! session still points at the same open question and the client can retry.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::interview::difficulty::{DifficultyPolicy, Level};
use crate::interview::session::{InterviewSession, SessionStore};
use crate::models::progress::{InterviewAttemptRow, NewAttempt, SkillProgressRow, AUTO_SKILL};
use crate::providers::ContentChain;
use crate::store::InterviewStore;

/// How many attempts the progress view shows.
const RECENT_ATTEMPTS: i64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub feedback: String,
    pub next_question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub username: String,
    pub skills: Vec<SkillProgressRow>,
    pub recent_attempts: Vec<InterviewAttemptRow>,
}

pub struct InterviewService {
    pub(crate) chain: ContentChain,
    pub(crate) policy: Arc<dyn DifficultyPolicy>,
    sessions: Arc<dyn SessionStore>,
    pub(crate) store: Arc<dyn InterviewStore>,
}

impl InterviewService {
    pub fn new(
        chain: ContentChain,
        policy: Arc<dyn DifficultyPolicy>,
        sessions: Arc<dyn SessionStore>,
        store: Arc<dyn InterviewStore>,
    ) -> Self {
        Self {
            chain,
            policy,
            sessions,
            store,
        }
    }

    /// Opens a fresh session, discarding any previous one, and returns the first question.
    pub async fn start(&self, user: &str, role: &str, level: Level) -> Result<String, AppError> {
        if user.trim().is_empty() {
            return Err(AppError::NotAuthenticated);
        }
        let role = role.trim();
        if role.is_empty() {
            return Err(AppError::Validation("role cannot be empty".to_string()));
        }
        self.store
            .find_user(user)
            .await?
            .ok_or(AppError::NotAuthenticated)?;

        let mut session = InterviewSession::new(role.to_string(), level);
        let question = self
            .chain
            .generate_question(role, level, session.difficulty)
            .await;
        session.push_question(question.clone());

        self.sessions.put(user, session);
        info!("Started interview for {user}: role='{role}', level={level}");

        Ok(question)
    }

    /// Answers the open question, adapts difficulty and issues the next question.
    pub async fn submit(&self, user: &str, answer: &str) -> Result<SubmitOutcome, AppError> {
        let handle = self.sessions.get(user).ok_or(AppError::NoActiveSession)?;
        let mut session = handle.lock().await;
        if session.history.is_empty() {
            return Err(AppError::NoActiveSession);
        }

        let account = self
            .store
            .find_user(user)
            .await?
            .ok_or(AppError::NotAuthenticated)?;

        let asked_at = session.difficulty;
        let feedback = self
            .chain
            .generate_feedback(&session.role, session.level, answer)
            .await;
        let weak = self.policy.is_negative(&feedback);
        let next_difficulty = self.policy.next_difficulty(asked_at, &feedback);
        let next_question = self
            .chain
            .generate_question(&session.role, session.level, next_difficulty)
            .await;

        self.store
            .record_submission(
                NewAttempt {
                    user_id: account.id,
                    role: session.role.clone(),
                    topic: AUTO_SKILL.to_string(),
                    difficulty: asked_at.to_string(),
                    answer: answer.to_string(),
                    feedback: feedback.clone(),
                },
                AUTO_SKILL,
                weak,
            )
            .await?;

        session.answer_current(answer);
        session.difficulty = next_difficulty;
        session.push_question(next_question.clone());
        session.round += 1;

        info!(
            "Round {} for {user}: {asked_at} -> {next_difficulty} (weak={weak})",
            session.round
        );

        Ok(SubmitOutcome {
            feedback,
            next_question,
        })
    }

    /// Generation tiers in priority order, ending with the static bank.
    pub fn provider_tiers(&self) -> Vec<&str> {
        let mut tiers = self.chain.tier_names();
        tiers.push("static");
        tiers
    }

    pub async fn snapshot(&self, user: &str) -> Result<InterviewSession, AppError> {
        let handle = self.sessions.get(user).ok_or(AppError::NoActiveSession)?;
        let session = handle.lock().await;
        Ok(session.clone())
    }

    /// Drops the user's session, if any.
    pub fn end(&self, user: &str) -> bool {
        let ended = self.sessions.delete(user).is_some();
        if ended {
            info!("Ended interview for {user}");
        }
        ended
    }

    pub async fn progress(&self, user: &str) -> Result<ProgressReport, AppError> {
        let account = self
            .store
            .find_user(user)
            .await?
            .ok_or(AppError::NotAuthenticated)?;

        let skills = self.store.list_skills(account.id).await?;
        let recent_attempts = self.store.recent_attempts(account.id, RECENT_ATTEMPTS).await?;

        Ok(ProgressReport {
            username: account.username,
            skills,
            recent_attempts,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::interview::difficulty::KeywordPolicy;
    use crate::interview::session::InMemorySessionStore;
    use crate::providers::test_support::StubGenerator;
    use crate::providers::Generator;
    use crate::store::test_support::MemoryStore;

    pub fn service(generators: Vec<Arc<StubGenerator>>, store: Arc<MemoryStore>) -> InterviewService {
        InterviewService::new(
            ContentChain::new(
                generators
                    .into_iter()
                    .map(|g| g as Arc<dyn Generator>)
                    .collect(),
            ),
            Arc::new(KeywordPolicy::default()),
            Arc::new(InMemorySessionStore::new()),
            store,
        )
    }
}
