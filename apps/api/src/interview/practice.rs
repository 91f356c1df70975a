//! Fixed-topic practice: one-off question generation and answer analysis
//! without an adaptive session. Attempts are tracked under the topic label.

use tracing::info;

use crate::errors::AppError;
use crate::interview::service::InterviewService;
use crate::models::progress::NewAttempt;

/// Static-table key used when the caller gives no level.
const DEFAULT_LEVEL_KEY: &str = "intern";

#[derive(Debug, Clone)]
pub struct TopicQuestion<'a> {
    pub role: &'a str,
    pub kind: &'a str,
    pub topic: &'a str,
    pub difficulty: &'a str,
    pub level: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct TopicAnswer<'a> {
    pub role: &'a str,
    pub topic: &'a str,
    pub difficulty: &'a str,
    pub answer: &'a str,
}

impl InterviewService {
    pub async fn topic_question(&self, req: TopicQuestion<'_>) -> Result<String, AppError> {
        require("role", req.role)?;
        require("topic", req.topic)?;

        Ok(self
            .chain
            .generate_topic_question(
                req.role.trim(),
                req.kind.trim(),
                req.topic.trim(),
                req.difficulty.trim(),
                req.level.unwrap_or(DEFAULT_LEVEL_KEY),
            )
            .await)
    }

    /// Generates feedback and records the attempt against `topic`.
    pub async fn analyse_topic_answer(
        &self,
        user: &str,
        req: TopicAnswer<'_>,
    ) -> Result<String, AppError> {
        require("role", req.role)?;
        require("topic", req.topic)?;
        let account = self
            .store
            .find_user(user)
            .await?
            .ok_or(AppError::NotAuthenticated)?;

        let feedback = self
            .chain
            .generate_topic_feedback(req.role.trim(), req.answer)
            .await;
        let weak = self.policy.is_negative(&feedback);
        let topic = req.topic.trim();

        self.store
            .record_submission(
                NewAttempt {
                    user_id: account.id,
                    role: req.role.trim().to_string(),
                    topic: topic.to_string(),
                    difficulty: req.difficulty.trim().to_string(),
                    answer: req.answer.to_string(),
                    feedback: feedback.clone(),
                },
                topic,
                weak,
            )
            .await?;

        info!("Analysed {user}'s answer on '{topic}' (weak={weak})");
        Ok(feedback)
    }
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
