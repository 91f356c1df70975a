use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::interview::difficulty::Level;
use crate::interview::practice::{TopicAnswer, TopicQuestion};
use crate::interview::service::{ProgressReport, SubmitOutcome};
use crate::interview::session::InterviewSession;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartForm {
    pub role: String,
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct TopicQuestionForm {
    pub role: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub topic: String,
    pub difficulty: String,
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopicAnswerForm {
    pub role: String,
    pub topic: String,
    pub difficulty: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Adaptive interview
// ────────────────────────────────────────────────────────────────────────────

/// POST /start_interview/
pub async fn handle_start_interview(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<StartForm>,
) -> Result<Json<QuestionResponse>, AppError> {
    let level: Level = form.level.parse()?;
    let question = state.interviews.start(&user, &form.role, level).await?;
    Ok(Json(QuestionResponse { question }))
}

/// POST /submit_answer/
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<AnswerForm>,
) -> Result<Json<SubmitOutcome>, AppError> {
    let outcome = state.interviews.submit(&user, &form.answer).await?;
    Ok(Json(outcome))
}

/// GET /session/
pub async fn handle_get_session(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<InterviewSession>, AppError> {
    Ok(Json(state.interviews.snapshot(&user).await?))
}

/// GET /progress
pub async fn handle_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ProgressReport>, AppError> {
    Ok(Json(state.interviews.progress(&user).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Fixed-topic practice
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate_question/
pub async fn handle_generate_question(
    State(state): State<AppState>,
    Form(form): Form<TopicQuestionForm>,
) -> Result<Json<QuestionResponse>, AppError> {
    let question = state
        .interviews
        .topic_question(TopicQuestion {
            role: &form.role,
            kind: &form.kind,
            topic: &form.topic,
            difficulty: &form.difficulty,
            level: form.level.as_deref(),
        })
        .await?;
    Ok(Json(QuestionResponse { question }))
}

/// POST /analyse_answer/
pub async fn handle_analyse_answer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<TopicAnswerForm>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let feedback = state
        .interviews
        .analyse_topic_answer(
            &user,
            TopicAnswer {
                role: &form.role,
                topic: &form.topic,
                difficulty: &form.difficulty,
                answer: &form.answer,
            },
        )
        .await?;
    Ok(Json(FeedbackResponse { feedback }))
}
