//! Question and feedback generation across tiers. Every prompt the
//! service sends goes through `ContentChain`.
//!
//! Tiers are tried in order (local Ollama, cloud Gemini) and the first
//! non-blank answer wins. When every tier declines, the static bank in
//! `fallback` answers. Callers always get a string back.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::interview::difficulty::{Difficulty, Level};

pub mod fallback;
pub mod gemini;
pub mod ollama;
pub mod prompts;

pub use gemini::GeminiGenerator;
pub use ollama::OllamaGenerator;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("provider returned empty content")]
    EmptyContent,
}

/// One tier of the chain.
#[async_trait]
pub trait Generator: Send + Sync {
    fn name(&self) -> &str;

    /// `None` means "try the next tier". Implementations swallow their own errors.
    async fn attempt(&self, prompt: &str) -> Option<String>;
}

/// Converts a tier result into the chain's `Option`, logging the failure.
pub(crate) fn absorb(tier: &str, result: Result<String, ProviderError>) -> Option<String> {
    match result {
        Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Ok(_) => {
            warn!(tier, "provider returned blank text, falling through");
            None
        }
        Err(e) => {
            warn!(tier, error = %e, "provider failed, falling through");
            None
        }
    }
}

#[derive(Clone, Default)]
pub struct ContentChain {
    generators: Vec<Arc<dyn Generator>>,
}

impl ContentChain {
    pub fn new(generators: Vec<Arc<dyn Generator>>) -> Self {
        Self { generators }
    }

    /// Local tier always, cloud tier only when an API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut generators: Vec<Arc<dyn Generator>> = vec![Arc::new(OllamaGenerator::new(
            config.ollama_base_url.clone(),
            config.ollama_model.clone(),
            Duration::from_secs(config.ollama_timeout_secs),
        )?)];

        match &config.gemini_api_key {
            Some(key) => generators.push(Arc::new(GeminiGenerator::new(
                key.clone(),
                config.gemini_model.clone(),
                Duration::from_secs(config.gemini_timeout_secs),
            )?)),
            None => info!("GEMINI_API_KEY not set, cloud tier disabled"),
        }

        Ok(Self::new(generators))
    }

    pub fn tier_names(&self) -> Vec<&str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    async fn first_answer(&self, prompt: &str) -> Option<String> {
        for generator in &self.generators {
            if let Some(text) = generator.attempt(prompt).await {
                let text = text.trim();
                if !text.is_empty() {
                    debug!(tier = generator.name(), "provider answered");
                    return Some(text.to_string());
                }
            }
        }
        None
    }

    pub async fn generate_question(&self, role: &str, level: Level, difficulty: Difficulty) -> String {
        let prompt = prompts::question_prompt(role, level, difficulty);
        match self.first_answer(&prompt).await {
            Some(question) => question,
            None => {
                warn!(%level, "all providers failed, serving static question");
                fallback::question(level.as_str()).to_string()
            }
        }
    }

    pub async fn generate_feedback(&self, role: &str, level: Level, answer: &str) -> String {
        let prompt = prompts::feedback_prompt(role, level, answer);
        self.first_answer(&prompt).await.unwrap_or_else(|| {
            warn!("all providers failed, serving static feedback");
            fallback::FEEDBACK.to_string()
        })
    }

    /// Fixed-topic flow. `level_key` only selects the static table.
    pub async fn generate_topic_question(
        &self,
        role: &str,
        kind: &str,
        topic: &str,
        difficulty: &str,
        level_key: &str,
    ) -> String {
        let prompt = prompts::topic_question_prompt(role, kind, topic, difficulty);
        match self.first_answer(&prompt).await {
            Some(question) => question,
            None => {
                warn!(topic, "all providers failed, serving static question");
                fallback::question(level_key).to_string()
            }
        }
    }

    pub async fn generate_topic_feedback(&self, role: &str, answer: &str) -> String {
        let prompt = prompts::topic_feedback_prompt(role, answer);
        self.first_answer(&prompt).await.unwrap_or_else(|| {
            warn!("all providers failed, serving static feedback");
            fallback::FEEDBACK.to_string()
        })
    }
}
