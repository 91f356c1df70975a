use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{absorb, Generator, ProviderError};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Cloud inference tier (Gemini `generateContent`).
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

impl GeminiGenerator {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, ProviderError> {
        Self::with_base_url(GEMINI_API_URL.to_string(), api_key, model, timeout)
    }

    pub fn with_base_url(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GeminiRequest {
                contents: vec![GeminiContent {
                    parts: vec![GeminiPart { text: prompt }],
                }],
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: GeminiResponse = response.json().await?;
        let text = body
            .text()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ProviderError::EmptyContent)?;

        debug!(model = %self.model, "gemini generation succeeded");
        Ok(text.to_string())
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn attempt(&self, prompt: &str) -> Option<String> {
        absorb(self.name(), self.generate(prompt).await)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::providers::test_support::serve;

    fn generator(base_url: String) -> GeminiGenerator {
        GeminiGenerator::with_base_url(
            base_url,
            "test-key".into(),
            "gemini-2.0-flash".into(),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_sends_key_and_prompt_and_reads_first_part() {
        let router = Router::new().route(
            "/models/:call",
            post(
                |Path(call): Path<String>,
                 Query(q): Query<HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    assert_eq!(call, "gemini-2.0-flash:generateContent");
                    assert_eq!(q.get("key").map(String::as_str), Some("test-key"));
                    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap().to_string();
                    Json(json!({
                        "candidates": [
                            { "content": { "parts": [ { "text": format!("echo {prompt}") }, { "text": "ignored" } ] } }
                        ]
                    }))
                },
            ),
        );
        let base = serve(router).await;

        assert_eq!(generator(base).attempt("hi").await.as_deref(), Some("echo hi"));
    }

    #[tokio::test]
    async fn test_no_candidates_is_absorbed() {
        let router = Router::new().route(
            "/models/:call",
            post(|| async { Json(json!({ "candidates": [] })) }),
        );
        let base = serve(router).await;

        let g = generator(base);
        assert!(matches!(g.generate("x").await, Err(ProviderError::EmptyContent)));
        assert_eq!(g.attempt("x").await, None);
    }

    #[tokio::test]
    async fn test_bad_key_is_absorbed() {
        let router = Router::new().route(
            "/models/:call",
            post(|| async { (StatusCode::FORBIDDEN, "API key not valid") }),
        );
        let base = serve(router).await;

        assert_eq!(generator(base).attempt("x").await, None);
    }

    #[test]
    fn test_response_text_handles_missing_content() {
        let parsed: GeminiResponse =
            serde_json::from_value(json!({ "candidates": [ { "finishReason": "SAFETY" } ] })).unwrap();
        assert_eq!(parsed.text(), None);
    }
}
