use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{absorb, Generator, ProviderError};

/// Local inference tier backed by an Ollama-compatible `/api/generate` endpoint.
#[derive(Clone)]
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaGenerator {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
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

        let body: GenerateResponse = response.json().await?;
        if body.response.trim().is_empty() {
            return Err(ProviderError::EmptyContent);
        }

        debug!(model = %self.model, "ollama generation succeeded");
        Ok(body.response)
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn attempt(&self, prompt: &str) -> Option<String> {
        absorb(self.name(), self.generate(prompt).await)
    }
}
