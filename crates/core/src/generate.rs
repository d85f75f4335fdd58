use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::Settings,
    error::{Result, TubenotesError},
    provider::Provider,
};

/// Boundary to the hosted text model. One prompt in, generated text out.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Client for OpenAI-compatible `chat/completions` endpoints.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    provider: Provider,
    model: String,
    api_key: String,
}

impl ChatCompletionsClient {
    pub fn new(provider: Provider, model: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            provider,
            model,
            api_key,
        })
    }

    /// Build from settings, reading the provider's key from the environment.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.provider.validate_api_key()?;
        Self::new(
            settings.provider,
            settings.model(),
            api_key,
            settings.request_timeout,
        )
    }
}

#[async_trait]
impl Generator for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let config = self.provider.config();
        debug!(
            provider = self.provider.name(),
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "requesting generation"
        );

        let response = self
            .client
            .post(config.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt,
                    },
                ],
                "temperature": 0.3,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TubenotesError::GenerationFailed {
                reason: format!("{} returned HTTP {}: {}", self.provider.name(), status, body),
            });
        }

        let response = response.json::<serde_json::Value>().await?;
        extract_content(&response)
    }
}

pub(crate) fn extract_content(response: &serde_json::Value) -> Result<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| TubenotesError::GenerationFailed {
            reason: format!("Invalid API response: {:?}", response),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_choice_content() {
        let response = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "- point one" } }]
        });
        assert_eq!(extract_content(&response).unwrap(), "- point one");
    }

    #[test]
    fn missing_content_is_a_generation_failure() {
        let response = serde_json::json!({ "error": { "message": "quota exceeded" } });
        assert!(matches!(
            extract_content(&response),
            Err(TubenotesError::GenerationFailed { .. })
        ));
    }
}
