use async_trait::async_trait;
use omni_shared::config::AssistSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::AssistError;
use crate::generator::{GenerationRequest, TextGenerator};

/// Gemini `generateContent` client.
///
/// The API key is looked up in the environment on every call so a rotated key
/// takes effect without a restart.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    settings: AssistSettings,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

// Response Structures
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

impl GeminiClient {
    pub fn new(settings: AssistSettings) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(settings.timeout_seconds))
                .build()
                .unwrap_or_else(|_| Client::new()),
            settings,
        }
    }

    fn api_key(&self) -> Result<String, AssistError> {
        std::env::var(&self.settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AssistError::MissingApiKey(self.settings.api_key_env.clone()))
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AssistError> {
        let api_key = self.api_key()?;
        let url = self.endpoint(&request.model);

        let body = GenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: request.prompt }],
            }],
            generation_config: request.temperature.map(|temperature| GenerationConfig { temperature }),
        };

        debug!("Gemini generateContent: model={}", request.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(AssistError::Api { status, body: text });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistError::Parse(e.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|part| part.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AssistError::EmptyResponse);
        }
        Ok(text)
    }
}
