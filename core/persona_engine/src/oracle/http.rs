use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use shared_types::ProviderConfig;
use std::time::Duration;

use super::{ImageAnalyzer, ImageInput, TextGenerator, ANALYSIS_PROMPT};
use crate::error::{EngineError, EngineResult};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Client for any OpenAI-compatible `/chat/completions` endpoint
/// (OpenRouter, Gemini's compatibility layer, Ollama, LM Studio, OpenAI).
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    vision_model: String,
    timeout_secs: u64,
}

fn is_placeholder(key: &str) -> bool {
    let key = key.trim();
    key.starts_with("{{") && key.ends_with("}}")
}

impl OpenAiCompatClient {
    /// Fails on an api key that is still an unsubstituted `{{VAR}}` placeholder.
    pub fn from_provider(provider: &ProviderConfig, timeout_secs: u64) -> EngineResult<Self> {
        let api_key = provider.api_key.clone().filter(|k| !k.trim().is_empty());
        if let Some(key) = api_key.as_deref().filter(|k| is_placeholder(k)) {
            return Err(EngineError::Config(format!(
                "api_key {key} was not substituted, set that environment variable"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EngineError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: provider
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            model: provider.model_name.clone(),
            vision_model: provider.vision_model().to_string(),
            timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn chat_completion(&self, model: &str, content: Value) -> EngineResult<String> {
        let body = json!({
            "model": model,
            "messages": [
                {"role": "user", "content": content}
            ]
        });

        let mut request = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            // OpenRouter attribution headers, ignored elsewhere
            .header("HTTP-Referer", "http://localhost")
            .header("X-Title", "Object Persona Engine");
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let res = request.json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout(self.timeout_secs)
            } else {
                EngineError::OracleUnavailable(format!("request failed: {e}"))
            }
        })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(EngineError::OracleUnavailable(format!("API error {status}: {text}")));
        }

        let json: Value = res
            .json()
            .await
            .map_err(|e| EngineError::MalformedOracleResponse(format!("failed to parse JSON: {e}")))?;

        extract_content(&json)
    }
}

fn extract_content(json: &Value) -> EngineResult<String> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| EngineError::MalformedOracleResponse("no content in response".to_string()))
}

fn user_content(prompt: &str, image: Option<&ImageInput>) -> Value {
    match image {
        Some(image) => json!([
            {"type": "text", "text": prompt},
            {"type": "image_url", "image_url": {"url": image.data_url()}}
        ]),
        None => Value::String(prompt.to_string()),
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatClient {
    async fn generate(&self, prompt: &str, image: Option<&ImageInput>) -> EngineResult<String> {
        let model = if image.is_some() { &self.vision_model } else { &self.model };
        self.chat_completion(model, user_content(prompt, image)).await
    }
}

#[async_trait]
impl ImageAnalyzer for OpenAiCompatClient {
    async fn analyze(&self, image: &ImageInput) -> EngineResult<String> {
        self.chat_completion(&self.vision_model, user_content(ANALYSIS_PROMPT, Some(image)))
            .await
    }
}
