//! Google Gemini Provider
//!
//! `generateContent` on the Generative Language API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::ProviderConfig;
use crate::core::{Message, NavigatorError, Result};
use crate::llm::provider::{check_status, endpoint, json_u32};
use crate::llm::traits::{GenerateOptions, LLMProvider, LLMResponse, TokenUsage};

pub struct GoogleProvider {
    client: Client,
    config: ProviderConfig,
    model: String,
}

impl GoogleProvider {
    pub fn new(client: Client, config: ProviderConfig, model: impl Into<String>) -> Self {
        Self {
            client,
            config,
            model: model.into(),
        }
    }

    fn build_body(messages: &[Message], options: &GenerateOptions) -> Value {
        let system: Vec<Value> = messages
            .iter()
            .filter(|m| m.is_system())
            .map(|m| json!({ "text": m.content }))
            .collect();

        // Gemini only knows "user" and "model"
        let contents: Vec<Value> = messages
            .iter()
            .filter(|m| !m.is_system())
            .map(|m| {
                json!({
                    "role": if m.role == "user" { "user" } else { "model" },
                    "parts": [{ "text": m.content }]
                })
            })
            .collect();

        let mut generation_config = json!({ "candidateCount": 1 });
        if let Some(temperature) = options.temperature {
            generation_config["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = options.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }

        let mut body = json!({
            "contents": contents,
            "generationConfig": generation_config,
        });
        if !system.is_empty() {
            body["systemInstruction"] = json!({ "parts": system });
        }
        body
    }

    fn parse_response(&self, json: &Value) -> Result<LLMResponse> {
        let parts = json["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| {
                let reason = json["promptFeedback"]["blockReason"]
                    .as_str()
                    .unwrap_or("no candidates returned");
                NavigatorError::provider("google", reason)
            })?;

        let content: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();

        let usage = json.get("usageMetadata").map(|u| TokenUsage {
            prompt_tokens: json_u32(&u["promptTokenCount"]),
            completion_tokens: json_u32(&u["candidatesTokenCount"]),
            total_tokens: json_u32(&u["totalTokenCount"]),
        });

        Ok(LLMResponse {
            content,
            usage,
            model: self.model.clone(),
        })
    }
}

#[async_trait]
impl LLMProvider for GoogleProvider {
    async fn chat(
        &self,
        messages: &[Message],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NavigatorError::MissingApiKey("google"))?;
        let path = format!("v1beta/models/{}:generateContent", self.model);
        let url = endpoint(&self.config.base_url, &path)?;
        let body = Self::build_body(messages, &options.unwrap_or_default());

        tracing::debug!(model = %self.model, %url, "sending gemini request");

        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_status("google", resp).await?;
        let json: Value = resp.json().await?;

        self.parse_response(&json)
    }

    fn name(&self) -> &str {
        "google"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
