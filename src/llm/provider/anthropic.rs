//! Anthropic Provider
//!
//! Messages API. System messages are hoisted into the top-level `system`
//! field; the API rejects them inside `messages`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::ProviderConfig;
use crate::core::{Message, NavigatorError, Result};
use crate::llm::provider::{check_status, endpoint, json_u32};
use crate::llm::traits::{GenerateOptions, LLMProvider, LLMResponse, TokenUsage};

const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

pub struct AnthropicProvider {
    client: Client,
    config: ProviderConfig,
    model: String,
}

impl AnthropicProvider {
    pub fn new(client: Client, config: ProviderConfig, model: impl Into<String>) -> Self {
        Self {
            client,
            config,
            model: model.into(),
        }
    }

    fn build_body(&self, messages: &[Message], options: &GenerateOptions) -> Value {
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.is_system())
            .map(|m| m.content.as_str())
            .collect();

        let turns: Vec<Value> = messages
            .iter()
            .filter(|m| !m.is_system())
            .map(|m| json!({ "role": m.role, "content": m.content }))
            .collect();

        let mut body = json!({
            "model": self.model,
            "messages": turns,
            "max_tokens": options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        });
        if !system.is_empty() {
            body["system"] = json!(system.join("\n\n"));
        }
        if let Some(temperature) = options.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    fn parse_response(&self, json: &Value) -> Result<LLMResponse> {
        let blocks = json["content"]
            .as_array()
            .ok_or_else(|| NavigatorError::provider("anthropic", "response has no content"))?;

        let content: String = blocks
            .iter()
            .filter(|b| b["type"] == "text")
            .filter_map(|b| b["text"].as_str())
            .collect();

        let usage = json.get("usage").map(|u| {
            TokenUsage::new(json_u32(&u["input_tokens"]), json_u32(&u["output_tokens"]))
        });

        Ok(LLMResponse {
            content,
            usage,
            model: json["model"].as_str().unwrap_or(self.model.as_str()).to_string(),
        })
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn chat(
        &self,
        messages: &[Message],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NavigatorError::MissingApiKey("anthropic"))?;
        let url = endpoint(&self.config.base_url, "v1/messages")?;
        let body = self.build_body(messages, &options.unwrap_or_default());

        tracing::debug!(model = %self.model, %url, "sending anthropic message");

        let resp = self
            .client
            .post(url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        let resp = check_status("anthropic", resp).await?;
        let json: Value = resp.json().await?;

        self.parse_response(&json)
    }

    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
