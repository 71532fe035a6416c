//! OpenAI Provider
//!
//! Chat Completions API. The request/response helpers are shared with the
//! browser-use backend, which speaks the same wire format.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::ProviderConfig;
use crate::core::{Message, NavigatorError, Result};
use crate::llm::provider::{check_status, endpoint, json_u32};
use crate::llm::traits::{GenerateOptions, LLMProvider, LLMResponse, TokenUsage};

pub struct OpenAIProvider {
    client: Client,
    config: ProviderConfig,
    model: String,
}

impl OpenAIProvider {
    pub fn new(client: Client, config: ProviderConfig, model: impl Into<String>) -> Self {
        Self {
            client,
            config,
            model: model.into(),
        }
    }
}

/// Build a chat-completions request body
pub(crate) fn build_body(model: &str, messages: &[Message], options: &GenerateOptions) -> Value {
    let messages: Vec<Value> = messages
        .iter()
        .map(|m| json!({ "role": m.role, "content": m.content }))
        .collect();

    let mut body = json!({
        "model": model,
        "messages": messages,
    });
    if let Some(temperature) = options.temperature {
        body["temperature"] = json!(temperature);
    }
    if let Some(max_tokens) = options.max_tokens {
        body["max_tokens"] = json!(max_tokens);
    }
    body
}

/// Extract content and usage from a chat-completions response
pub(crate) fn parse_response(provider: &str, model: &str, json: &Value) -> Result<LLMResponse> {
    let content = json["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| NavigatorError::provider(provider, "response has no message content"))?
        .to_string();

    let usage = json.get("usage").map(|u| TokenUsage {
        prompt_tokens: json_u32(&u["prompt_tokens"]),
        completion_tokens: json_u32(&u["completion_tokens"]),
        total_tokens: json_u32(&u["total_tokens"]),
    });

    Ok(LLMResponse {
        content,
        usage,
        model: json["model"].as_str().unwrap_or(model).to_string(),
    })
}

/// POST a chat-completions request with bearer auth
pub(crate) async fn complete(
    client: &Client,
    provider: &'static str,
    config: &ProviderConfig,
    model: &str,
    messages: &[Message],
    options: Option<GenerateOptions>,
) -> Result<LLMResponse> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or(NavigatorError::MissingApiKey(provider))?;
    let url = endpoint(&config.base_url, "v1/chat/completions")?;
    let body = build_body(model, messages, &options.unwrap_or_default());

    tracing::debug!(provider, model, %url, "sending chat completion");

    let resp = client
        .post(url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;
    let resp = check_status(provider, resp).await?;
    let json: Value = resp.json().await?;

    parse_response(provider, model, &json)
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn chat(
        &self,
        messages: &[Message],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        complete(
            &self.client,
            "openai",
            &self.config,
            &self.model,
            messages,
            options,
        )
        .await
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
