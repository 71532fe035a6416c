//! browser-use Provider
//!
//! Hosted model tuned for browser tasks, served over an OpenAI-compatible
//! endpoint. The model is fixed by configuration; the command-line model name
//! is not used.

use async_trait::async_trait;
use reqwest::Client;

use crate::core::config::ProviderConfig;
use crate::core::{Message, Result};
use crate::llm::provider::openai;
use crate::llm::traits::{GenerateOptions, LLMProvider, LLMResponse};

const DEFAULT_MODEL: &str = "bu-latest";

pub struct BrowserUseProvider {
    client: Client,
    config: ProviderConfig,
    model: String,
}

impl BrowserUseProvider {
    pub fn new(client: Client, config: ProviderConfig) -> Self {
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self {
            client,
            config,
            model,
        }
    }
}

#[async_trait]
impl LLMProvider for BrowserUseProvider {
    async fn chat(
        &self,
        messages: &[Message],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        openai::complete(
            &self.client,
            "browser-use",
            &self.config,
            &self.model,
            messages,
            options,
        )
        .await
    }

    fn name(&self) -> &str {
        "browser-use"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
