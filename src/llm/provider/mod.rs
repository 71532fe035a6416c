//! LLM provider implementations and the backend selector
//!
//! `ProviderKind` is the closed set of backends a provider tag can name.
//! Unknown tags fall back to the browser-use backend.

pub mod anthropic;
pub mod browser_use;
pub mod google;
pub mod openai;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::{Config, NavigatorError, Result};
use crate::llm::traits::LLMProvider;

use self::anthropic::AnthropicProvider;
use self::browser_use::BrowserUseProvider;
use self::google::GoogleProvider;
use self::openai::OpenAIProvider;

/// Backend family selected by a provider tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Hosted browser-use model; also the fallback for unknown tags
    #[default]
    BrowserUse,
    Google,
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
}

impl ProviderKind {
    /// Resolve a provider tag. Matching ignores case and surrounding
    /// whitespace; anything unrecognised selects `BrowserUse`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "google" => Self::Google,
            "openai" => Self::OpenAI,
            "anthropic" => Self::Anthropic,
            "browser-use" => Self::BrowserUse,
            other => {
                if !other.is_empty() {
                    tracing::debug!(tag = other, "unknown provider tag, using browser-use");
                }
                Self::BrowserUse
            }
        }
    }

    /// Canonical tag for this backend
    pub fn tag(&self) -> &'static str {
        match self {
            Self::BrowserUse => "browser-use",
            Self::Google => "google",
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Create the provider for `kind`, bound to `model`
pub fn create_provider(kind: ProviderKind, model: &str, config: &Config) -> Arc<dyn LLMProvider> {
    let client = http_client(config);
    match kind {
        ProviderKind::Google => Arc::new(GoogleProvider::new(
            client,
            config.providers.google.clone(),
            model,
        )),
        ProviderKind::OpenAI => Arc::new(OpenAIProvider::new(
            client,
            config.providers.openai.clone(),
            model,
        )),
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(
            client,
            config.providers.anthropic.clone(),
            model,
        )),
        // The browser-use backend serves a fixed model
        ProviderKind::BrowserUse => Arc::new(BrowserUseProvider::new(
            client,
            config.providers.browser_use.clone(),
        )),
    }
}

/// Resolve a provider tag and model name to an LLM handle
pub fn select_llm(tag: &str, model: &str, config: &Config) -> Arc<dyn LLMProvider> {
    let kind = ProviderKind::from_tag(tag);
    let llm = create_provider(kind, model, config);
    tracing::info!(provider = %kind, model = llm.model(), "selected LLM backend");
    llm
}

fn http_client(config: &Config) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .build()
        .unwrap_or_default()
}

/// Join an API path onto a configured base URL
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let mut base = base_url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?.join(path.trim_start_matches('/'))?)
}

/// Turn a non-success response into a provider error carrying the body
pub(crate) async fn check_status(provider: &str, resp: Response) -> Result<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let error_text = resp.text().await.unwrap_or_default();
    Err(NavigatorError::provider(
        provider,
        format!("{}: {}", status, error_text),
    ))
}

/// Read a u32 counter out of a JSON usage block, saturating on overflow
pub(crate) fn json_u32(value: &serde_json::Value) -> u32 {
    value
        .as_u64()
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}
