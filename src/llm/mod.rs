//! LLM module - Language Model integrations
//!
//! Provides the provider abstraction and the backend selector.

pub mod provider;
pub mod traits;

pub use provider::{create_provider, select_llm, ProviderKind};
pub use traits::{GenerateOptions, LLMProvider, LLMResponse, TokenUsage};
