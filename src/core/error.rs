//! Custom error types for Navigator
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Navigator operations
#[derive(Error, Debug)]
pub enum NavigatorError {
    /// LLM backend returned an error response
    #[error("{provider} API error: {message}")]
    Provider { provider: String, message: String },

    /// LLM backend called without credentials
    #[error("{0} API key not set")]
    MissingApiKey(&'static str),

    /// Browser automation errors
    #[error("Browser error: {0}")]
    Browser(String),

    /// Agent loop errors (bad decisions, unknown actions)
    #[error("Agent error: {0}")]
    Agent(String),

    /// Agent gave up after too many consecutive failed steps
    #[error("Agent stopped after {0} consecutive failures")]
    TooManyFailures(usize),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing errors
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Agent-browser not installed
    #[error("agent-browser not found. Install with: npm install -g agent-browser && agent-browser install")]
    AgentBrowserNotFound,

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Convenience Result type for Navigator operations
pub type Result<T> = std::result::Result<T, NavigatorError>;

impl NavigatorError {
    /// Create a provider error
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: msg.into(),
        }
    }

    /// Create a browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Create an agent error
    pub fn agent(msg: impl Into<String>) -> Self {
        Self::Agent(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap an error with additional context
    pub fn with_context<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(error),
        }
    }
}
