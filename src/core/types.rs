//! Shared types used across Navigator modules

use serde::{Deserialize, Serialize};

/// A message in an LLM conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (user, assistant, system)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Whether this is a system message
    pub fn is_system(&self) -> bool {
        self.role == "system"
    }
}

/// Result of a finished agent run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentOutcome {
    /// Text the agent reported with its `done` action
    pub final_result: Option<String>,
    /// Whether the agent reported success
    pub success: bool,
    /// Number of steps taken
    pub steps: usize,
}
