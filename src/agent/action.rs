//! Action protocol between the model and the agent loop
//!
//! The model answers every step with one JSON object:
//! `{"thought": "...", "action": "<name>", ...arguments}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::browser::ScrollDirection;
use crate::core::{NavigatorError, Result};

/// Longest pause a `wait` action may request
pub const MAX_WAIT_SECS: u64 = 10;

/// One browser action chosen by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AgentAction {
    Navigate {
        url: String,
    },
    Click {
        #[serde(rename = "ref")]
        ref_id: String,
    },
    Fill {
        #[serde(rename = "ref")]
        ref_id: String,
        text: String,
    },
    Press {
        key: String,
    },
    Scroll {
        direction: ScrollDirection,
        #[serde(default)]
        pixels: Option<u32>,
    },
    GetText {
        #[serde(rename = "ref")]
        ref_id: String,
    },
    Wait {
        #[serde(default = "default_wait_secs")]
        seconds: u64,
    },
    Done {
        text: String,
        #[serde(default = "default_success")]
        success: bool,
    },
}

fn default_wait_secs() -> u64 {
    2
}

fn default_success() -> bool {
    true
}

impl AgentAction {
    /// Action name as used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            AgentAction::Navigate { .. } => "navigate",
            AgentAction::Click { .. } => "click",
            AgentAction::Fill { .. } => "fill",
            AgentAction::Press { .. } => "press",
            AgentAction::Scroll { .. } => "scroll",
            AgentAction::GetText { .. } => "get_text",
            AgentAction::Wait { .. } => "wait",
            AgentAction::Done { .. } => "done",
        }
    }
}

/// A parsed model reply
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDecision {
    pub thought: String,
    pub action: AgentAction,
}

/// Locate the JSON object in a reply that may carry prose or code fences
fn extract_json(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (start < end).then(|| &content[start..=end])
}

/// Parse one decision out of a model reply
pub fn parse_decision(content: &str) -> Result<AgentDecision> {
    let raw = extract_json(content)
        .ok_or_else(|| NavigatorError::agent("reply did not contain a JSON object"))?;

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| NavigatorError::agent(format!("reply is not valid JSON: {}", e)))?;

    let thought = value
        .get("thought")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let action: AgentAction = serde_json::from_value(value)
        .map_err(|e| NavigatorError::agent(format!("invalid action: {}", e)))?;

    Ok(AgentDecision { thought, action })
}
