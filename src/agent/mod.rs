//! Agent module - task execution
//!
//! Contains the browser agent step loop, its action protocol, and the
//! runtime seam the drivers are written against.

pub mod action;
pub mod loop_state;
pub mod orchestrator;
pub mod runtime;

pub use action::{parse_decision, AgentAction, AgentDecision};
pub use loop_state::{AgentLoopState, Observation};
pub use orchestrator::BrowserAgent;
pub use runtime::{AgentBrowserRuntime, AgentRuntime, TaskAgent};
