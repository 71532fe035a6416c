//! Agent loop state management
//!
//! Tracks the observe/act loop: step count, failure streak, observations and
//! the final answer.

use serde::{Deserialize, Serialize};

/// How many recent observations are replayed to the model
const HISTORY_WINDOW: usize = 10;

/// State of the agent step loop
#[derive(Debug, Clone)]
pub struct AgentLoopState {
    /// Steps completed so far
    pub step: usize,
    /// Maximum allowed steps
    pub max_steps: usize,
    /// Failed steps in a row
    pub consecutive_failures: usize,
    /// Observations collected from executed actions
    pub observations: Vec<Observation>,
    /// Final answer and success flag once the model reports `done`
    pub final_result: Option<(String, bool)>,
}

impl AgentLoopState {
    /// Create a new loop state with the given max steps
    pub fn new(max_steps: usize) -> Self {
        Self {
            step: 0,
            max_steps,
            consecutive_failures: 0,
            observations: Vec::new(),
            final_result: None,
        }
    }

    /// Check if the loop should continue
    pub fn should_continue(&self) -> bool {
        self.step < self.max_steps && self.final_result.is_none()
    }

    /// Record the outcome of one step and advance
    pub fn complete_step(&mut self, observation: Observation) {
        if observation.success {
            self.consecutive_failures = 0;
        } else {
            self.consecutive_failures += 1;
        }
        self.observations.push(observation);
        self.step += 1;
    }

    /// Record the model's final answer
    pub fn finish(&mut self, text: String, success: bool) {
        self.final_result = Some((text, success));
        self.step += 1;
    }

    /// Format recent observations for inclusion in the next prompt
    pub fn format_observations(&self) -> String {
        if self.observations.is_empty() {
            return String::new();
        }

        let skip = self.observations.len().saturating_sub(HISTORY_WINDOW);
        let mut output = String::from("## Previous steps\n");
        for obs in self.observations.iter().skip(skip) {
            let status = if obs.success { "ok" } else { "failed" };
            output.push_str(&format!(
                "Step {} [{}] {}: {}\n",
                obs.step, status, obs.action, obs.output
            ));
        }
        output
    }
}

/// An observation from one step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// 1-based step number
    pub step: usize,
    /// Action (or phase) that produced this observation
    pub action: String,
    /// Whether the step was successful
    pub success: bool,
    /// Human-readable output
    pub output: String,
}

impl Observation {
    /// Create a successful observation
    pub fn success(step: usize, action: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            step,
            action: action.into(),
            success: true,
            output: output.into(),
        }
    }

    /// Create an error observation
    pub fn error(step: usize, action: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            step,
            action: action.into(),
            success: false,
            output: error.into(),
        }
    }
}
