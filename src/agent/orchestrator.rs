//! Browser agent
//!
//! Runs one task as a bounded observe → decide → act loop. Each step shows
//! the model the current page and recent observations, parses one action
//! from the reply and executes it against the page.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::agent::action::{parse_decision, AgentAction, MAX_WAIT_SECS};
use crate::agent::loop_state::{AgentLoopState, Observation};
use crate::agent::runtime::TaskAgent;
use crate::browser::{PageDriver, PageState};
use crate::core::config::AgentConfig;
use crate::core::{AgentOutcome, Message, NavigatorError, Result};
use crate::llm::{GenerateOptions, LLMProvider};

const SYSTEM_PROMPT: &str = r#"You control a web browser to complete the user's task.

Every reply must be exactly one JSON object:
{"thought": "<short reasoning>", "action": "<name>", ...arguments}

## Actions
- {"action": "navigate", "url": "https://..."}
- {"action": "click", "ref": "e5"}
- {"action": "fill", "ref": "e3", "text": "search query"}
- {"action": "press", "key": "Enter"}
- {"action": "scroll", "direction": "down", "pixels": 600}
- {"action": "get_text", "ref": "e7"}
- {"action": "wait", "seconds": 2}
- {"action": "done", "text": "<final answer for the user>", "success": true}

## Rules
- Use EXACT element refs from the latest page state, e.g. `link "Sign in" [ref=e12]` means {"ref": "e12"}.
- Refs change after navigation; never reuse refs from an older page.
- Reply with "done" as soon as the task is complete, or with "success": false if it cannot be completed."#;

/// Agent bound to one task, one model and one shared page
pub struct BrowserAgent<P: PageDriver> {
    task: String,
    llm: Arc<dyn LLMProvider>,
    page: Arc<P>,
    settings: AgentConfig,
}

impl<P: PageDriver> BrowserAgent<P> {
    pub fn new(
        task: impl Into<String>,
        llm: Arc<dyn LLMProvider>,
        page: Arc<P>,
        settings: AgentConfig,
    ) -> Self {
        Self {
            task: task.into(),
            llm,
            page,
            settings,
        }
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    /// The page this agent drives
    pub fn page(&self) -> &Arc<P> {
        &self.page
    }

    /// Build the prompt for the next step
    fn build_messages(&self, state: &AgentLoopState, page: &PageState) -> Vec<Message> {
        let mut elements = page.elements.clone();
        if elements.len() > self.settings.max_page_chars {
            let mut cut = self.settings.max_page_chars;
            while !elements.is_char_boundary(cut) {
                cut -= 1;
            }
            elements.truncate(cut);
            elements.push_str("\n... (truncated)");
        }

        let user_content = format!(
            "## Task\n{}\n\n{}\n## Current page (step {}/{})\nURL: {}\nTitle: {}\n{}",
            self.task,
            state.format_observations(),
            state.step + 1,
            state.max_steps,
            page.url,
            page.title,
            elements
        );

        vec![Message::system(SYSTEM_PROMPT), Message::user(user_content)]
    }

    /// Execute a non-terminal action against the page
    async fn execute(&self, action: &AgentAction) -> Result<String> {
        match action {
            AgentAction::Navigate { url } => self.page.navigate(url).await,
            AgentAction::Click { ref_id } => self.page.click(ref_id).await,
            AgentAction::Fill { ref_id, text } => self.page.fill(ref_id, text).await,
            AgentAction::Press { key } => self.page.press(key).await,
            AgentAction::Scroll { direction, pixels } => {
                self.page.scroll(*direction, *pixels).await
            }
            AgentAction::GetText { ref_id } => {
                let text = self.page.get_text(ref_id).await?;
                Ok(format!("Text of {}: {}", ref_id, text))
            }
            AgentAction::Wait { seconds } => {
                let seconds = (*seconds).min(MAX_WAIT_SECS);
                tokio::time::sleep(Duration::from_secs(seconds)).await;
                Ok(format!("Waited {}s", seconds))
            }
            AgentAction::Done { .. } => Err(NavigatorError::agent("done is not executable")),
        }
    }

    /// Run one step. Recoverable failures become observations; LLM
    /// transport errors end the run.
    async fn step(&self, state: &mut AgentLoopState) -> Result<()> {
        let step = state.step + 1;

        let page = match self.page.page_state().await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(step, error = %e, "could not read page state");
                state.complete_step(Observation::error(step, "observe", e.to_string()));
                return Ok(());
            }
        };

        let messages = self.build_messages(state, &page);
        let response = self
            .llm
            .chat(
                &messages,
                Some(GenerateOptions {
                    temperature: Some(self.settings.temperature),
                    ..Default::default()
                }),
            )
            .await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(step, tokens = usage.total_tokens, "model replied");
        }

        let decision = match parse_decision(&response.content) {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!(step, error = %e, "unusable model reply");
                state.complete_step(Observation::error(step, "decide", e.to_string()));
                return Ok(());
            }
        };

        if !decision.thought.is_empty() {
            tracing::info!(step, thought = %decision.thought, "agent");
        }

        if let AgentAction::Done { text, success } = decision.action {
            tracing::info!(step, success, "task finished");
            state.finish(text, success);
            return Ok(());
        }

        let name = decision.action.name();
        tracing::info!(step, action = name, "executing");
        let observation = match self.execute(&decision.action).await {
            Ok(output) => Observation::success(step, name, output),
            Err(e) => Observation::error(step, name, e.to_string()),
        };
        state.complete_step(observation);
        Ok(())
    }
}

#[async_trait]
impl<P: PageDriver + 'static> TaskAgent for BrowserAgent<P> {
    async fn run(&mut self) -> Result<AgentOutcome> {
        let mut state = AgentLoopState::new(self.settings.max_steps);

        while state.should_continue() {
            self.step(&mut state).await?;

            // 0 disables the limit
            let limit = self.settings.max_failures;
            if limit > 0 && state.consecutive_failures >= limit {
                return Err(NavigatorError::TooManyFailures(state.consecutive_failures));
            }
        }

        let (final_result, success) = match state.final_result {
            Some((text, success)) => (Some(text), success),
            None => {
                tracing::warn!(steps = state.step, "step limit reached before the task finished");
                (None, false)
            }
        };

        Ok(AgentOutcome {
            final_result,
            success,
            steps: state.step,
        })
    }
}
