//! One-shot runner
//!
//! Runs a single task with a fresh browser, then closes it.

use std::io::Write;
use std::sync::Arc;

use crate::agent::{AgentRuntime, TaskAgent};
use crate::cli::console::{Console, Tag};
use crate::core::{AgentOutcome, NavigatorError, Result};
use crate::llm::LLMProvider;

/// Run `task` once
///
/// The browser is closed whether the run succeeded or failed. A run error
/// takes precedence over a close error.
pub async fn run_once<R, W>(
    runtime: &R,
    llm: Arc<dyn LLMProvider>,
    task: &str,
    console: &mut Console<W>,
) -> Result<AgentOutcome>
where
    R: AgentRuntime,
    W: Write,
{
    let browser = runtime.launch_browser().await?;

    let result = async {
        console.tagged(
            Tag::Runner,
            format!(
                "Browser started. Provider: {}, Model: {}",
                llm.name(),
                llm.model()
            ),
        )?;
        console.tagged(Tag::Agent, format!("Running: {}", task))?;

        let mut agent = runtime.create_agent(task, Arc::clone(&llm), Arc::clone(&browser));
        let outcome = agent.run().await?;

        console.outcome(&outcome)?;
        Ok::<_, NavigatorError>(outcome)
    }
    .await;

    let closed = runtime.close_browser(&browser).await;

    let outcome = result?;
    closed?;
    Ok(outcome)
}
