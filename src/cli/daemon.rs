//! Persistent daemon
//!
//! Keeps a single browser alive and runs one task per non-blank stdin line,
//! printing `__DONE__` after each so the parent process knows when a task's
//! output is complete.

use std::io::Write;
use std::sync::Arc;

use crate::agent::{AgentRuntime, TaskAgent};
use crate::cli::console::{Console, Tag};
use crate::cli::input::LineSource;
use crate::core::Result;
use crate::llm::LLMProvider;

/// Counters for one daemon lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaemonReport {
    /// Non-blank lines processed
    pub tasks: usize,
    /// Tasks whose run returned an error
    pub failed: usize,
}

/// Line-driven task loop over one shared browser
pub struct Daemon<R: AgentRuntime> {
    runtime: R,
    llm: Arc<dyn LLMProvider>,
    provider: String,
    model: String,
}

impl<R: AgentRuntime> Daemon<R> {
    /// `provider` and `model` are the labels echoed in the startup line
    pub fn new(
        runtime: R,
        llm: Arc<dyn LLMProvider>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            runtime,
            llm,
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Run until `lines` is exhausted
    ///
    /// The browser is closed exactly once on the way out, whether the loop
    /// ended on end-of-input or on a fatal error.
    pub async fn run<S, W>(&self, lines: &mut S, console: &mut Console<W>) -> Result<DaemonReport>
    where
        S: LineSource,
        W: Write,
    {
        let browser = self.runtime.launch_browser().await?;

        let served = self.serve(&browser, lines, console).await;

        if let Err(e) = self.runtime.close_browser(&browser).await {
            tracing::warn!(error = %e, "failed to close browser");
        }
        console.tagged(Tag::Daemon, "Browser closed.")?;

        let report = served?;
        tracing::info!(tasks = report.tasks, failed = report.failed, "daemon stopped");
        Ok(report)
    }

    async fn serve<S, W>(
        &self,
        browser: &Arc<R::Browser>,
        lines: &mut S,
        console: &mut Console<W>,
    ) -> Result<DaemonReport>
    where
        S: LineSource,
        W: Write,
    {
        console.tagged(
            Tag::Daemon,
            format!(
                "Browser started. Provider: {}, Model: {}",
                self.provider, self.model
            ),
        )?;

        let mut report = DaemonReport::default();

        while let Some(line) = lines.next_line().await? {
            let task = line.trim();
            if task.is_empty() {
                continue;
            }

            report.tasks += 1;
            console.blank()?;
            console.tagged(Tag::Agent, format!("Running: {}", task))?;

            let mut agent =
                self.runtime
                    .create_agent(task, Arc::clone(&self.llm), Arc::clone(browser));

            match agent.run().await {
                Ok(outcome) => console.outcome(&outcome)?,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(task, error = %e, "task failed");
                    console.tagged(Tag::Error, &e)?;
                }
            }

            console.done()?;
        }

        tracing::debug!("end of input");
        Ok(report)
    }
}
