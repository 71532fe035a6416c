//! The seam between the drivers and the automation stack
//!
//! The one-shot runner and the daemon only ever launch a browser, build an
//! agent per task, run it, and close the browser. `AgentRuntime` is exactly
//! that contract, so the drivers can be exercised without a real browser.

use std::sync::Arc;

use async_trait::async_trait;

use crate::agent::orchestrator::BrowserAgent;
use crate::browser::BrowserSession;
use crate::core::config::{AgentConfig, BrowserConfig};
use crate::core::{AgentOutcome, Config, Result};
use crate::llm::LLMProvider;

/// A per-task agent
#[async_trait]
pub trait TaskAgent: Send {
    /// Run the task to completion
    async fn run(&mut self) -> Result<AgentOutcome>;
}

/// Factory for browser handles and agents
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    type Browser: Send + Sync + 'static;
    type Agent: TaskAgent;

    /// Construct the (single, shared) browser handle
    async fn launch_browser(&self) -> Result<Arc<Self::Browser>>;

    /// Bind a new agent to a task, a model and the shared browser
    fn create_agent(
        &self,
        task: &str,
        llm: Arc<dyn LLMProvider>,
        browser: Arc<Self::Browser>,
    ) -> Self::Agent;

    /// Release the browser handle
    async fn close_browser(&self, browser: &Self::Browser) -> Result<()>;
}

/// Runtime backed by the agent-browser CLI
#[derive(Debug, Clone)]
pub struct AgentBrowserRuntime {
    browser: BrowserConfig,
    agent: AgentConfig,
}

impl AgentBrowserRuntime {
    pub fn from_config(config: &Config) -> Self {
        Self {
            browser: config.browser.clone(),
            agent: config.agent.clone(),
        }
    }
}

#[async_trait]
impl AgentRuntime for AgentBrowserRuntime {
    type Browser = BrowserSession;
    type Agent = BrowserAgent<BrowserSession>;

    async fn launch_browser(&self) -> Result<Arc<BrowserSession>> {
        Ok(Arc::new(BrowserSession::launch(&self.browser).await?))
    }

    fn create_agent(
        &self,
        task: &str,
        llm: Arc<dyn LLMProvider>,
        browser: Arc<BrowserSession>,
    ) -> BrowserAgent<BrowserSession> {
        BrowserAgent::new(task, llm, browser, self.agent.clone())
    }

    async fn close_browser(&self, browser: &BrowserSession) -> Result<()> {
        browser.close().await
    }
}
