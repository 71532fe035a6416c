//! Navigator - LLM-driven browser tasks from the command line
//!
//! Two entry points share this library: `navigator` runs one task and exits,
//! `navigator-daemon` keeps one browser open and runs a task per stdin line,
//! printing `__DONE__` after each.
//!
//! # Architecture
//!
//! - **Core**: Configuration, errors, logging and shared types
//! - **LLM**: Provider abstraction and the provider-tag selector
//! - **Browser**: agent-browser CLI session and snapshot parsing
//! - **Agent**: The step loop and the runtime seam the drivers use
//! - **CLI**: Arguments, stdout framing, stdin reading, and both drivers
//!
//! # Usage
//!
//! ```rust,no_run
//! use navigator::cli::{run_once, Console};
//! use navigator::{select_llm, AgentBrowserRuntime, Config};
//!
//! #[tokio::main]
//! async fn main() -> navigator::Result<()> {
//!     let config = Config::load(None)?;
//!     let llm = select_llm("openai", "gpt-4o", &config);
//!     let runtime = AgentBrowserRuntime::from_config(&config);
//!
//!     run_once(&runtime, llm, "Find the title of example.com", &mut Console::stdout()).await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod browser;
pub mod cli;
pub mod core;
pub mod llm;

// Re-export commonly used items
pub use agent::{AgentBrowserRuntime, AgentRuntime, BrowserAgent, TaskAgent};
pub use crate::core::{AgentOutcome, Config, NavigatorError, Result};
pub use llm::{select_llm, LLMProvider, ProviderKind};
