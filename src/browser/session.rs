//! Browser session - wraps the agent-browser CLI
//!
//! One session per process. The CLI keeps the browser alive between
//! invocations as long as the same `--session` name is passed.

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rand::distr::{Alphanumeric, SampleString};
use tokio::process::Command;
use url::Url;

use crate::browser::snapshot::Snapshot;
use crate::browser::{PageDriver, PageState, ScrollDirection};
use crate::core::config::BrowserConfig;
use crate::core::{NavigatorError, Result};

/// A named agent-browser session
#[derive(Debug)]
pub struct BrowserSession {
    /// agent-browser executable
    binary: String,
    /// Session name for isolation
    session_name: String,
    /// Whether to run in headed mode
    headed: bool,
    /// Set once any command has reached the CLI
    opened: AtomicBool,
    closed: AtomicBool,
}

impl BrowserSession {
    /// Create a session handle without touching the CLI
    pub fn new(binary: impl Into<String>, session_name: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            session_name: session_name.into(),
            headed: false,
            opened: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// Create a session with a random per-process name
    pub fn from_config(config: &BrowserConfig) -> Self {
        let suffix = Alphanumeric
            .sample_string(&mut rand::rng(), 8)
            .to_lowercase();
        let mut session = Self::new(
            &config.binary,
            format!("{}-{}", config.session_prefix, suffix),
        );
        session.set_headed(config.headed);
        session
    }

    /// Create a session and verify the CLI is installed
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let session = Self::from_config(config);
        if !session.is_available().await {
            return Err(NavigatorError::AgentBrowserNotFound);
        }
        tracing::info!(session = %session.session_name, headed = session.headed, "browser session ready");
        Ok(session)
    }

    /// Set headed mode
    pub fn set_headed(&mut self, headed: bool) {
        self.headed = headed;
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Check if agent-browser is installed
    pub async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Run an agent-browser command
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        if self.is_closed() {
            return Err(NavigatorError::browser("session already closed"));
        }

        let mut cmd = Command::new(&self.binary);
        cmd.args(["--session", &self.session_name]);

        if self.headed {
            cmd.arg("--headed");
        }

        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!(session = %self.session_name, ?args, "agent-browser");
        self.opened.store(true, Ordering::SeqCst);

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NavigatorError::AgentBrowserNotFound
            } else {
                NavigatorError::browser(format!("Failed to run agent-browser: {}", e))
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(NavigatorError::browser(format!(
                "agent-browser {} failed: {}",
                args.first().copied().unwrap_or_default(),
                stderr.trim()
            )))
        }
    }

    /// Run a command and return JSON output
    async fn run_json_command(&self, args: &[&str]) -> Result<String> {
        let mut full_args: Vec<&str> = args.to_vec();
        full_args.push("--json");
        self.run_command(&full_args).await
    }

    /// Interactive-only snapshot of the current page
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let output = self.run_json_command(&["snapshot", "-i"]).await?;
        Ok(serde_json::from_str(&output)?)
    }

    /// Close the browser
    ///
    /// Only talks to the CLI if the session was used; later calls are no-ops.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if !self.opened.load(Ordering::SeqCst) {
            tracing::debug!(session = %self.session_name, "session never opened, nothing to close");
            return Ok(());
        }

        let mut cmd = Command::new(&self.binary);
        cmd.args(["--session", &self.session_name, "close"]);
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NavigatorError::browser(format!(
                "agent-browser close failed: {}",
                stderr.trim()
            )));
        }
        tracing::info!(session = %self.session_name, "browser session closed");
        Ok(())
    }
}

/// agent-browser addresses snapshot elements as `@eN`
pub fn normalize_ref(ref_id: &str) -> String {
    let trimmed = ref_id.trim();
    let trimmed = trimmed
        .strip_prefix("[ref=")
        .and_then(|r| r.strip_suffix(']'))
        .unwrap_or(trimmed);
    if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{}", trimmed)
    }
}

/// Default to https when the model leaves out the scheme
pub fn normalize_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let candidate = if raw.contains("://") || raw.starts_with("about:") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };
    Ok(Url::parse(&candidate)?.to_string())
}

#[async_trait]
impl PageDriver for BrowserSession {
    async fn navigate(&self, url: &str) -> Result<String> {
        let url = normalize_url(url)?;
        self.run_command(&["open", &url]).await?;
        // Best effort: some pages never reach network idle
        let _ = self.run_command(&["wait", "--load", "networkidle"]).await;
        Ok(format!("Navigated to {}", url))
    }

    async fn click(&self, ref_id: &str) -> Result<String> {
        let target = normalize_ref(ref_id);
        self.run_command(&["click", &target]).await?;
        Ok(format!("Clicked {}", target))
    }

    async fn fill(&self, ref_id: &str, text: &str) -> Result<String> {
        let target = normalize_ref(ref_id);
        self.run_command(&["fill", &target, text]).await?;
        Ok(format!("Filled {} with '{}'", target, text))
    }

    async fn press(&self, key: &str) -> Result<String> {
        self.run_command(&["press", key]).await?;
        Ok(format!("Pressed {}", key))
    }

    async fn scroll(&self, direction: ScrollDirection, pixels: Option<u32>) -> Result<String> {
        let direction = direction.to_string();
        let mut args = vec!["scroll", direction.as_str()];
        let px_str;

        if let Some(px) = pixels {
            px_str = px.to_string();
            args.push(&px_str);
        }

        self.run_command(&args).await?;
        Ok(format!("Scrolled {}", direction))
    }

    async fn get_text(&self, ref_id: &str) -> Result<String> {
        let target = normalize_ref(ref_id);
        let output = self.run_command(&["get", "text", &target]).await?;
        Ok(output.trim().to_string())
    }

    async fn page_state(&self) -> Result<PageState> {
        // Don't spin up a browser just to look at about:blank
        if !self.opened.load(Ordering::SeqCst) {
            return Ok(PageState::blank());
        }

        let url = self.run_command(&["get", "url"]).await?;
        let title = self.run_command(&["get", "title"]).await.unwrap_or_default();
        let snapshot = self.snapshot().await?;

        Ok(PageState {
            url: url.trim().to_string(),
            title: title.trim().to_string(),
            elements: snapshot.format_for_prompt(),
        })
    }
}
