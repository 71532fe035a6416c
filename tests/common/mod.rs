//! Fakes shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use navigator::cli::LineSource;
use navigator::core::Message;
use navigator::llm::{GenerateOptions, LLMResponse};
use navigator::{AgentOutcome, AgentRuntime, LLMProvider, NavigatorError, Result, TaskAgent};

/// LLM that replays canned replies and records every prompt
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<String>>,
    pub prompts: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedLlm {
    pub fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Same reply forever
    pub fn repeating(reply: &str, times: usize) -> Arc<Self> {
        Self::new(&vec![reply; times])
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMProvider for ScriptedLlm {
    async fn chat(
        &self,
        messages: &[Message],
        _options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        self.prompts.lock().unwrap().push(messages.to_vec());
        let content = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| NavigatorError::provider("scripted", "out of replies"))?;
        Ok(LLMResponse {
            content,
            usage: None,
            model: "scripted-1".to_string(),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }
}

/// Browser handle with an identity, nothing else
#[derive(Debug)]
pub struct FakeBrowser {
    pub id: usize,
}

/// Agent that fails when its task mentions "fail", with a multi-line
/// provider error when it mentions "unauthorized"
pub struct FakeAgent {
    task: String,
}

#[async_trait]
impl TaskAgent for FakeAgent {
    async fn run(&mut self) -> Result<AgentOutcome> {
        if self.task.contains("unauthorized") {
            return Err(NavigatorError::provider(
                "openai",
                "401 Unauthorized: {\n    \"error\": {\n        \"message\": \"Incorrect API key\"\n    }\n}\n",
            ));
        }
        if self.task.contains("fail") {
            return Err(NavigatorError::agent("page crashed"));
        }
        Ok(AgentOutcome {
            final_result: Some(format!("did {}", self.task)),
            success: true,
            steps: 1,
        })
    }
}

/// Runtime that counts launches/closes and remembers which browser each
/// agent was bound to
#[derive(Default)]
pub struct FakeRuntime {
    pub launches: AtomicUsize,
    pub closes: AtomicUsize,
    pub fail_close: bool,
    pub bound: Mutex<Vec<(String, Arc<FakeBrowser>)>>,
}

impl FakeRuntime {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentRuntime for FakeRuntime {
    type Browser = FakeBrowser;
    type Agent = FakeAgent;

    async fn launch_browser(&self) -> Result<Arc<FakeBrowser>> {
        let id = self.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeBrowser { id }))
    }

    fn create_agent(
        &self,
        task: &str,
        _llm: Arc<dyn LLMProvider>,
        browser: Arc<FakeBrowser>,
    ) -> FakeAgent {
        self.bound
            .lock()
            .unwrap()
            .push((task.to_string(), browser));
        FakeAgent {
            task: task.to_string(),
        }
    }

    async fn close_browser(&self, _browser: &FakeBrowser) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(NavigatorError::browser("close timed out"));
        }
        Ok(())
    }
}

/// Lines as `read_line` would return them; `Err` entries simulate read failures
pub struct ScriptedLines {
    lines: VecDeque<std::result::Result<String, String>>,
}

impl ScriptedLines {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| Ok(format!("{}\n", l))).collect(),
        }
    }

    pub fn then_error(mut self, message: &str) -> Self {
        self.lines.push_back(Err(message.to_string()));
        self
    }
}

#[async_trait]
impl LineSource for ScriptedLines {
    async fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.pop_front() {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(message)) => Err(NavigatorError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                message,
            ))),
            None => Ok(None),
        }
    }
}

/// Split captured console output into lines
pub fn lines_of(bytes: Vec<u8>) -> Vec<String> {
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
