//! Stdout framing
//!
//! Every line is flushed as soon as it is written so a supervising process
//! can react to it, in particular to the `__DONE__` sentinel.

use std::fmt::Display;
use std::io::{self, Write};

use crate::core::AgentOutcome;

/// Printed on its own line after each daemon task
pub const DONE_SENTINEL: &str = "__DONE__";

/// Bracketed prefix of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Runner,
    Daemon,
    Agent,
    Result,
    Error,
}

impl Tag {
    fn label(&self) -> &'static str {
        match self {
            Tag::Runner => "[runner]",
            Tag::Daemon => "[daemon]",
            Tag::Agent => "[agent]",
            Tag::Result => "[result]",
            Tag::Error => "[error]",
        }
    }
}

fn single_line(text: &str) -> String {
    if !text.contains(['\n', '\r']) {
        return text.to_string();
    }
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Line-oriented, always-flushed output
pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// Write `[tag] message` on exactly one line
    ///
    /// Multi-line messages (HTTP bodies, CLI stderr) are joined with spaces.
    pub fn tagged(&mut self, tag: Tag, message: impl Display) -> io::Result<()> {
        let message = single_line(&message.to_string());
        self.line(&format!("{} {}", tag.label(), message))
    }

    /// Write an empty separator line
    pub fn blank(&mut self) -> io::Result<()> {
        self.line("")
    }

    /// Write the task-completion sentinel
    pub fn done(&mut self) -> io::Result<()> {
        self.line(DONE_SENTINEL)
    }

    /// Report what a finished agent produced
    pub fn outcome(&mut self, outcome: &AgentOutcome) -> io::Result<()> {
        match &outcome.final_result {
            Some(text) => self.tagged(Tag::Result, text),
            None => self.tagged(
                Tag::Agent,
                format!("Stopped after {} steps without finishing", outcome.steps),
            ),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(console: Console<Vec<u8>>) -> String {
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn test_tagged_lines() {
        let mut console = Console::new(Vec::new());
        console.tagged(Tag::Daemon, "Browser closed.").unwrap();
        console.tagged(Tag::Error, "boom").unwrap();
        console.done().unwrap();
        assert_eq!(written(console), "[daemon] Browser closed.\n[error] boom\n__DONE__\n");
    }

    #[test]
    fn test_multiline_message_stays_on_one_line() {
        let mut console = Console::new(Vec::new());
        console
            .tagged(
                Tag::Error,
                "openai API error: 401 Unauthorized: {\n    \"error\": {\r\n        \"message\": \"bad key\"\n    }\n}\n",
            )
            .unwrap();
        console.done().unwrap();
        assert_eq!(
            written(console),
            "[error] openai API error: 401 Unauthorized: { \"error\": { \"message\": \"bad key\" } }\n__DONE__\n"
        );
    }

    #[test]
    fn test_single_line_message_is_untouched() {
        let mut console = Console::new(Vec::new());
        console.tagged(Tag::Agent, "Running:  two  spaces").unwrap();
        assert_eq!(written(console), "[agent] Running:  two  spaces\n");
    }

    #[test]
    fn test_outcome_lines() {
        let mut console = Console::new(Vec::new());
        console
            .outcome(&AgentOutcome {
                final_result: Some("3 results".to_string()),
                success: true,
                steps: 4,
            })
            .unwrap();
        console
            .outcome(&AgentOutcome {
                final_result: None,
                success: false,
                steps: 25,
            })
            .unwrap();
        assert_eq!(
            written(console),
            "[result] 3 results\n[agent] Stopped after 25 steps without finishing\n"
        );
    }
}
