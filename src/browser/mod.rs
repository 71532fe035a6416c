//! Browser automation module
//!
//! Wraps the agent-browser CLI. `PageDriver` is the surface the agent loop
//! drives; `BrowserSession` is the real implementation.

mod session;
mod snapshot;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::Result;

pub use session::{normalize_ref, normalize_url, BrowserSession};
pub use snapshot::{Element, Snapshot, SnapshotData};

/// Scroll direction accepted by agent-browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
            ScrollDirection::Left => "left",
            ScrollDirection::Right => "right",
        };
        f.write_str(s)
    }
}

/// What the agent sees of the current page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub url: String,
    pub title: String,
    /// Interactive elements with their refs
    pub elements: String,
}

impl PageState {
    /// State before the first navigation
    pub fn blank() -> Self {
        Self {
            url: "about:blank".to_string(),
            title: String::new(),
            elements: "Empty page. Navigate somewhere first.".to_string(),
        }
    }
}

/// Page-level operations the agent can perform
///
/// Each action returns a short human-readable observation.
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<String>;

    async fn click(&self, ref_id: &str) -> Result<String>;

    async fn fill(&self, ref_id: &str, text: &str) -> Result<String>;

    async fn press(&self, key: &str) -> Result<String>;

    async fn scroll(&self, direction: ScrollDirection, pixels: Option<u32>) -> Result<String>;

    async fn get_text(&self, ref_id: &str) -> Result<String>;

    /// Capture the current URL, title and interactive elements
    async fn page_state(&self) -> Result<PageState>;
}
