//! Snapshot parsing for agent-browser output
//!
//! Parses the accessibility tree JSON from `snapshot -i --json`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Parsed snapshot from agent-browser
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Whether the operation succeeded
    #[serde(default)]
    pub success: bool,
    /// Snapshot data
    #[serde(default)]
    pub data: Option<SnapshotData>,
}

/// Snapshot data content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotData {
    /// Raw snapshot string (accessibility tree)
    #[serde(default)]
    pub snapshot: String,
    /// Element refs mapped to their info
    #[serde(default)]
    pub refs: HashMap<String, Element>,
}

/// An element in the snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Element {
    /// ARIA role
    #[serde(default)]
    pub role: String,
    /// Accessible name
    #[serde(default)]
    pub name: String,
    /// Element value (for inputs)
    #[serde(default)]
    pub value: Option<String>,
    /// Whether element is focused
    #[serde(default)]
    pub focused: bool,
}

impl Snapshot {
    /// Count the number of elements with refs
    pub fn count_elements(&self) -> usize {
        self.data.as_ref().map(|d| d.refs.len()).unwrap_or(0)
    }

    /// Get an element by ref
    pub fn get_element(&self, ref_id: &str) -> Option<&Element> {
        let clean_ref = ref_id.strip_prefix('@').unwrap_or(ref_id);
        self.data.as_ref().and_then(|d| d.refs.get(clean_ref))
    }

    /// Get the raw accessibility tree string
    pub fn raw_tree(&self) -> Option<&str> {
        self.data
            .as_ref()
            .map(|d| d.snapshot.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    /// Refs in page order (`e2` before `e10`)
    fn ordered_refs(&self) -> Vec<(&String, &Element)> {
        let mut refs: Vec<_> = self
            .data
            .as_ref()
            .map(|d| d.refs.iter().collect())
            .unwrap_or_default();
        refs.sort_by_key(|(id, _)| {
            let digits = id.trim_start_matches(|c: char| !c.is_ascii_digit());
            (digits.parse::<u64>().unwrap_or(u64::MAX), (*id).clone())
        });
        refs
    }

    /// Format snapshot for an LLM prompt
    ///
    /// Prefers the accessibility tree, which already carries `[ref=eN]` tags.
    pub fn format_for_prompt(&self) -> String {
        if let Some(tree) = self.raw_tree() {
            return tree.to_string();
        }

        if self.count_elements() == 0 {
            return "No interactive elements on the page".to_string();
        }

        let mut output = String::from("Page Elements:\n");
        for (ref_id, element) in self.ordered_refs() {
            let value_str = element
                .value
                .as_ref()
                .map(|v| format!(" = \"{}\"", v))
                .unwrap_or_default();

            output.push_str(&format!(
                "  @{}: {} \"{}\"{}",
                ref_id, element.role, element.name, value_str
            ));

            if element.focused {
                output.push_str(" [focused]");
            }

            output.push('\n');
        }
        output
    }
}
