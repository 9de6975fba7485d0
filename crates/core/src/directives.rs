//! Container directive parsing and serial numbering.
//!
//! Container directives wrap nested documentation content in a styled
//! element. The source dialect uses colon fences:
//!
//! ```text
//! :::aside
//! Nested block content.
//! :::
//! ```
//!
//! The directives take no options or arguments; an opening line carries the
//! bare directive name and nothing else.

use std::collections::HashMap;

/// Parsed representation of a container directive opening line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerOpening {
    /// Lowercased directive name (`aside`, `sidebox`, ...).
    pub name: String,
}

/// Parse an opening directive line like `:::aside`.
///
/// Returns `None` for lines that are not directives: indented code, lines
/// without the `:::` marker, and marker lines carrying anything beyond a
/// bare alphabetic name.
pub fn parse_container_opening(line: &str) -> Option<ContainerOpening> {
    if is_indented_code_block(line) {
        return None;
    }

    let trimmed = line.trim();
    let rest = trimmed.strip_prefix(":::")?;

    let name = rest.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some(ContainerOpening {
        name: name.to_ascii_lowercase(),
    })
}

/// Check if a line is a directive closer (`:::`).
pub fn is_container_closer(line: &str) -> bool {
    line.trim() == ":::"
}

/// Lines starting with 4+ spaces or a tab are indented code blocks.
fn is_indented_code_block(line: &str) -> bool {
    line.starts_with("    ") || line.starts_with('\t')
}

/// Document-scoped serial numbers for container anchors.
///
/// Counters are keyed per directive name and start at zero, so the first
/// `aside` in a document gets `aside-0` no matter how many `sidebox`
/// containers precede it. One counter per document build; the counter is
/// owned by the build context, never process-wide.
#[derive(Debug, Default)]
pub struct SerialCounter {
    counts: HashMap<String, usize>,
}

impl SerialCounter {
    /// Creates a fresh counter with all categories at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next serial for `key`, counting up from zero.
    pub fn next_serial(&mut self, key: &str) -> usize {
        let entry = self.counts.entry(key.to_string()).or_insert(0);
        let current = *entry;
        *entry += 1;
        current
    }
}

/// A styled container produced by a directive, ready for rendering.
///
/// Immutable once built; the nested content stays in the document and is
/// parsed by the host content parser, not by the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerNode {
    /// HTML element name of the wrapper (`aside`, `div`, ...).
    pub tag: String,
    /// CSS class carried on the wrapper.
    pub class: String,
    /// Anchor prefix used to form the target id.
    pub anchor_prefix: String,
    /// Document-scoped serial number.
    pub serial: usize,
}

impl ContainerNode {
    /// Unique anchor id for cross-referencing, e.g. `aside-3`.
    pub fn anchor_id(&self) -> String {
        format!("{}-{}", self.anchor_prefix, self.serial)
    }
}
