//! Fenced code block tracking.
//!
//! The rewrite passes must leave fence interiors untouched, and the
//! highlight pass needs the opener's info string to pick a lexer. The
//! tracker follows the CommonMark rules: an opener is a run of three or
//! more backticks or tildes indented at most three columns, and a closer
//! uses the same marker, meets the opener's length, and carries no info
//! string.

/// Classification of a single line fed to [`FenceTracker::feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceEvent<'a> {
    /// The line opens a fenced block.
    Open {
        /// Trimmed info string following the fence markers.
        info: &'a str,
    },
    /// The line closes the currently open fenced block.
    Close,
    /// The line lies inside an open fenced block.
    Inside,
    /// The line is ordinary text outside any fence.
    Outside,
}

#[derive(Debug, Clone, Copy)]
struct OpenFence {
    marker: char,
    length: usize,
}

/// Line-by-line tracker for fenced code blocks.
#[derive(Debug, Default)]
pub struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    /// Creates a tracker positioned outside any fence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tracker is currently inside a fenced block.
    pub fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Advance over one line, classifying it.
    pub fn feed<'a>(&mut self, line: &'a str) -> FenceEvent<'a> {
        let (indent, byte_offset) = leading_whitespace_info(line);
        let after_indent = &line[byte_offset..];

        match self.open {
            None => {
                // CommonMark: a fence opener has 0-3 columns of indentation;
                // 4+ is an indented code block.
                if indent <= 3 {
                    if let Some((marker, length, info)) = split_fence_opener(after_indent) {
                        self.open = Some(OpenFence { marker, length });
                        return FenceEvent::Open { info };
                    }
                }
                FenceEvent::Outside
            }
            Some(open) => {
                if indent <= 3 && closes(after_indent, open) {
                    self.open = None;
                    return FenceEvent::Close;
                }
                FenceEvent::Inside
            }
        }
    }
}

/// Returns (visual_columns, byte_offset) for leading whitespace, expanding
/// tabs to 4-column boundaries.
fn leading_whitespace_info(line: &str) -> (usize, usize) {
    let mut col = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => {
                col += 1;
                bytes += 1;
            }
            b'\t' => {
                col += 4 - (col % 4);
                bytes += 1;
            }
            _ => break,
        }
    }
    (col, bytes)
}

/// Splits a candidate opener into (marker, run length, trimmed info string).
fn split_fence_opener(after_indent: &str) -> Option<(char, usize, &str)> {
    let marker = match after_indent.chars().next() {
        Some(c @ ('`' | '~')) => c,
        _ => return None,
    };
    let length = after_indent.chars().take_while(|c| *c == marker).count();
    if length < 3 {
        return None;
    }
    let info = after_indent[length..].trim();
    // CommonMark: a backtick fence's info string may not contain backticks.
    if marker == '`' && info.contains('`') {
        return None;
    }
    Some((marker, length, info))
}

/// A closer repeats the opener's marker at least as many times, followed by
/// nothing but whitespace.
fn closes(after_indent: &str, open: OpenFence) -> bool {
    let length = after_indent
        .chars()
        .take_while(|c| *c == open.marker)
        .count();
    length >= open.length && after_indent[length..].trim().is_empty()
}
