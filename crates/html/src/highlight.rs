//! Token-to-HTML highlighting and the fenced-block highlight pass.
//!
//! Highlighted blocks are emitted on a single physical line, with newlines
//! in the code encoded as `&#10;`, so the host parser carries the whole
//! block through as one raw-HTML unit regardless of blank lines in the
//! original snippet.

use crate::registry::RegistryConfig;
use idiodoc_core::{FenceEvent, FenceTracker, Lexer};
use std::fmt::Write as _;

/// Escape token text for embedding in a single-line `<pre>` block.
fn escape_code_text(text: &str) -> String {
    html_escape::encode_text(text).replace('\n', "&#10;")
}

/// Render a token stream over `source` as highlight spans.
///
/// Tokens with a CSS class become `<span class="...">`; plain text is
/// escaped and emitted bare.
pub fn highlight_source(lexer: &dyn Lexer, source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    for token in lexer.tokens(source) {
        let class = token.kind.css_class();
        if class.is_empty() {
            out.push_str(&escape_code_text(token.text));
        } else {
            write!(
                out,
                "<span class=\"{}\">{}</span>",
                class,
                escape_code_text(token.text)
            )
            .ok();
        }
    }
    out
}

/// Wrap highlighted source in the block container emitted for fenced code.
pub fn highlight_block(lexer: &dyn Lexer, source: &str) -> String {
    format!(
        "<div class=\"highlight\"><pre>{}</pre></div>",
        highlight_source(lexer, source)
    )
}

/// Replace fenced code blocks whose info string names a registered lexer
/// with raw highlight HTML.
///
/// Unregistered fences pass through untouched. Returns the rewritten
/// document and the number of blocks highlighted.
pub fn rewrite_highlights(input: &str, registry: &RegistryConfig) -> (String, usize) {
    let mut fences = FenceTracker::new();
    let mut out = String::with_capacity(input.len());
    let mut active: Option<(&'static dyn Lexer, String)> = None;
    let mut count = 0usize;

    for line in input.lines() {
        match fences.feed(line) {
            FenceEvent::Open { info } => {
                let lang = info.split_whitespace().next().unwrap_or("");
                match registry.lexer_for_name(lang) {
                    Some(lexer) => active = Some((lexer, String::new())),
                    None => {
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
            FenceEvent::Inside => match active.as_mut() {
                Some((_, code)) => {
                    code.push_str(line);
                    code.push('\n');
                }
                None => {
                    out.push_str(line);
                    out.push('\n');
                }
            },
            FenceEvent::Close => match active.take() {
                Some((lexer, code)) => {
                    out.push_str(&highlight_block(lexer, &code));
                    out.push('\n');
                    // Blank line ends the raw block before whatever follows.
                    out.push('\n');
                    count += 1;
                }
                None => {
                    out.push_str(line);
                    out.push('\n');
                }
            },
            FenceEvent::Outside => {
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    if let Some((lexer, code)) = active.take() {
        log::warn!("highlighting fenced block left open at end of input");
        out.push_str(&highlight_block(lexer, &code));
        out.push('\n');
        count += 1;
    }

    log::debug!("highlighted {count} fenced block(s)");
    (out, count)
}
