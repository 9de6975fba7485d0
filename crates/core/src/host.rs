//! Host markdown parser adapter.
//!
//! The container and highlight passes rewrite the document at text level;
//! the result is handed to markdown-rs, which owns all content parsing.
//! Raw-HTML passthrough must stay enabled for the rewritten wrapper tags to
//! survive compilation.

use crate::error::{IdiodocError, SourceLocation};
use markdown::message::{Message, Place};

/// Options for the host content parser.
#[derive(Clone, Copy, Debug)]
pub struct HostOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Allow raw HTML nodes through parsing and compilation.
    pub raw_html: bool,
}

impl HostOptions {
    /// Defaults for the documentation pipeline: GFM on, raw HTML allowed.
    pub const fn pipeline() -> Self {
        Self {
            gfm: true,
            raw_html: true,
        }
    }

    /// Convert to markdown-rs `Options`.
    pub fn to_markdown(self) -> markdown::Options {
        let mut constructs = markdown::Constructs {
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        markdown::Options {
            parse: markdown::ParseOptions {
                constructs,
                ..markdown::ParseOptions::default()
            },
            compile: markdown::CompileOptions {
                allow_dangerous_html: self.raw_html,
                ..markdown::CompileOptions::default()
            },
        }
    }
}

impl Default for HostOptions {
    fn default() -> Self {
        Self::pipeline()
    }
}

/// Render markdown to HTML through the host parser.
pub fn render_markdown(input: &str, options: &HostOptions) -> Result<String, IdiodocError> {
    markdown::to_html_with_options(input, &options.to_markdown()).map_err(|err| {
        IdiodocError::HostParse {
            message: err.to_string(),
            location: message_location(&err),
        }
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}
