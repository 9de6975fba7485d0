#![deny(missing_docs)]
//! idiodoc core: Idio lexing, container directives, and host parser glue.

/// Container directive parsing and serial numbering.
pub mod directives;
/// Core error and source location types.
pub mod error;
/// Fenced code block tracking.
pub mod fence;
/// Host markdown parser adapter.
pub mod host;
/// The Idio syntax-highlighting lexer.
pub mod lexer;
/// Token model for highlighted output.
pub mod token;

pub use directives::{
    ContainerNode, ContainerOpening, SerialCounter, is_container_closer, parse_container_opening,
};
pub use error::{IdiodocError, SourceLocation};
pub use fence::{FenceEvent, FenceTracker};
pub use host::{HostOptions, render_markdown};
pub use lexer::{IdioLexer, Lexer, TokenStream};
pub use token::{Token, TokenKind};
