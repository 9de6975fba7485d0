#![deny(missing_docs)]
//! idiodoc HTML layer: registration surface, container writer, highlighter,
//! and the document pipeline.

/// Container-directive rewrite pass.
pub mod containers;
/// Token-to-HTML highlighting and the fenced-block highlight pass.
pub mod highlight;
/// Document pipeline composing the rewrite passes and the host parse.
pub mod pipeline;
/// Directive and lexer registration surface.
pub mod registry;
/// Paired enter/exit writer for container elements.
pub mod writer;

pub use containers::rewrite_containers;
pub use highlight::{highlight_block, highlight_source, rewrite_highlights};
pub use pipeline::Pipeline;
pub use registry::{ContainerMapping, LexerDefinition, RegistryConfig, default_registry};
pub use writer::ContainerWriter;
