//! Document pipeline composing the rewrite passes and the host parse.
//!
//! Each pass is a separate text-level transform over the whole document:
//! container directives first, then fenced-block highlighting, then the
//! host markdown parse produces the final HTML.

use crate::containers::rewrite_containers;
use crate::highlight::rewrite_highlights;
use crate::registry::{RegistryConfig, default_registry};
use idiodoc_core::{HostOptions, IdiodocError, SerialCounter, render_markdown};

/// Per-document build pipeline.
///
/// Owns the registry, host options, and the serial counter for one document
/// build. Create a fresh pipeline per document so anchors restart at zero;
/// the host runtime is responsible for not sharing one pipeline across
/// concurrent builds.
#[derive(Debug)]
pub struct Pipeline {
    registry: RegistryConfig,
    host: HostOptions,
    counter: SerialCounter,
}

impl Pipeline {
    /// Pipeline with the built-in registry.
    pub fn new() -> Self {
        Self::with_registry(default_registry())
    }

    /// Pipeline with a caller-supplied registry.
    pub fn with_registry(registry: RegistryConfig) -> Self {
        Self {
            registry,
            host: HostOptions::pipeline(),
            counter: SerialCounter::new(),
        }
    }

    /// The active registry.
    pub fn registry(&self) -> &RegistryConfig {
        &self.registry
    }

    /// Render one source document to HTML.
    pub fn render(&mut self, input: &str) -> Result<String, IdiodocError> {
        let (with_containers, containers) =
            rewrite_containers(input, &self.registry, &mut self.counter);
        let (with_highlights, blocks) = rewrite_highlights(&with_containers, &self.registry);
        log::debug!("pipeline rewrote {containers} container(s), {blocks} highlighted block(s)");
        render_markdown(&with_highlights, &self.host)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
