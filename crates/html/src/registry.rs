//! Directive and lexer registration surface.
//!
//! The registry is plain serde-friendly configuration: directive names map
//! to container elements, lexer names map to filename patterns. Behavior
//! (the concrete lexer for a registered name) is resolved separately so the
//! configuration stays data.

use idiodoc_core::{ContainerNode, IdioLexer, Lexer};
use serde::{Deserialize, Serialize};

/// Mapping from a directive name to a styled container element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerMapping {
    /// Directive name (`aside`, `sidebox`).
    pub directive: String,
    /// HTML element used for the wrapper.
    pub tag: String,
    /// CSS class carried on the wrapper.
    pub class: String,
}

impl ContainerMapping {
    /// Build the container node for one directive occurrence.
    ///
    /// The directive name doubles as the anchor prefix, so the n-th `aside`
    /// in a document anchors at `aside-<n>`.
    pub fn node(&self, serial: usize) -> ContainerNode {
        ContainerNode {
            tag: self.tag.clone(),
            class: self.class.clone(),
            anchor_prefix: self.directive.clone(),
            serial,
        }
    }
}

/// A registered syntax-highlighting lexer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LexerDefinition {
    /// Registry name, also matched against fence info strings.
    pub name: String,
    /// Filename patterns (`*.ext` globs or exact names).
    #[serde(default)]
    pub filenames: Vec<String>,
}

/// Configuration for the directive and lexer registry.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Directive to container mappings.
    pub container_mappings: Vec<ContainerMapping>,
    /// Registered lexers.
    #[serde(default)]
    pub lexers: Vec<LexerDefinition>,
}

impl RegistryConfig {
    /// Parse a registry configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if a directive name is supported.
    pub fn is_supported_directive(&self, name: &str) -> bool {
        self.container_mappings.iter().any(|m| m.directive == name)
    }

    /// Get the container mapping for a directive name.
    pub fn container_for_directive(&self, directive: &str) -> Option<&ContainerMapping> {
        self.container_mappings
            .iter()
            .find(|m| m.directive == directive)
    }

    /// Resolve a registered lexer by name.
    pub fn lexer_for_name(&self, name: &str) -> Option<&'static dyn Lexer> {
        self.lexers
            .iter()
            .find(|def| def.name == name)
            .and_then(|def| lexer_named(&def.name))
    }

    /// Resolve a registered lexer by filename.
    pub fn lexer_for_filename(&self, path: &str) -> Option<&'static dyn Lexer> {
        self.lexers
            .iter()
            .find(|def| {
                def.filenames
                    .iter()
                    .any(|pattern| matches_filename(pattern, path))
            })
            .and_then(|def| lexer_named(&def.name))
    }
}

static IDIO: IdioLexer = IdioLexer;

/// Map a registered name to its concrete lexer.
fn lexer_named(name: &str) -> Option<&'static dyn Lexer> {
    match name {
        "idio" => Some(&IDIO),
        _ => None,
    }
}

/// Match a `*.ext` glob or exact name against a path's final component.
fn matches_filename(pattern: &str, path: &str) -> bool {
    let name = path.rsplit('/').next().unwrap_or(path);
    match pattern.strip_prefix('*') {
        Some(suffix) => name.ends_with(suffix),
        None => name == pattern,
    }
}

/// Built-in registry: `aside`/`sidebox` containers and the `idio` lexer
/// claiming `*.diff` files.
pub fn default_registry() -> RegistryConfig {
    RegistryConfig {
        container_mappings: vec![
            ContainerMapping {
                directive: "aside".to_string(),
                tag: "aside".to_string(),
                class: "aside".to_string(),
            },
            ContainerMapping {
                directive: "sidebox".to_string(),
                tag: "div".to_string(),
                class: "sidebox".to_string(),
            },
        ],
        lexers: vec![LexerDefinition {
            name: "idio".to_string(),
            filenames: vec!["*.diff".to_string()],
        }],
    }
}
