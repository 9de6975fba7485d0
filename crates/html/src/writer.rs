//! Paired enter/exit writer for container elements.
//!
//! Rendering a container is a paired visitor contract: entering emits the
//! opening tag with its anchor target, exiting emits the matching closing
//! tag, and nothing else carries state between the two. The writer keeps
//! the stack of open containers so closers always pop their own opener.

use html_escape::encode_double_quoted_attribute;
use idiodoc_core::{ContainerNode, IdiodocError};
use std::fmt::Write as _;

/// Line-oriented output buffer enforcing the visit/depart pairing.
#[derive(Debug, Default)]
pub struct ContainerWriter {
    out: String,
    open: Vec<ContainerNode>,
}

impl ContainerWriter {
    /// Creates an empty writer with no open containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a passthrough source line.
    pub fn push_line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    /// Enter a container: emits the opening tag and the anchor target.
    ///
    /// The anchor sits just inside the wrapper so the host parser treats
    /// both lines as one raw block; a following blank line hands the nested
    /// content back to markdown parsing.
    pub fn visit(&mut self, node: ContainerNode) {
        writeln!(
            self.out,
            "<{} class=\"{}\">",
            node.tag,
            encode_double_quoted_attribute(&node.class)
        )
        .ok();
        writeln!(
            self.out,
            "<span id=\"{}\"></span>",
            encode_double_quoted_attribute(&node.anchor_id())
        )
        .ok();
        self.out.push('\n');
        self.open.push(node);
    }

    /// Exit the innermost open container, emitting its closing tag.
    pub fn depart(&mut self) -> Result<ContainerNode, IdiodocError> {
        let node = self.open.pop().ok_or(IdiodocError::UnbalancedContainer)?;
        self.out.push('\n');
        writeln!(self.out, "</{}>", node.tag).ok();
        self.out.push('\n');
        Ok(node)
    }

    /// Number of currently open containers.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Close any leftover containers and return the output together with
    /// the number of auto-closed ones.
    pub fn finish(mut self) -> (String, usize) {
        let mut auto_closed = 0;
        while self.depth() > 0 {
            // depth checked, depart cannot fail
            if self.depart().is_ok() {
                auto_closed += 1;
            }
        }
        (self.out, auto_closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aside_node(serial: usize) -> ContainerNode {
        ContainerNode {
            tag: "aside".to_string(),
            class: "aside".to_string(),
            anchor_prefix: "aside".to_string(),
            serial,
        }
    }

    #[test]
    fn visit_emits_wrapper_and_anchor() {
        let mut writer = ContainerWriter::new();
        writer.visit(aside_node(0));
        let (out, _) = writer.finish();
        assert!(out.starts_with("<aside class=\"aside\">\n<span id=\"aside-0\"></span>\n\n"));
        assert!(out.ends_with("\n</aside>\n\n"));
    }

    #[test]
    fn depart_pops_its_own_opener() {
        let mut writer = ContainerWriter::new();
        writer.visit(aside_node(0));
        writer.visit(ContainerNode {
            tag: "div".to_string(),
            class: "sidebox".to_string(),
            anchor_prefix: "sidebox".to_string(),
            serial: 0,
        });
        let inner = writer.depart().unwrap();
        assert_eq!(inner.tag, "div");
        let outer = writer.depart().unwrap();
        assert_eq!(outer.tag, "aside");
    }

    #[test]
    fn depart_without_opener_is_an_error() {
        let mut writer = ContainerWriter::new();
        assert!(matches!(
            writer.depart(),
            Err(IdiodocError::UnbalancedContainer)
        ));
    }

    #[test]
    fn finish_auto_closes_leftovers() {
        let mut writer = ContainerWriter::new();
        writer.visit(aside_node(0));
        writer.visit(aside_node(1));
        let (out, auto_closed) = writer.finish();
        assert_eq!(auto_closed, 2);
        assert_eq!(out.matches("</aside>").count(), 2);
    }

    #[test]
    fn content_lines_flow_between_tags() {
        let mut writer = ContainerWriter::new();
        writer.visit(aside_node(0));
        writer.push_line("content");
        writer.depart().unwrap();
        let (out, auto_closed) = writer.finish();
        assert_eq!(auto_closed, 0);
        let open_at = out.find("<aside").unwrap();
        let content_at = out.find("content").unwrap();
        let close_at = out.find("</aside>").unwrap();
        assert!(open_at < content_at && content_at < close_at);
    }
}
