//! Container-directive rewrite pass.
//!
//! Converts `:::aside` / `:::sidebox` blocks into styled container elements
//! ahead of the host parse:
//!
//! ```text
//! :::aside
//! Content here
//! :::
//! ```
//!
//! becomes
//!
//! ```text
//! <aside class="aside">
//! <span id="aside-0"></span>
//!
//! Content here
//!
//! </aside>
//! ```
//!
//! Lines inside fenced code blocks pass through untouched, unsupported
//! directive names are left alone, and containers still open at end of
//! input are closed automatically.

use crate::registry::RegistryConfig;
use crate::writer::ContainerWriter;
use idiodoc_core::{
    FenceEvent, FenceTracker, SerialCounter, is_container_closer, parse_container_opening,
};

/// Rewrite container directives in `input`.
///
/// Serial numbers are drawn from `counter`, which the caller scopes to one
/// document build. Returns the rewritten document and the number of
/// containers opened.
pub fn rewrite_containers(
    input: &str,
    registry: &RegistryConfig,
    counter: &mut SerialCounter,
) -> (String, usize) {
    let mut fences = FenceTracker::new();
    let mut writer = ContainerWriter::new();
    let mut count = 0usize;

    for line in input.lines() {
        if fences.feed(line) != FenceEvent::Outside {
            // Fence marker or fence interior; never directive syntax.
            writer.push_line(line);
            continue;
        }

        if let Some(opening) = parse_container_opening(line) {
            if let Some(mapping) = registry.container_for_directive(&opening.name) {
                let serial = counter.next_serial(&opening.name);
                writer.visit(mapping.node(serial));
                count += 1;
                continue;
            }
            // Recognized syntax but unregistered name: passthrough.
            writer.push_line(line);
            continue;
        }

        if is_container_closer(line) {
            if writer.depart().is_ok() {
                continue;
            }
            // A ':::' with nothing open is ordinary text.
            writer.push_line(line);
            continue;
        }

        writer.push_line(line);
    }

    let (output, auto_closed) = writer.finish();
    if auto_closed > 0 {
        log::warn!("auto-closed {auto_closed} container(s) left open at end of input");
    }
    log::debug!("rewrote {count} container directive(s)");
    (output, count)
}
