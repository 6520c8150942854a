//! Diagram matching predicates.
//!
//! A diagram element is the rendering engine's output node. The host produces
//! it in one of two shapes, and both are matched:
//!
//! - nested anywhere inside a container carrying the host class
//!   (`<div class="mermaid"><svg>…</svg></div>`), or
//! - carrying an identifier with the engine's prefix (`<svg id="mermaid-…">`).

use crate::classes;
use crate::config::ZoomConfig;
use crate::model::{Document, Element};
use petgraph::graph::NodeIndex;

/// True if `el` is a diagram host container.
pub fn is_diagram_host(el: &Element, config: &ZoomConfig) -> bool {
    !config.host_class.is_empty() && el.has_class(&config.host_class)
}

/// True if `idx` is a diagram element under either matching rule.
pub fn is_diagram_element(doc: &Document, idx: NodeIndex, config: &ZoomConfig) -> bool {
    let Some(el) = doc.get(idx) else {
        return false;
    };
    if !el.is_tag(&config.diagram_tag) {
        return false;
    }
    let prefixed = !config.id_prefix.is_empty()
        && el.id.is_some_and(|id| id.starts_with(&config.id_prefix));
    prefixed || diagram_host_of(doc, idx, config).is_some()
}

/// Nearest strict ancestor that is a diagram host.
pub fn diagram_host_of(doc: &Document, idx: NodeIndex, config: &ZoomConfig) -> Option<NodeIndex> {
    let parent = doc.parent(idx)?;
    doc.closest(parent, |el| is_diagram_host(el, config))
}

/// True if `idx` sits inside plugin chrome: the fullscreen overlay layer or a
/// control bar. Nothing in there is ever a wrapping candidate.
pub fn is_in_chrome(doc: &Document, idx: NodeIndex) -> bool {
    doc.closest(idx, |el| {
        el.has_class(classes::MODAL) || el.has_class(classes::CONTROLS)
    })
    .is_some()
}

/// True if the diagram (or its host wrapper) already sits in a wrapped content region.
///
/// Walks up to the nearest host container; the unit that would be relocated is
/// that host (or the diagram itself without one), and its parent carries the
/// content marker once wrapped.
pub fn has_zoom_container(doc: &Document, idx: NodeIndex, config: &ZoomConfig) -> bool {
    let unit = diagram_host_of(doc, idx, config).unwrap_or(idx);
    doc.parent(unit)
        .is_some_and(|p| doc.has_class(p, classes::CONTENT))
}

/// All diagram elements in the subtree rooted at `root` (inclusive), in document order.
pub fn find_diagrams(doc: &Document, root: NodeIndex, config: &ZoomConfig) -> Vec<NodeIndex> {
    doc.descendants(root)
        .into_iter()
        .filter(|&idx| is_diagram_element(doc, idx, config))
        .collect()
}
