//! Diagram discovery and the wrapped-viewport registry.
//!
//! A diagram is wrapped at most once. Two independent guards enforce it:
//! the processed-identity set (survives element removal) and the content
//! marker on the unit's parent (derived from the live scaffold itself).

use crate::viewport::Viewport;
use crate::wrapper::wrap_diagram;
use mz_core::classes;
use mz_core::{
    Document, NodeIndex, Uid, ZoomConfig, find_diagrams, has_zoom_container, is_in_chrome,
};
use std::collections::{HashMap, HashSet};

/// Process-scoped discovery state. Create one per plugin activation.
#[derive(Debug)]
pub struct Registry {
    config: ZoomConfig,
    /// Diagram identities already wrapped. Stale entries only cause a skip.
    processed: HashSet<Uid>,
    /// Live viewports keyed by their container's identity.
    viewports: HashMap<Uid, Viewport>,
}

impl Registry {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            processed: HashSet::new(),
            viewports: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// True if `idx` is a diagram that may be wrapped now.
    pub fn is_eligible(&self, doc: &Document, idx: NodeIndex) -> bool {
        let Some(el) = doc.get(idx) else {
            return false;
        };
        !self.processed.contains(&el.uid)
            && !has_zoom_container(doc, idx, &self.config)
            && !is_in_chrome(doc, idx)
    }

    /// Full scan of the document. Returns the number of diagrams wrapped.
    pub fn scan(&mut self, doc: &mut Document) -> usize {
        self.prune_detached(doc);
        let body = doc.body;
        self.process(doc, body)
    }

    /// Continuous pass over host-inserted nodes (each searched inclusively).
    pub fn on_nodes_inserted(&mut self, doc: &mut Document, nodes: &[NodeIndex]) -> usize {
        let mut wrapped = 0;
        for &node in nodes {
            if doc.is_attached(node) {
                wrapped += self.process(doc, node);
            }
        }
        wrapped
    }

    fn process(&mut self, doc: &mut Document, root: NodeIndex) -> usize {
        let mut wrapped = 0;
        for diagram in find_diagrams(doc, root, &self.config) {
            if !self.is_eligible(doc, diagram) {
                continue;
            }
            let Some(uid) = doc.get(diagram).map(|el| el.uid) else {
                continue;
            };
            match wrap_diagram(doc, diagram, &self.config) {
                Ok(viewport) => {
                    self.processed.insert(uid);
                    self.viewports.insert(viewport.state.container.uid, viewport);
                    wrapped += 1;
                }
                Err(skip) => log::debug!("skipped diagram {:?}: {}", diagram, skip),
            }
        }
        wrapped
    }

    /// Drop viewports whose container left the document.
    pub fn prune_detached(&mut self, doc: &Document) -> usize {
        let before = self.viewports.len();
        self.viewports.retain(|_, vp| vp.is_attached(doc));
        let dropped = before - self.viewports.len();
        if dropped > 0 {
            log::debug!("dropped {dropped} detached viewport(s)");
        }
        dropped
    }

    /// The viewport whose container encloses `idx`.
    pub fn viewport_for(&mut self, doc: &Document, idx: NodeIndex) -> Option<&mut Viewport> {
        let container = doc.closest(idx, |el| el.has_class(classes::CONTAINER))?;
        let uid = doc.get(container)?.uid;
        self.viewports.get_mut(&uid)
    }

    pub fn viewports_mut(&mut self) -> impl Iterator<Item = &mut Viewport> {
        self.viewports.values_mut()
    }

    pub fn viewports(&self) -> impl Iterator<Item = &Viewport> {
        self.viewports.values()
    }

    pub fn len(&self) -> usize {
        self.viewports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewports.is_empty()
    }

    pub fn is_processed(&self, uid: Uid) -> bool {
        self.processed.contains(&uid)
    }

    /// Forget everything (plugin teardown).
    pub fn clear(&mut self) {
        self.viewports.clear();
        self.processed.clear();
    }
}
