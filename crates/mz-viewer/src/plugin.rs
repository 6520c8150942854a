//! Plugin lifecycle and event routing.
//!
//! `ZoomPlugin` is the single entry point a host drives: it owns the
//! registry and the (at most one) fullscreen overlay, reacts to host
//! lifecycle signals, and routes input events to the viewport they target.

use crate::discovery::Registry;
use crate::input::InputEvent;
use crate::overlay::Overlay;
use mz_core::{ControlKind, Document, NodeIndex, Role, ZoomConfig};
use std::time::Duration;

/// Host lifecycle notifications that re-run discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    LayoutReady,
    LayoutChange,
    ActiveLeafChange,
    /// Diagrams render asynchronously after this; scanning is deferred.
    FileOpen,
}

/// Follow-up the host should schedule after a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    None,
    /// Call `scan` again once this much time has passed.
    ScanAfter(Duration),
}

pub struct ZoomPlugin {
    config: ZoomConfig,
    registry: Registry,
    overlay: Option<Overlay>,
    /// Set between `load` and `unload`; events outside that window are ignored.
    loaded: bool,
}

impl ZoomPlugin {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            registry: Registry::new(config.clone()),
            config,
            overlay: None,
            loaded: false,
        }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Whether the document-level key listener is needed.
    pub fn wants_keys(&self) -> bool {
        self.loaded && self.overlay.is_some()
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Activate and wrap whatever is already in the document.
    pub fn load(&mut self, doc: &mut Document) -> usize {
        self.loaded = true;
        let wrapped = self.registry.scan(doc);
        log::debug!("zoom plugin loaded, {wrapped} diagram(s) wrapped");
        wrapped
    }

    /// Tear down: close the overlay and forget every viewport and identity.
    /// Wrapped scaffolds stay in the document.
    pub fn unload(&mut self, doc: &mut Document) {
        self.close_overlay(doc);
        self.registry.clear();
        self.loaded = false;
        log::debug!("zoom plugin unloaded");
    }

    /// React to a host lifecycle signal.
    pub fn signal(&mut self, doc: &mut Document, signal: HostSignal) -> Schedule {
        if !self.loaded {
            return Schedule::None;
        }
        match signal {
            HostSignal::LayoutReady | HostSignal::LayoutChange | HostSignal::ActiveLeafChange => {
                self.registry.scan(doc);
                Schedule::None
            }
            HostSignal::FileOpen => Schedule::ScanAfter(Duration::from_millis(u64::from(
                self.config.file_open_delay_ms,
            ))),
        }
    }

    /// Full discovery pass.
    pub fn scan(&mut self, doc: &mut Document) -> usize {
        if !self.loaded {
            return 0;
        }
        self.registry.scan(doc)
    }

    /// Continuous discovery over host-inserted nodes.
    pub fn nodes_inserted(&mut self, doc: &mut Document, nodes: &[NodeIndex]) -> usize {
        if !self.loaded {
            return 0;
        }
        self.registry.on_nodes_inserted(doc, nodes)
    }

    /// The host removed content; drop viewports that went with it.
    pub fn nodes_removed(&mut self, doc: &mut Document) {
        if !self.loaded {
            return;
        }
        self.registry.prune_detached(doc);
        let gone = self
            .overlay
            .as_ref()
            .is_some_and(|o| doc.resolve(o.modal()).is_none());
        if gone {
            self.overlay = None;
        }
    }

    /// Run deferred work scheduled for the next animation frame.
    pub fn animation_frame(&mut self, doc: &mut Document) -> bool {
        self.overlay
            .as_mut()
            .is_some_and(|overlay| overlay.animation_frame(doc))
    }

    // ─── Overlay ─────────────────────────────────────────────────────────

    /// Open the fullscreen overlay for the viewport enclosing `target`,
    /// closing any overlay already open.
    pub fn open_overlay(&mut self, doc: &mut Document, target: NodeIndex) -> bool {
        self.close_overlay(doc);
        let Some(source) = self.registry.viewport_for(doc, target) else {
            return false;
        };
        self.overlay = Overlay::open(doc, source, &self.config);
        self.overlay.is_some()
    }

    pub fn close_overlay(&mut self, doc: &mut Document) -> bool {
        match self.overlay.take() {
            Some(overlay) => {
                overlay.close(doc);
                true
            }
            None => false,
        }
    }

    // ─── Input routing ───────────────────────────────────────────────────

    /// Route one input event. `target` is the event's target node, if the
    /// host could map it. Returns `true` if anything changed.
    pub fn handle_event(
        &mut self,
        doc: &mut Document,
        target: Option<NodeIndex>,
        event: &InputEvent,
    ) -> bool {
        if !self.loaded {
            return false;
        }
        match event {
            InputEvent::Key { key } => key == "Escape" && self.close_overlay(doc),
            InputEvent::Click => match target {
                Some(target) => self.click(doc, target),
                None => false,
            },
            // Document-wide listeners: drags and resizes continue outside
            // the container they started in.
            _ if event.is_document_level() => {
                let mut changed = false;
                for viewport in self.registry.viewports_mut() {
                    changed |= viewport.dispatch(doc, &self.config, event, None);
                }
                if let Some(overlay) = self.overlay.as_mut() {
                    changed |= overlay.viewport.dispatch(doc, &self.config, event, None);
                }
                changed
            }
            _ => match target {
                Some(target) => self.targeted(doc, target, event),
                None => false,
            },
        }
    }

    /// Wheel, press and touch events go to the viewport under the target.
    fn targeted(&mut self, doc: &mut Document, target: NodeIndex, event: &InputEvent) -> bool {
        let role = role_at(doc, target);
        if let Some(overlay) = self.overlay.as_mut().filter(|o| o.contains(doc, target)) {
            // Only the zoom area pans and zooms.
            if !overlay.viewport.contains(doc, target) {
                return false;
            }
            return overlay.viewport.dispatch(doc, &self.config, event, role);
        }
        match self.registry.viewport_for(doc, target) {
            Some(viewport) => viewport.dispatch(doc, &self.config, event, role),
            None => false,
        }
    }

    fn click(&mut self, doc: &mut Document, target: NodeIndex) -> bool {
        let Some(Role::Control(kind)) = role_at(doc, target) else {
            return false;
        };
        let in_overlay = self
            .overlay
            .as_ref()
            .is_some_and(|o| o.contains(doc, target));
        if in_overlay {
            if kind == ControlKind::Close {
                return self.close_overlay(doc);
            }
            return self
                .overlay
                .as_mut()
                .is_some_and(|o| o.viewport.control(doc, &self.config, kind));
        }
        if kind == ControlKind::Fullscreen {
            return self.open_overlay(doc, target);
        }
        match self.registry.viewport_for(doc, target) {
            Some(viewport) => viewport.control(doc, &self.config, kind),
            None => false,
        }
    }
}

/// Role of the nearest scaffold control enclosing `idx`.
fn role_at(doc: &Document, idx: NodeIndex) -> Option<Role> {
    doc.closest(idx, |el| el.role.is_some())
        .and_then(|node| doc.get(node))
        .and_then(|el| el.role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mz_core::{Element, Size, classes};
    use pretty_assertions::assert_eq;

    fn loaded() -> (Document, ZoomPlugin) {
        let mut doc = Document::new(Size::new(1280.0, 800.0));
        let host = doc.import_child(doc.body, Element::div("mermaid").with_size(400.0, 300.0));
        doc.import_child(host, Element::new("svg"));
        let mut plugin = ZoomPlugin::new(ZoomConfig::default());
        assert_eq!(plugin.load(&mut doc), 1);
        (doc, plugin)
    }

    fn find_role(doc: &Document, role: Role) -> NodeIndex {
        doc.descendants(doc.body)
            .into_iter()
            .find(|&n| doc.get(n).is_some_and(|el| el.role == Some(role)))
            .unwrap()
    }

    #[test]
    fn signals_scan_or_defer() {
        let (mut doc, mut plugin) = loaded();
        doc.import_child(doc.body, Element::new("svg").with_id("mermaid-late"));
        assert_eq!(
            plugin.signal(&mut doc, HostSignal::FileOpen),
            Schedule::ScanAfter(Duration::from_millis(200))
        );
        assert_eq!(plugin.registry().len(), 1);
        assert_eq!(plugin.signal(&mut doc, HostSignal::LayoutChange), Schedule::None);
        assert_eq!(plugin.registry().len(), 2);
    }

    #[test]
    fn fullscreen_click_opens_and_escape_closes() {
        let (mut doc, mut plugin) = loaded();
        let button = find_role(&doc, Role::Control(ControlKind::Fullscreen));
        assert!(plugin.handle_event(&mut doc, Some(button), &InputEvent::Click));
        assert!(plugin.wants_keys());

        let other = InputEvent::Key { key: "Enter".into() };
        assert!(!plugin.handle_event(&mut doc, None, &other));
        let escape = InputEvent::Key { key: "Escape".into() };
        assert!(plugin.handle_event(&mut doc, None, &escape));
        assert!(plugin.overlay().is_none());
        assert!(!plugin.wants_keys());
    }

    #[test]
    fn second_fullscreen_replaces_first() {
        let (mut doc, mut plugin) = loaded();
        let button = find_role(&doc, Role::Control(ControlKind::Fullscreen));
        plugin.handle_event(&mut doc, Some(button), &InputEvent::Click);
        plugin.handle_event(&mut doc, Some(button), &InputEvent::Click);
        let modals = doc
            .descendants(doc.body)
            .into_iter()
            .filter(|&n| doc.has_class(n, classes::MODAL))
            .count();
        assert_eq!(modals, 1);
    }

    #[test]
    fn modal_close_button() {
        let (mut doc, mut plugin) = loaded();
        let button = find_role(&doc, Role::Control(ControlKind::Fullscreen));
        plugin.handle_event(&mut doc, Some(button), &InputEvent::Click);
        let close = find_role(&doc, Role::Control(ControlKind::Close));
        assert!(plugin.handle_event(&mut doc, Some(close), &InputEvent::Click));
        assert!(plugin.overlay().is_none());
    }

    #[test]
    fn events_after_unload_are_ignored() {
        let (mut doc, mut plugin) = loaded();
        let zoom_in = find_role(&doc, Role::Control(ControlKind::ZoomIn));
        plugin.unload(&mut doc);
        assert!(!plugin.handle_event(&mut doc, Some(zoom_in), &InputEvent::Click));
        assert_eq!(plugin.scan(&mut doc), 0);
        assert!(plugin.registry().is_empty());
    }

    #[test]
    fn hand_built_inverted_limits_still_load() {
        let config = ZoomConfig {
            min_scale: 2.0,
            max_scale: 1.0,
            ..ZoomConfig::default()
        };
        let mut doc = Document::new(Size::new(1280.0, 800.0));
        let host = doc.import_child(doc.body, Element::div("mermaid").with_size(400.0, 300.0));
        doc.import_child(host, Element::new("svg").with_size(400.0, 300.0));
        let mut plugin = ZoomPlugin::new(config);
        assert_eq!(plugin.load(&mut doc), 1);

        let zoom_in = find_role(&doc, Role::Control(ControlKind::ZoomIn));
        for _ in 0..5 {
            plugin.handle_event(&mut doc, Some(zoom_in), &InputEvent::Click);
        }
        let scale = plugin.registry().viewports().next().unwrap().state.scale();
        assert!((1.0..=2.0).contains(&scale), "scale {scale}");
    }

    #[test]
    fn removed_container_is_pruned() {
        let (mut doc, mut plugin) = loaded();
        let container = doc
            .descendants(doc.body)
            .into_iter()
            .find(|&n| doc.has_class(n, classes::CONTAINER))
            .unwrap();
        doc.forget_subtree(container);
        plugin.nodes_removed(&mut doc);
        assert!(plugin.registry().is_empty());
    }
}
