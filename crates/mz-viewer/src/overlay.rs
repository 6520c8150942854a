//! Fullscreen overlay presenter.
//!
//! Opens a deep copy of a wrapped diagram in a full-window modal with its own
//! Transform State and handlers. The copy shares nothing with the in-page
//! instance, so closing the modal cannot affect it.

use crate::viewport::Viewport;
use crate::wrapper::{control_button, scale_indicator};
use mz_core::classes;
use mz_core::{
    ControlKind, Cursor, Document, Element, ElementRef, NodeIndex, Rect, ScaleLimits, StyleProp,
    Transform, TransformState, ZoomConfig,
};

pub struct Overlay {
    modal: ElementRef,
    pub viewport: Viewport,
    /// The first fit waits for the modal to be laid out.
    pending_fit: bool,
}

impl Overlay {
    /// Build the modal for `source` and append it to the body.
    ///
    /// Returns `None` if the source diagram is gone.
    pub fn open(doc: &mut Document, source: &Viewport, config: &ZoomConfig) -> Option<Self> {
        let original = doc.resolve(source.state.owner)?;
        let copy = doc.clone_subtree(original)?;
        doc.set_style(copy, StyleProp::Display("block".into()));

        let modal = doc.create_element(Element::div(classes::MODAL));
        let header = doc.create_child(modal, Element::div(classes::MODAL_HEADER));
        doc.create_child(
            header,
            control_button(ControlKind::Close).with_classes(classes::MODAL_CLOSE),
        );

        let content = doc.create_child(modal, Element::div(classes::MODAL_CONTENT));
        let zoom_container = doc.create_child(content, Element::div(classes::MODAL_ZOOM_CONTAINER));
        let wrapper = doc.create_child(zoom_container, Element::div(classes::MODAL_WRAPPER));
        doc.set_style(wrapper, StyleProp::TransformOrigin("0 0".into()));
        doc.append_child(wrapper, copy);
        doc.set_style(zoom_container, StyleProp::Cursor(Some(Cursor::Grab)));

        let controls = doc.create_child(content, Element::div(classes::MODAL_CONTROLS));
        for kind in [ControlKind::ZoomIn, ControlKind::ZoomOut, ControlKind::Reset] {
            doc.create_child(controls, control_button(kind));
        }
        let indicator = doc.create_child(controls, scale_indicator());

        let body = doc.body;
        doc.append_child(body, modal);
        // Until the host measures it, the zoom area fills the window.
        doc.set_rect(zoom_container, Rect::from_size(doc.window));

        let mut state = TransformState::new(
            doc.reference(copy)?,
            doc.reference(zoom_container)?,
            doc.reference(wrapper)?,
            source.state.natural_size(),
            ScaleLimits::from_config(config),
        );
        state.indicator = doc.reference(indicator);

        let mut viewport = Viewport::modal(state, config);
        viewport.apply_transform(doc, Transform::IDENTITY);
        log::debug!("overlay opened for diagram {:?}", original);

        Some(Self {
            modal: doc.reference(modal)?,
            viewport,
            pending_fit: true,
        })
    }

    /// Run the deferred first fit. Returns `true` if it ran.
    pub fn animation_frame(&mut self, doc: &mut Document) -> bool {
        if !std::mem::take(&mut self.pending_fit) {
            return false;
        }
        self.viewport.fit(doc);
        true
    }

    pub fn is_fit_pending(&self) -> bool {
        self.pending_fit
    }

    /// True if `idx` is part of the modal layer.
    pub fn contains(&self, doc: &Document, idx: NodeIndex) -> bool {
        let uid = self.modal.uid;
        doc.closest(idx, |el| el.uid == uid).is_some()
    }

    pub fn modal(&self) -> ElementRef {
        self.modal
    }

    /// Remove the modal subtree. Consumes the overlay and its state.
    pub fn close(self, doc: &mut Document) {
        if let Some(modal) = doc.resolve(self.modal) {
            doc.remove_subtree(modal);
        }
        log::debug!("overlay closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrapper::wrap_diagram;
    use mz_core::{Role, Size};
    use pretty_assertions::assert_eq;

    fn wrapped() -> (Document, Viewport, ZoomConfig) {
        let config = ZoomConfig::default();
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let host = doc.import_child(doc.body, Element::div("mermaid").with_size(400.0, 300.0));
        let svg = doc.import_child(
            host,
            Element::new("svg")
                .with_id("mermaid-7")
                .with_size(400.0, 300.0),
        );
        doc.import_child(svg, Element::new("g"));
        let vp = wrap_diagram(&mut doc, svg, &config).unwrap();
        (doc, vp, config)
    }

    #[test]
    fn modal_scaffold() {
        let (mut doc, vp, config) = wrapped();
        let overlay = Overlay::open(&mut doc, &vp, &config).unwrap();
        let modal = overlay.modal().index;

        assert_eq!(doc.children(doc.body).last(), Some(&modal));
        let [header, content] = doc.children(modal) else {
            panic!("modal should have header and content");
        };
        assert!(doc.has_class(*header, classes::MODAL_HEADER));
        let close = doc.children(*header)[0];
        assert_eq!(
            doc.get(close).unwrap().role,
            Some(Role::Control(ControlKind::Close))
        );
        assert!(doc.has_class(*content, classes::MODAL_CONTENT));

        let copy = overlay.viewport.state.owner.index;
        assert_ne!(copy, vp.state.owner.index);
        assert_eq!(doc.get(copy).unwrap().style.display.as_deref(), Some("block"));
        assert_eq!(doc.children(copy).len(), 1);
        assert_eq!(
            doc.parent(copy),
            Some(overlay.viewport.state.content.index)
        );
    }

    #[test]
    fn starts_at_scale_one_then_fits_on_frame() {
        let (mut doc, vp, config) = wrapped();
        let mut overlay = Overlay::open(&mut doc, &vp, &config).unwrap();
        assert_eq!(overlay.viewport.state.transform(), Transform::IDENTITY);
        assert!(overlay.is_fit_pending());

        // 1000×800 window minus 40 per side leaves 920×720: min(2.3, 2.4, 2) = 2.
        assert!(overlay.animation_frame(&mut doc));
        let t = overlay.viewport.state.transform();
        assert_eq!(t.scale, 2.0);
        assert!((t.translate.x - 100.0).abs() < 1e-4);
        assert!((t.translate.y - 100.0).abs() < 1e-4);
        assert!(!overlay.animation_frame(&mut doc));
    }

    #[test]
    fn close_leaves_in_page_instance_untouched() {
        let (mut doc, mut vp, config) = wrapped();
        vp.apply_transform(&mut doc, Transform::new(1.7, 12.0, 8.0));
        let before = vp.state.transform();
        let nodes_before = doc.len();

        let mut overlay = Overlay::open(&mut doc, &vp, &config).unwrap();
        overlay.animation_frame(&mut doc);
        overlay.viewport.control(&mut doc, &config, ControlKind::ZoomIn);
        overlay.close(&mut doc);

        assert_eq!(vp.state.transform(), before);
        assert_eq!(doc.len(), nodes_before);
        assert!(doc.resolve(vp.state.owner).is_some());
        assert!(doc.is_attached(vp.state.owner.index));
    }

    #[test]
    fn missing_source_opens_nothing() {
        let (mut doc, vp, config) = wrapped();
        doc.forget_subtree(vp.state.container.index);
        assert!(Overlay::open(&mut doc, &vp, &config).is_none());
    }
}
