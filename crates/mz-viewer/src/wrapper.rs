//! Viewport scaffold construction.
//!
//! ```text
//! <div class="mermaid-zoom-container">          inserted where the unit was
//!   <div class="mermaid-zoom-content">          transform target, origin 0 0
//!     <div class="mermaid">…<svg/></div>        the relocated unit
//!   </div>
//!   <div class="mermaid-zoom-controls">+ - ⟲ 100% ⛶</div>
//!   <div class="mermaid-resize-top-left"/> …    8 handles
//! </div>
//! ```

use crate::viewport::{Frame, Viewport};
use mz_core::classes;
use mz_core::matching::diagram_host_of;
use mz_core::{
    ControlKind, Cursor, Document, Element, HandleEdge, NodeIndex, Rect, Role, ScaleLimits, Size,
    StyleProp, TransformState, ZoomConfig, has_zoom_container,
};
use std::fmt;

/// Why a diagram was left unwrapped. Every variant means "try again next pass".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapSkip {
    /// The relocatable unit has no parent to hold the container.
    NoParent,
    /// The unit already sits inside a content wrapper.
    AlreadyWrapped,
    /// The element is not (or no longer) in the document.
    Detached,
}

impl fmt::Display for WrapSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoParent => write!(f, "diagram has no parent"),
            Self::AlreadyWrapped => write!(f, "diagram is already wrapped"),
            Self::Detached => write!(f, "diagram is not attached to the document"),
        }
    }
}

/// Fullscreen icon: four corner brackets on a 16×16 grid.
const FULLSCREEN_ICON: [&str; 4] = ["1,10 1,15 6,15", "15,10 15,15 10,15", "1,6 1,1 6,1", "15,6 15,1 10,1"];

/// The diagram itself, or its host container when it has one.
pub fn relocatable_unit(doc: &Document, diagram: NodeIndex, config: &ZoomConfig) -> NodeIndex {
    diagram_host_of(doc, diagram, config).unwrap_or(diagram)
}

/// Initial container box for a unit of `measured` size inside a parent
/// `parent_width` wide: padded, capped to the parent, never taller than wide.
pub fn initial_frame(measured: Size, parent_width: f32, config: &ZoomConfig) -> Frame {
    let available = if parent_width > 0.0 {
        parent_width
    } else {
        config.fallback_parent_width
    };
    let width = (measured.width + config.container_padding_x).min(available);
    let height = (measured.height + config.container_padding_y).min(width);
    Frame::new(width, height)
}

/// Wrap one diagram element in place and return its ready viewport.
///
/// # Errors
/// Returns the reason the diagram was skipped. Nothing is mutated in that case.
pub fn wrap_diagram(
    doc: &mut Document,
    diagram: NodeIndex,
    config: &ZoomConfig,
) -> Result<Viewport, WrapSkip> {
    if !doc.is_attached(diagram) {
        return Err(WrapSkip::Detached);
    }
    if has_zoom_container(doc, diagram, config) {
        return Err(WrapSkip::AlreadyWrapped);
    }
    let unit = relocatable_unit(doc, diagram, config);
    let parent = doc.parent(unit).ok_or(WrapSkip::NoParent)?;

    let unit_rect = doc.get(unit).map(|el| el.rect).unwrap_or_default();
    let natural = doc
        .get(diagram)
        .map(|el| el.rect.size())
        .unwrap_or_default()
        .or_fallback(config.fallback_diagram_size);
    let parent_width = doc.get(parent).map_or(0.0, |el| el.rect.width);
    let frame = initial_frame(natural, parent_width, config);

    // Container takes the unit's place; the unit moves into the content wrapper.
    let container = doc.create_element(Element::div(classes::CONTAINER));
    doc.insert_before(parent, container, unit);
    doc.set_style(container, StyleProp::Width(frame.width));
    doc.set_style(container, StyleProp::Height(frame.height));
    doc.set_rect(
        container,
        Rect::new(unit_rect.x, unit_rect.y, frame.width, frame.height),
    );

    let content = doc.create_child(container, Element::div(classes::CONTENT));
    doc.set_style(content, StyleProp::TransformOrigin("0 0".into()));
    doc.append_child(content, unit);

    let controls = doc.create_child(container, Element::div(classes::CONTROLS));
    for kind in [ControlKind::ZoomIn, ControlKind::ZoomOut, ControlKind::Reset] {
        doc.create_child(controls, control_button(kind));
    }
    let indicator = doc.create_child(controls, scale_indicator());
    fullscreen_button(doc, controls);

    for edge in HandleEdge::ALL {
        let handle = Element::div(&classes::resize_handle(edge)).with_role(Role::ResizeHandle(edge));
        doc.create_child(container, handle);
    }
    doc.set_style(container, StyleProp::Cursor(Some(Cursor::Grab)));

    let (Some(owner), Some(container_ref), Some(content_ref)) = (
        doc.reference(diagram),
        doc.reference(container),
        doc.reference(content),
    ) else {
        return Err(WrapSkip::Detached);
    };
    let mut state = TransformState::new(
        owner,
        container_ref,
        content_ref,
        natural,
        ScaleLimits::from_config(config),
    );
    state.indicator = doc.reference(indicator);

    let mut viewport = Viewport::in_page(state, frame, config);
    viewport.fit(doc);
    log::debug!(
        "wrapped diagram {:?}: frame {}x{}, natural {}x{}, scale {}",
        diagram,
        frame.width,
        frame.height,
        natural.width,
        natural.height,
        viewport.state.scale()
    );
    Ok(viewport)
}

/// A zoom/reset/close button.
pub(crate) fn control_button(kind: ControlKind) -> Element {
    let mut button = Element::new("button")
        .with_classes(classes::BUTTON)
        .with_role(Role::Control(kind))
        .with_attr("title", control_title(kind));
    if let Some(label) = kind.label() {
        button = button.with_text(label);
    }
    button
}

pub(crate) fn scale_indicator() -> Element {
    Element::div(classes::SCALE)
        .with_role(Role::ScaleIndicator)
        .with_text("100%")
}

fn control_title(kind: ControlKind) -> &'static str {
    match kind {
        ControlKind::ZoomIn => "Zoom in",
        ControlKind::ZoomOut => "Zoom out",
        ControlKind::Reset => "Reset zoom",
        ControlKind::Fullscreen => "Fullscreen",
        ControlKind::Close => "Close",
    }
}

fn fullscreen_button(doc: &mut Document, controls: NodeIndex) -> NodeIndex {
    let button = doc.create_child(
        controls,
        control_button(ControlKind::Fullscreen).with_classes(classes::FULLSCREEN_BUTTON),
    );
    let icon = doc.create_child(
        button,
        Element::new("svg")
            .with_attr("viewBox", "0 0 16 16")
            .with_attr("width", "16")
            .with_attr("height", "16"),
    );
    for points in FULLSCREEN_ICON {
        doc.create_child(icon, Element::new("polyline").with_attr("points", points));
    }
    button
}
