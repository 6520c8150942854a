//! One interactive viewport: a Transform State, the handlers bound to it, and
//! the single apply step that pushes state into the document.
//!
//! Handlers never touch the document. They return `ViewMutation`s, which the
//! viewport applies in order through `Viewport::apply`. Every scale/translate
//! change ends in `apply_transform`, the only place the content transform and
//! the percentage readout are written.

use crate::handlers::{DragPan, Handler, ResizeDrag, TouchGestures, ViewInput, WheelZoom};
use crate::input::InputEvent;
use mz_core::classes;
use mz_core::{
    ControlKind, Cursor, Document, FitParams, NodeIndex, Point, Rect, Role, Size, StyleProp,
    Transform, TransformState, ZoomConfig,
};

// ─── Frame ───────────────────────────────────────────────────────────────

/// The in-page container box: inline size plus the compensating margins the
/// left/top resize handles write. Shared by all 8 handles of one container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Where a viewport lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Wrapped in place inside the host document.
    InPage,
    /// Inside the fullscreen overlay.
    Modal,
}

// ─── Mutations ───────────────────────────────────────────────────────────

/// A change requested by an interaction handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMutation {
    /// Store and render a new transform (scale is clamped on write).
    SetTransform(Transform),
    /// Capture the drag anchor for a pointer/finger at this client position.
    BeginDrag(Point),
    EndDrag,
    /// Cursor on the viewport container.
    SetCursor(Cursor),
    /// New container box from a resize-handle drag.
    ResizeFrame(Frame),
    /// Document-wide cursor while a resize is in progress; `None` clears it.
    SetBodyCursor(Option<Cursor>),
    /// Re-run fit-to-container on the current box.
    Refit,
}

// ─── Viewport ────────────────────────────────────────────────────────────

pub struct Viewport {
    pub state: TransformState,
    pub presentation: Presentation,
    frame: Frame,
    params: FitParams,
    wheel: WheelZoom,
    pan: DragPan,
    touch: TouchGestures,
    resize: ResizeDrag,
}

impl Viewport {
    pub fn in_page(state: TransformState, frame: Frame, config: &ZoomConfig) -> Self {
        Self::with_params(state, Presentation::InPage, frame, FitParams::in_page(config))
    }

    pub fn modal(state: TransformState, config: &ZoomConfig) -> Self {
        Self::with_params(
            state,
            Presentation::Modal,
            Frame::default(),
            FitParams::modal(config),
        )
    }

    fn with_params(
        state: TransformState,
        presentation: Presentation,
        frame: Frame,
        params: FitParams,
    ) -> Self {
        Self {
            state,
            presentation,
            frame,
            params,
            wheel: WheelZoom,
            pan: DragPan::new(),
            touch: TouchGestures::new(),
            resize: ResizeDrag::new(),
        }
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// True while the container is still part of the live document.
    pub fn is_attached(&self, doc: &Document) -> bool {
        doc.resolve(self.state.container)
            .is_some_and(|idx| doc.is_attached(idx))
    }

    /// True if `idx` lies inside this viewport's container.
    pub fn contains(&self, doc: &Document, idx: NodeIndex) -> bool {
        let uid = self.state.container.uid;
        doc.closest(idx, |el| el.uid == uid).is_some()
    }

    /// True while a pan, pinch or resize is in progress.
    pub fn is_interacting(&self) -> bool {
        self.state.is_dragging || self.resize.is_active() || self.touch.is_pinching()
    }

    /// Size the fit and button-zoom math work against.
    ///
    /// In-page this is the frame the plugin itself sized. In the modal it is
    /// the measured zoom container, falling back to the window until laid out.
    pub fn container_size(&self, doc: &Document) -> Size {
        match self.presentation {
            Presentation::InPage => self.frame.size(),
            Presentation::Modal => self.container_rect(doc).size().or_fallback(doc.window),
        }
    }

    fn container_rect(&self, doc: &Document) -> Rect {
        doc.resolve(self.state.container)
            .and_then(|idx| doc.get(idx))
            .map(|el| el.rect)
            .unwrap_or_default()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Run an input event through every handler and apply what they produce,
    /// in order. Returns `true` if anything was applied.
    pub fn dispatch(
        &mut self,
        doc: &mut Document,
        config: &ZoomConfig,
        event: &InputEvent,
        target: Option<Role>,
    ) -> bool {
        if doc.resolve(self.state.container).is_none() {
            return false;
        }
        let container_rect = self.container_rect(doc);
        let mut mutations = Vec::new();
        {
            let input = ViewInput {
                state: &self.state,
                presentation: self.presentation,
                frame: self.frame,
                container_rect,
                config,
                target,
            };
            mutations.extend(self.resize.handle(event, &input));
            mutations.extend(self.wheel.handle(event, &input));
            mutations.extend(self.pan.handle(event, &input));
            mutations.extend(self.touch.handle(event, &input));
        }
        let changed = !mutations.is_empty();
        for mutation in mutations {
            self.apply(doc, mutation);
        }
        changed
    }

    /// Apply one handler mutation.
    pub fn apply(&mut self, doc: &mut Document, mutation: ViewMutation) {
        match mutation {
            ViewMutation::SetTransform(t) => self.apply_transform(doc, t),
            ViewMutation::BeginDrag(p) => self.state.begin_drag(p),
            ViewMutation::EndDrag => self.state.end_drag(),
            ViewMutation::SetCursor(cursor) => {
                if let Some(container) = doc.resolve(self.state.container) {
                    doc.set_style(container, StyleProp::Cursor(Some(cursor)));
                }
            }
            ViewMutation::ResizeFrame(frame) => {
                self.frame = frame;
                let Some(container) = doc.resolve(self.state.container) else {
                    return;
                };
                doc.set_style(container, StyleProp::Width(frame.width));
                doc.set_style(container, StyleProp::Height(frame.height));
                doc.set_style(container, StyleProp::MarginLeft(frame.margin_left));
                doc.set_style(container, StyleProp::MarginTop(frame.margin_top));
            }
            ViewMutation::SetBodyCursor(cursor) => {
                let body = doc.body;
                doc.set_style(body, StyleProp::Cursor(cursor));
                if cursor.is_some() {
                    doc.add_class(body, classes::RESIZING);
                } else {
                    doc.remove_class(body, classes::RESIZING);
                }
            }
            ViewMutation::Refit => self.fit(doc),
        }
    }

    /// The single apply step: store the (clamped) transform, write the CSS
    /// affine onto the content wrapper, refresh the percentage readout.
    pub fn apply_transform(&mut self, doc: &mut Document, t: Transform) {
        self.state.set_transform(t);
        let applied = self.state.transform();
        log::trace!(
            "apply scale={} translate=({}, {})",
            applied.scale,
            applied.translate.x,
            applied.translate.y
        );
        if let Some(content) = doc.resolve(self.state.content) {
            doc.set_style(content, StyleProp::Transform(applied.to_css()));
        }
        if let Some(indicator) = self.state.indicator.and_then(|r| doc.resolve(r)) {
            doc.set_text(indicator, &format!("{}%", applied.percent()));
        }
    }

    // ─── Fit & buttons ───────────────────────────────────────────────────

    /// Fit-to-container on the current box. Also what "reset" does.
    pub fn fit(&mut self, doc: &mut Document) {
        let size = self.container_size(doc);
        let t = self.state.fit(size, &self.params);
        self.apply_transform(doc, t);
    }

    /// Multiply scale by `factor` about the container's visual center.
    /// Returns `false` when the scale is already at the bound.
    pub fn zoom_button(&mut self, doc: &mut Document, factor: f32) -> bool {
        let center = Rect::from_size(self.container_size(doc)).local_center();
        match self.state.zoom_by(factor, center) {
            Some(t) => {
                self.apply_transform(doc, t);
                true
            }
            None => false,
        }
    }

    /// Zoom in/out/reset. Fullscreen and close are presentation-level and
    /// handled by the caller.
    pub fn control(&mut self, doc: &mut Document, config: &ZoomConfig, kind: ControlKind) -> bool {
        match kind {
            ControlKind::ZoomIn => self.zoom_button(doc, config.button_zoom_in),
            ControlKind::ZoomOut => self.zoom_button(doc, config.button_zoom_out),
            ControlKind::Reset => {
                self.fit(doc);
                true
            }
            ControlKind::Fullscreen | ControlKind::Close => false,
        }
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("presentation", &self.presentation)
            .field("scale", &self.state.scale())
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}
