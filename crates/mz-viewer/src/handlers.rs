//! Interaction handlers.
//!
//! Each handler translates input events into `ViewMutation`s for the viewport
//! it is bound to. Handlers read the Transform State but never write it; the
//! viewport applies their output through its single apply step.
//!
//! | Handler | Events | Produces |
//! |---------|--------|----------|
//! | `WheelZoom` | wheel | anchored zoom |
//! | `DragPan` | primary press / move / release | pan, cursor |
//! | `TouchGestures` | touch start / move / end | one-finger pan, pinch |
//! | `ResizeDrag` | handle press / move / release | frame, body cursor, refit |

use crate::input::{InputEvent, PRIMARY_BUTTON, Touches};
use crate::viewport::{Frame, Presentation, ViewMutation};
use mz_core::{Cursor, HandleEdge, Point, Rect, Role, TransformState, ZoomConfig};

/// Read-only view of a viewport handed to handlers with each event.
pub struct ViewInput<'a> {
    pub state: &'a TransformState,
    pub presentation: Presentation,
    /// Current in-page box (default-sized in the modal).
    pub frame: Frame,
    /// Host-measured client rect of the container.
    pub container_rect: Rect,
    pub config: &'a ZoomConfig,
    /// Role of the nearest scaffold control under the event target, if any.
    pub target: Option<Role>,
}

/// Trait for handlers that interpret input and produce mutations.
pub trait Handler {
    /// Handle an input event, returning zero or more mutations.
    fn handle(&mut self, event: &InputEvent, view: &ViewInput) -> Vec<ViewMutation>;
}

// ─── Wheel Zoom ──────────────────────────────────────────────────────────

/// Zoom by a fixed factor per wheel tick, anchored at the pointer.
#[derive(Debug, Default)]
pub struct WheelZoom;

impl Handler for WheelZoom {
    fn handle(&mut self, event: &InputEvent, view: &ViewInput) -> Vec<ViewMutation> {
        let InputEvent::Wheel { x, y, delta_y } = *event else {
            return vec![];
        };
        if delta_y == 0.0 {
            return vec![];
        }
        let factor = if delta_y < 0.0 {
            view.config.wheel_zoom_in
        } else {
            view.config.wheel_zoom_out
        };
        let anchor = view.container_rect.to_local(Point::new(x, y));
        view.state
            .zoom_by(factor, anchor)
            .map(ViewMutation::SetTransform)
            .into_iter()
            .collect()
    }
}

// ─── Drag Pan ────────────────────────────────────────────────────────────

/// Primary-button drag pans the content.
#[derive(Debug, Default)]
pub struct DragPan {
    /// Set between a press this handler accepted and the matching release.
    active: bool,
}

impl DragPan {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Handler for DragPan {
    fn handle(&mut self, event: &InputEvent, view: &ViewInput) -> Vec<ViewMutation> {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                // Presses on buttons and handles belong to those controls.
                if button != PRIMARY_BUTTON || view.target.is_some() {
                    return vec![];
                }
                self.active = true;
                vec![
                    ViewMutation::BeginDrag(Point::new(x, y)),
                    ViewMutation::SetCursor(Cursor::Grabbing),
                ]
            }
            InputEvent::PointerMove { x, y } if self.active => {
                vec![ViewMutation::SetTransform(
                    view.state.drag_to(Point::new(x, y)),
                )]
            }
            InputEvent::PointerUp { .. } if self.active => {
                self.active = false;
                vec![ViewMutation::EndDrag, ViewMutation::SetCursor(Cursor::Grab)]
            }
            _ => vec![],
        }
    }
}

// ─── Touch Gestures ──────────────────────────────────────────────────────

/// Scale and finger distance captured when a pinch starts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchBaseline {
    distance: f32,
    scale: f32,
}

/// One finger pans, two fingers pinch-zoom.
#[derive(Debug, Default)]
pub struct TouchGestures {
    pinch: Option<PinchBaseline>,
    panning: bool,
}

impl TouchGestures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Record a baseline, unless the fingers coincide.
    fn baseline(touches: &Touches, scale: f32) -> Option<PinchBaseline> {
        let distance = touches[0].distance(touches[1]);
        (distance > 0.0).then_some(PinchBaseline { distance, scale })
    }
}

impl Handler for TouchGestures {
    fn handle(&mut self, event: &InputEvent, view: &ViewInput) -> Vec<ViewMutation> {
        match event {
            InputEvent::TouchStart { touches } => {
                if view.target.is_some() {
                    return vec![];
                }
                match touches.len() {
                    1 => {
                        self.pinch = None;
                        self.panning = true;
                        vec![ViewMutation::BeginDrag(touches[0])]
                    }
                    2 => {
                        self.pinch = Self::baseline(touches, view.state.scale());
                        if std::mem::take(&mut self.panning) {
                            vec![ViewMutation::EndDrag]
                        } else {
                            vec![]
                        }
                    }
                    _ => vec![],
                }
            }
            InputEvent::TouchMove { touches } => match touches.len() {
                1 if self.panning => {
                    vec![ViewMutation::SetTransform(view.state.drag_to(touches[0]))]
                }
                2 => {
                    // No ratio until a baseline distance exists.
                    let Some(base) = self.pinch else {
                        self.pinch = Self::baseline(touches, view.state.scale());
                        return vec![];
                    };
                    let distance = touches[0].distance(touches[1]);
                    let target = view.state.with_scale(base.scale * (distance / base.distance));
                    if target.scale == view.state.scale() {
                        return vec![];
                    }
                    vec![ViewMutation::SetTransform(target)]
                }
                _ => vec![],
            },
            InputEvent::TouchEnd { touches } => {
                if touches.len() < 2 {
                    self.pinch = None;
                }
                if std::mem::take(&mut self.panning) {
                    vec![ViewMutation::EndDrag]
                } else {
                    vec![]
                }
            }
            _ => vec![],
        }
    }
}

// ─── Resize Drag ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct ResizeStart {
    edge: HandleEdge,
    pointer: Point,
    frame: Frame,
}

/// Dragging one of the 8 handles resizes the in-page container.
///
/// Left/top handles shift a compensating margin so the opposite edge stays
/// put. Release re-fits the content to the new box.
#[derive(Debug, Default)]
pub struct ResizeDrag {
    start: Option<ResizeStart>,
}

impl ResizeDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Container box for the pointer now at `pointer`.
    fn frame_at(start: &ResizeStart, pointer: Point, config: &ZoomConfig) -> Frame {
        let dx = pointer.x - start.pointer.x;
        let dy = pointer.y - start.pointer.y;
        let from = start.frame;
        let mut frame = from;

        if start.edge.moves_right() {
            frame.width = (from.width + dx).max(config.min_container_width);
        } else if start.edge.moves_left() {
            frame.width = (from.width - dx).max(config.min_container_width);
            frame.margin_left = from.margin_left + (from.width - frame.width);
        }

        if start.edge.moves_bottom() {
            frame.height = (from.height + dy).max(config.min_container_height);
        } else if start.edge.moves_top() {
            frame.height = (from.height - dy).max(config.min_container_height);
            frame.margin_top = from.margin_top + (from.height - frame.height);
        }
        frame
    }
}

impl Handler for ResizeDrag {
    fn handle(&mut self, event: &InputEvent, view: &ViewInput) -> Vec<ViewMutation> {
        if view.presentation != Presentation::InPage {
            return vec![];
        }
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                let Some(Role::ResizeHandle(edge)) = view.target else {
                    return vec![];
                };
                if button != PRIMARY_BUTTON {
                    return vec![];
                }
                self.start = Some(ResizeStart {
                    edge,
                    pointer: Point::new(x, y),
                    frame: view.frame,
                });
                vec![ViewMutation::SetBodyCursor(Some(edge.cursor()))]
            }
            InputEvent::PointerMove { x, y } => {
                let Some(start) = self.start else {
                    return vec![];
                };
                let frame = Self::frame_at(&start, Point::new(x, y), view.config);
                if frame == view.frame {
                    return vec![];
                }
                vec![ViewMutation::ResizeFrame(frame)]
            }
            InputEvent::PointerUp { .. } => {
                if self.start.take().is_none() {
                    return vec![];
                }
                vec![ViewMutation::SetBodyCursor(None), ViewMutation::Refit]
            }
            _ => vec![],
        }
    }
}
