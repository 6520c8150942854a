//! Input abstraction layer.
//!
//! Normalizes wheel, mouse, touch, click, and keyboard events into a unified
//! `InputEvent` enum consumed by the interaction handlers. All positions are
//! client (window) coordinates.

use mz_core::Point;
use smallvec::SmallVec;

/// Active touch points, in client coordinates.
pub type Touches = SmallVec<[Point; 2]>;

/// Primary mouse button.
pub const PRIMARY_BUTTON: i16 = 0;

/// A normalized input event.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Wheel tick over a viewport. Positive `delta_y` scrolls down (zoom out).
    Wheel { x: f32, y: f32, delta_y: f32 },

    /// Mouse button pressed.
    PointerDown { x: f32, y: f32, button: i16 },

    /// Mouse moved anywhere in the document.
    PointerMove { x: f32, y: f32 },

    /// Mouse button released anywhere in the document.
    PointerUp { x: f32, y: f32 },

    /// Finger(s) touched down; `touches` lists every active touch.
    TouchStart { touches: Touches },

    /// Finger(s) moved.
    TouchMove { touches: Touches },

    /// Finger(s) lifted; `touches` lists the ones still down.
    TouchEnd { touches: Touches },

    /// Click (button activation) on the event target.
    Click,

    /// Key pressed; `key` is the `KeyboardEvent.key` value.
    Key { key: String },
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PRIMARY_BUTTON,
        }
    }

    pub fn touches(points: &[Point]) -> Touches {
        points.iter().copied().collect()
    }

    /// Events the host delivers at document level, regardless of target.
    pub fn is_document_level(&self) -> bool {
        matches!(
            self,
            Self::PointerMove { .. } | Self::PointerUp { .. } | Self::Key { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_level_events() {
        assert!(InputEvent::PointerMove { x: 0.0, y: 0.0 }.is_document_level());
        assert!(InputEvent::Key { key: "Escape".into() }.is_document_level());
        assert!(!InputEvent::pointer_down(0.0, 0.0).is_document_level());
        assert!(
            !InputEvent::TouchMove {
                touches: Touches::new()
            }
            .is_document_level()
        );
    }
}
