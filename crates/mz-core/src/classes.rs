//! Class names for the scaffold the plugin inserts. The host stylesheet keys on these.

use crate::model::HandleEdge;

pub const CONTAINER: &str = "mermaid-zoom-container";
/// Marks a wrapped content region; its presence means "already wrapped".
pub const CONTENT: &str = "mermaid-zoom-content";
pub const CONTROLS: &str = "mermaid-zoom-controls";
pub const BUTTON: &str = "mermaid-zoom-btn";
pub const FULLSCREEN_BUTTON: &str = "mermaid-fullscreen-btn";
pub const SCALE: &str = "mermaid-zoom-scale";
/// Put on `body` while a resize handle is being dragged.
pub const RESIZING: &str = "mermaid-zoom-resizing";

pub const MODAL: &str = "mermaid-zoom-modal";
pub const MODAL_HEADER: &str = "mermaid-zoom-modal-header";
pub const MODAL_CLOSE: &str = "mermaid-zoom-modal-close";
pub const MODAL_CONTENT: &str = "mermaid-zoom-modal-content";
pub const MODAL_ZOOM_CONTAINER: &str = "mermaid-zoom-modal-zoom-container";
pub const MODAL_WRAPPER: &str = "mermaid-zoom-modal-wrapper";
pub const MODAL_CONTROLS: &str = "mermaid-zoom-modal-controls";

pub fn resize_handle(edge: HandleEdge) -> String {
    format!("mermaid-resize-{}", edge.name())
}
