pub mod discovery;
pub mod handlers;
pub mod input;
pub mod overlay;
pub mod plugin;
pub mod viewport;
pub mod wrapper;

pub use discovery::Registry;
pub use input::InputEvent;
pub use overlay::Overlay;
pub use plugin::{HostSignal, Schedule, ZoomPlugin};
pub use viewport::{Frame, Presentation, ViewMutation, Viewport};
pub use wrapper::{WrapSkip, wrap_diagram};
