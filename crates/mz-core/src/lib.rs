pub mod classes;
pub mod config;
pub mod geom;
pub mod id;
pub mod matching;
pub mod model;
pub mod transform;

pub use config::ZoomConfig;
pub use geom::{Insets, Point, Rect, Size};
pub use id::{Atom, Uid};
pub use matching::{
    find_diagrams, has_zoom_container, is_diagram_element, is_diagram_host, is_in_chrome,
};
pub use model::*;
pub use transform::{FitParams, ScaleLimits, Transform, TransformState, fit_transform};

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
