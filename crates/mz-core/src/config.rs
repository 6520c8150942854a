//! Plugin configuration.
//!
//! Every field has a default matching the stock behavior, so an empty JSON
//! object (or no config at all) yields a fully working setup.

use crate::geom::{Insets, Size};
use serde::Deserialize;

// ─── Config ───────────────────────────────────────────────────────────────

/// Tunables for discovery, wrapping, fitting and zoom input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Lower scale bound. Default: **0.1**.
    pub min_scale: f32,
    /// Upper scale bound. Default: **5.0**.
    pub max_scale: f32,

    /// Factor per wheel tick scrolling up. Default: **1.1**.
    pub wheel_zoom_in: f32,
    /// Factor per wheel tick scrolling down. Default: **0.9**.
    pub wheel_zoom_out: f32,
    /// Factor for the `+` button. Default: **1.2**.
    pub button_zoom_in: f32,
    /// Factor for the `-` button. Default: **0.8**.
    pub button_zoom_out: f32,

    /// Used when the diagram reports no size yet (not laid out).
    pub fallback_diagram_size: Size,
    /// Used when the diagram's parent reports no width.
    pub fallback_parent_width: f32,

    /// Added to the measured diagram width for the initial container box.
    pub container_padding_x: f32,
    /// Added to the measured diagram height (room for the control bar).
    pub container_padding_y: f32,

    /// Padding subtracted from the in-page container before fitting.
    pub inpage_insets: Insets,
    /// Padding subtracted from the modal container before fitting.
    pub modal_insets: Insets,
    /// Fit never scales past this in-page (native resolution).
    pub inpage_fit_cap: f32,
    /// Fit never scales past this in the fullscreen modal.
    pub modal_fit_cap: f32,

    /// Resize handles never shrink the container below these.
    pub min_container_width: f32,
    pub min_container_height: f32,

    /// Class the host puts on a diagram's rendering container.
    pub host_class: String,
    /// Identifier prefix the diagram engine gives its output.
    pub id_prefix: String,
    /// Tag name of the diagram output element.
    pub diagram_tag: String,

    /// Delay before scanning after a file-open signal, in milliseconds.
    pub file_open_delay_ms: u32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            button_zoom_in: 1.2,
            button_zoom_out: 0.8,
            fallback_diagram_size: Size::new(300.0, 200.0),
            fallback_parent_width: 600.0,
            container_padding_x: 32.0,
            container_padding_y: 60.0,
            inpage_insets: Insets {
                left: 16.0,
                right: 16.0,
                top: 16.0,
                bottom: 40.0,
            },
            modal_insets: Insets::uniform(40.0),
            inpage_fit_cap: 1.0,
            modal_fit_cap: 2.0,
            min_container_width: 150.0,
            min_container_height: 100.0,
            host_class: "mermaid".into(),
            id_prefix: "mermaid-".into(),
            diagram_tag: "svg".into(),
            file_open_delay_ms: 200,
        }
    }
}

impl ZoomConfig {
    /// Parse a JSON config object. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns a message if the JSON is malformed or the values are inconsistent.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let config: ZoomConfig =
            serde_json::from_str(text).map_err(|e| format!("invalid config: {e}"))?;
        if let Err(e) = config.validate() {
            log::warn!("rejecting zoom config: {e}");
            return Err(e);
        }
        Ok(config)
    }

    /// Check value ranges the transform math relies on.
    ///
    /// # Errors
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.min_scale > 0.0) {
            return Err(format!("min_scale must be positive, got {}", self.min_scale));
        }
        if self.min_scale > self.max_scale {
            return Err(format!(
                "min_scale ({}) exceeds max_scale ({})",
                self.min_scale, self.max_scale
            ));
        }
        let factors = [
            ("wheel_zoom_in", self.wheel_zoom_in),
            ("wheel_zoom_out", self.wheel_zoom_out),
            ("button_zoom_in", self.button_zoom_in),
            ("button_zoom_out", self.button_zoom_out),
            ("inpage_fit_cap", self.inpage_fit_cap),
            ("modal_fit_cap", self.modal_fit_cap),
        ];
        for (name, value) in factors {
            if !(value > 0.0) {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        if self.host_class.is_empty() && self.id_prefix.is_empty() {
            return Err("host_class and id_prefix cannot both be empty".into());
        }
        Ok(())
    }
}
