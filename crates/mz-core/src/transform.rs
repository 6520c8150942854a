//! Viewport transform math: uniform scale + translate, never rotation or skew.
//!
//! The content wrapper is transformed with origin at its top-left corner, so a
//! content-space point `c` lands on screen at `translate + c * scale`.

use crate::config::ZoomConfig;
use crate::geom::{Insets, Point, Size};
use crate::model::ElementRef;

// ─── Transform ───────────────────────────────────────────────────────────

/// One uniform scale + translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub translate: Point,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        translate: Point::ORIGIN,
    };

    pub fn new(scale: f32, tx: f32, ty: f32) -> Self {
        Self {
            scale,
            translate: Point::new(tx, ty),
        }
    }

    /// CSS form applied to the content wrapper.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }

    /// Rounded percentage shown in the scale readout.
    pub fn percent(&self) -> i32 {
        (self.scale * 100.0).round() as i32
    }

    /// Screen position of a content-space point.
    pub fn to_screen(&self, content: Point) -> Point {
        Point::new(
            self.translate.x + content.x * self.scale,
            self.translate.y + content.y * self.scale,
        )
    }

    /// Content-space position under a screen point.
    pub fn to_content(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate.x) / self.scale,
            (screen.y - self.translate.y) / self.scale,
        )
    }

    /// Rescale to `new_scale` keeping the content point under `anchor` fixed:
    /// `t1 = anchor - (anchor - t0) * (s1 / s0)`.
    pub fn zoomed_about(&self, anchor: Point, new_scale: f32) -> Transform {
        let ratio = new_scale / self.scale;
        Transform {
            scale: new_scale,
            translate: Point::new(
                anchor.x - (anchor.x - self.translate.x) * ratio,
                anchor.y - (anchor.y - self.translate.y) * ratio,
            ),
        }
    }
}

// ─── Fit ─────────────────────────────────────────────────────────────────

/// Scale bounds enforced on every write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLimits {
    pub min: f32,
    pub max: f32,
}

impl ScaleLimits {
    /// Bounds from `config`, swapped if given in the wrong order.
    pub fn from_config(config: &ZoomConfig) -> Self {
        Self {
            min: config.min_scale.min(config.max_scale),
            max: config.max_scale.max(config.min_scale),
        }
    }

    /// Never panics, even for inverted bounds; the lower bound wins.
    pub fn clamp(&self, scale: f32) -> f32 {
        if scale.is_nan() {
            return self.min;
        }
        scale.min(self.max).max(self.min)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self::from_config(&ZoomConfig::default())
    }
}

/// How a fit is computed for one presentation context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    /// Padding removed from the container before measuring available space.
    pub insets: Insets,
    /// Upper bound on the fitted scale.
    pub cap: f32,
    /// Center the content (modal) instead of anchoring it top-left (in-page).
    pub center: bool,
}

impl FitParams {
    /// In-page viewport: never upscale past native size, anchored top-left.
    pub fn in_page(config: &ZoomConfig) -> Self {
        Self {
            insets: config.inpage_insets,
            cap: config.inpage_fit_cap,
            center: false,
        }
    }

    /// Fullscreen modal: bounded upscaling, centered.
    pub fn modal(config: &ZoomConfig) -> Self {
        Self {
            insets: config.modal_insets,
            cap: config.modal_fit_cap,
            center: true,
        }
    }
}

/// Best-fit transform of a `natural`-sized diagram inside `container`.
///
/// `scale = min(availW / naturalW, availH / naturalH, cap)`, then clamped into
/// `limits`. Centered fits place the scaled content in the middle of the whole
/// container; otherwise translation is zero.
pub fn fit_transform(
    container: Size,
    natural: Size,
    params: &FitParams,
    limits: ScaleLimits,
) -> Transform {
    let available = params.insets.shrink(container);
    let scale_x = available.width / natural.width;
    let scale_y = available.height / natural.height;
    let scale = limits.clamp(scale_x.min(scale_y).min(params.cap));

    if !params.center {
        return Transform::new(scale, 0.0, 0.0);
    }
    Transform::new(
        scale,
        (container.width - natural.width * scale) / 2.0,
        (container.height - natural.height * scale) / 2.0,
    )
}

// ─── Transform State ─────────────────────────────────────────────────────

/// Mutable zoom/pan record for one wrapped diagram (or one modal).
#[derive(Debug, Clone)]
pub struct TransformState {
    /// Written only through `set_transform`, which clamps.
    scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,

    pub is_dragging: bool,
    /// Drag anchor: `pointer - translate` captured at drag start.
    pub drag_start: Point,

    /// Natural (unscaled) diagram size, captured once at wrap time.
    natural: Size,
    limits: ScaleLimits,

    /// The raw diagram element (host-owned).
    pub owner: ElementRef,
    /// The viewport's outer box.
    pub container: ElementRef,
    /// The transform wrapper the affine is written to.
    pub content: ElementRef,
    /// Percentage readout, refreshed on every apply.
    pub indicator: Option<ElementRef>,
}

impl TransformState {
    pub fn new(
        owner: ElementRef,
        container: ElementRef,
        content: ElementRef,
        natural: Size,
        limits: ScaleLimits,
    ) -> Self {
        Self {
            scale: limits.clamp(1.0),
            translate_x: 0.0,
            translate_y: 0.0,
            is_dragging: false,
            drag_start: Point::ORIGIN,
            natural,
            limits,
            owner,
            container,
            content,
            indicator: None,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn natural_size(&self) -> Size {
        self.natural
    }

    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.scale, self.translate_x, self.translate_y)
    }

    /// Store a transform. Scale is clamped here, at the write.
    pub fn set_transform(&mut self, t: Transform) {
        self.scale = self.limits.clamp(t.scale);
        self.translate_x = t.translate.x;
        self.translate_y = t.translate.y;
    }

    /// Candidate transform after multiplying scale by `factor` about `anchor`.
    /// Returns `None` when clamping leaves the scale unchanged.
    pub fn zoom_by(&self, factor: f32, anchor: Point) -> Option<Transform> {
        let new_scale = self.limits.clamp(self.scale * factor);
        if new_scale == self.scale {
            return None;
        }
        Some(self.transform().zoomed_about(anchor, new_scale))
    }

    /// Candidate transform with scale set to `scale` (clamped), translation kept.
    pub fn with_scale(&self, scale: f32) -> Transform {
        Transform::new(
            self.limits.clamp(scale),
            self.translate_x,
            self.translate_y,
        )
    }

    /// Capture the drag anchor for a pointer/finger going down at `pointer`.
    pub fn begin_drag(&mut self, pointer: Point) {
        self.is_dragging = true;
        self.drag_start = Point::new(pointer.x - self.translate_x, pointer.y - self.translate_y);
    }

    /// Translation for a pointer now at `pointer`; idempotent per position.
    pub fn drag_to(&self, pointer: Point) -> Transform {
        Transform::new(
            self.scale,
            pointer.x - self.drag_start.x,
            pointer.y - self.drag_start.y,
        )
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    /// Best fit for a container of the given size.
    pub fn fit(&self, container: Size, params: &FitParams) -> Transform {
        fit_transform(container, self.natural, params, self.limits)
    }
}
