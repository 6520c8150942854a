//! Small geometry value types shared by the mirror model and the transform math.

use serde::{Deserialize, Serialize};

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Replace each zero (or non-finite) component with the fallback's.
    /// Mirrors the `measured || default` idiom used for not-yet-laid-out nodes.
    pub fn or_fallback(self, fallback: Size) -> Size {
        let pick = |v: f32, d: f32| if v.is_finite() && v > 0.0 { v } else { d };
        Size::new(
            pick(self.width, fallback.width),
            pick(self.height, fallback.height),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance (inter-finger distance for pinch).
    pub fn distance(&self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Bounding rectangle as reported by the host (`getBoundingClientRect`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Visual center in rect-local coordinates.
    pub fn local_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Convert a client-space point into rect-local coordinates.
    pub fn to_local(&self, p: Point) -> Point {
        p - self.origin()
    }
}

/// Padding reserved inside a viewport container, per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn uniform(v: f32) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    /// Space left for content inside `outer`.
    pub fn shrink(&self, outer: Size) -> Size {
        Size::new(
            outer.width - self.left - self.right,
            outer.height - self.top - self.bottom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_replaces_zero_components_only() {
        let s = Size::new(0.0, 120.0).or_fallback(Size::new(300.0, 200.0));
        assert_eq!(s, Size::new(300.0, 120.0));
        let s = Size::new(f32::NAN, 0.0).or_fallback(Size::new(300.0, 200.0));
        assert_eq!(s, Size::new(300.0, 200.0));
    }

    #[test]
    fn pinch_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(30.0, 40.0);
        assert_eq!(a.distance(b), 50.0);
    }

    #[test]
    fn insets_shrink() {
        let inner = Insets {
            left: 16.0,
            right: 16.0,
            top: 16.0,
            bottom: 40.0,
        }
        .shrink(Size::new(392.0, 296.0));
        assert_eq!(inner, Size::new(360.0, 240.0));
    }

    #[test]
    fn client_to_local() {
        let r = Rect::new(100.0, 50.0, 400.0, 300.0);
        assert_eq!(r.to_local(Point::new(150.0, 100.0)), Point::new(50.0, 50.0));
        assert_eq!(r.local_center(), Point::new(200.0, 150.0));
    }
}
