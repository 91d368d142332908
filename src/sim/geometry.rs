//! Axis-aligned rectangles and distance tests
//!
//! Screen space: origin top-left, y grows downward. Every entity's hit area
//! is a `Rect`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
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

    /// Rectangle at `origin` with the given size
    #[inline]
    pub fn at(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Square of side `side` centred on `center`
    #[inline]
    pub fn centered(center: Vec2, side: f32) -> Self {
        Self::new(center.x - side / 2.0, center.y - side / 2.0, side, side)
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin() + self.size() / 2.0
    }

    /// Shift by `delta` in place
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict AABB overlap (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// Strict overlap test: true iff the x ranges and the y ranges both overlap
/// with positive extent.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

/// True iff the Euclidean distance between `p1` and `p2` is at most `threshold`
#[inline]
pub fn within(p1: Vec2, p2: Vec2, threshold: f32) -> bool {
    p1.distance_squared(p2) <= threshold * threshold
}

/// Clamp a top-left origin so a box of `size` stays inside `[0, bounds]`.
/// Boxes larger than the field are pinned to the origin.
pub fn clamp_origin(origin: Vec2, size: Vec2, bounds: Vec2) -> Vec2 {
    let max = (bounds - size).max(Vec2::ZERO);
    origin.clamp(Vec2::ZERO, max)
}
