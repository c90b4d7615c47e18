//! Axis-aligned collision tests
//!
//! All comparisons are strict: boxes that only share an edge do not collide,
//! and a point on a box edge is outside it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn square(pos: Vec2, side: f32) -> Self {
        Self::new(pos, Vec2::splat(side))
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// True if the interiors of the two boxes intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }

    /// True if `point` lies strictly inside the box
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x > self.pos.x && point.x < self.right() && point.y > self.pos.y && point.y < self.bottom()
    }

    /// True if the vertical segment at `x` from `y_top` down to `y_bottom`
    /// passes through the interior of the box
    pub fn crossed_vertically(&self, x: f32, y_top: f32, y_bottom: f32) -> bool {
        x > self.pos.x && x < self.right() && y_top < self.bottom() && y_bottom > self.pos.y
    }
}
