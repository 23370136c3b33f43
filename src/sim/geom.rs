//! Box geometry for grid and actor collision
//!
//! Positions are in cell units with y growing downward:
//! - pos: top-left corner
//! - size: extent along each axis

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D point/offset. `a + b` is `plus`, `v * k` is `times`.
pub type Vector = Vec2;

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Same box moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.pos + offset, self.size)
    }

    /// Strict intersection: boxes sharing only an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Integer cells covered by the box, as half-open `(x_range, y_range)`
    pub fn cell_span(&self) -> (std::ops::Range<i64>, std::ops::Range<i64>) {
        let x_start = self.left().floor() as i64;
        let x_end = self.right().ceil() as i64;
        let y_start = self.top().floor() as i64;
        let y_end = self.bottom().ceil() as i64;
        (x_start..x_end, y_start..y_end)
    }
}
