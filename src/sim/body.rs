//! Axis-aligned geometry for tiles and moving bodies
//!
//! All coordinates are integer pixels with y growing downward:
//! - `pos`: top-left corner
//! - `size`: width/height (always positive)
//!
//! Integer math keeps long sessions free of float drift.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    pub fn set_left(&mut self, x: i32) {
        self.pos.x = x;
    }

    pub fn set_right(&mut self, x: i32) {
        self.pos.x = x - self.size.x;
    }

    pub fn set_top(&mut self, y: i32) {
        self.pos.y = y;
    }

    pub fn set_bottom(&mut self, y: i32) {
        self.pos.y = y - self.size.y;
    }

    /// Strict overlap: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True if `inner` lies entirely inside this rectangle (edges may touch)
    pub fn contains(&self, inner: &Rect) -> bool {
        inner.left() >= self.left()
            && inner.right() <= self.right()
            && inner.top() >= self.top()
            && inner.bottom() <= self.bottom()
    }

    /// Copy of this rectangle shifted by `delta`
    pub fn translated(&self, delta: IVec2) -> Rect {
        Rect {
            pos: self.pos + delta,
            size: self.size,
        }
    }
}

/// Rectangle plus velocity, owned by exactly one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialBody {
    pub rect: Rect,
    /// Pixels per frame
    pub vel: IVec2,
}

impl SpatialBody {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            vel: IVec2::ZERO,
        }
    }

    /// Teleport without touching velocity
    pub fn move_to(&mut self, pos: IVec2) {
        self.rect.pos = pos;
    }

    /// Integrate gravity into vertical velocity, capped at terminal velocity
    pub fn apply_gravity(&mut self, gravity: i32, terminal_velocity: i32) {
        self.vel.y = (self.vel.y + gravity).min(terminal_velocity);
    }
}
