//! Axis-aligned bounding box used for layout and collision
//!
//! Edges are derived from the origin and size: `right = x + w`,
//! `bottom = y + h`. Width and height may be zero or negative; every
//! query stays well-defined and simply reports the geometry it was given.

use serde::{Deserialize, Serialize};

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: (f32, f32), size: (f32, f32)) -> Self {
        Self::new(pos.0, pos.1, size.0, size.1)
    }

    /// Independent value copy
    pub fn copy(&self) -> Self {
        *self
    }

    pub fn width(&self) -> f32 {
        self.w
    }

    pub fn height(&self) -> f32 {
        self.h
    }

    pub fn pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (f32, f32) {
        (self.w, self.h)
    }

    /// Left edge
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn set_left(&mut self, value: f32) {
        self.x = value;
    }

    pub fn set_top(&mut self, value: f32) {
        self.y = value;
    }

    /// Move so the right edge lands on `value`, keeping the width
    pub fn set_right(&mut self, value: f32) {
        self.x = value - self.w;
    }

    /// Move so the bottom edge lands on `value`, keeping the height
    pub fn set_bottom(&mut self, value: f32) {
        self.y = value - self.h;
    }

    /// Center X
    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    /// Center Y
    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// AABB overlap test on closed intervals.
    ///
    /// Only strict separation counts as a miss, so rects that share an
    /// edge or a corner collide.
    pub fn colliderect(&self, other: &Rect) -> bool {
        !(self.left() > other.right()
            || self.right() < other.left()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }

    /// Check if point is inside, edges included
    pub fn collidepoint(&self, point: (f32, f32)) -> bool {
        point.0 >= self.left()
            && point.0 <= self.right()
            && point.1 >= self.top()
            && point.1 <= self.bottom()
    }
}
