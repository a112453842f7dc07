//! Axis-aligned square geometry
//!
//! Every entity in the arena is a square described by its top-left corner
//! and side length. Collisions are open-interval overlaps: squares that only
//! share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned square (top-left corner + side length)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub pos: Vec2,
    pub size: f32,
}

impl Square {
    pub const fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }

    /// Center point of the square
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// True iff the two squares overlap on both axes (strict inequalities)
#[inline]
pub fn intersects(a: &Square, b: &Square) -> bool {
    a.pos.x < b.pos.x + b.size
        && a.pos.x + a.size > b.pos.x
        && a.pos.y < b.pos.y + b.size
        && a.pos.y + a.size > b.pos.y
}

/// Clamp a top-left corner so a square of `size` stays inside `field`
#[inline]
pub fn clamp_to_field(pos: Vec2, size: f32, field: Vec2) -> Vec2 {
    let max = (field - Vec2::splat(size)).max(Vec2::ZERO);
    pos.clamp(Vec2::ZERO, max)
}
