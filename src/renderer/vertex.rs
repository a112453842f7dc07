//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (playfield pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BARREL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_BULLET: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const ENEMY_BULLET: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const ITEM_SHIELD: [f32; 4] = [0.31, 0.78, 1.0, 0.7];
    pub const ITEM_HEAL: [f32; 4] = [1.0, 0.31, 0.31, 0.7];
    pub const ITEM_SPEED: [f32; 4] = [0.31, 1.0, 0.47, 0.7];
    pub const ITEM_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SHIELD_AURA: [f32; 4] = [0.31, 0.78, 1.0, 0.7];
    pub const SPEED_AURA: [f32; 4] = [0.31, 1.0, 0.47, 0.5];
}
