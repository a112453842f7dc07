//! Tanks, bullets and power-up items
//!
//! Entities are plain state containers. Per-tick behavior is limited to
//! movement, cooldowns and bullet travel; everything that involves more
//! than one entity lives in `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Square, clamp_to_field};
use crate::consts::*;

/// Facing of a tank (rendering rotates by quarter turns in this order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in clockwise order starting at `Up`
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step in screen coordinates (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    /// Clockwise quarter turns from `Up`
    pub fn quarter_turns(self) -> u32 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }
}

/// A tank (player or enemy)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    /// Top-left corner, always inside the playfield
    pub pos: Vec2,
    pub size: f32,
    pub facing: Direction,
    /// Body color (skin for the player)
    pub color: [f32; 4],
    /// Ticks until the tank may fire again
    pub cooldown: u32,
    pub alive: bool,
    pub is_player: bool,
}

impl Tank {
    pub fn new(pos: Vec2, color: [f32; 4], is_player: bool) -> Self {
        Self {
            pos,
            size: TANK_SIZE,
            facing: Direction::Up,
            color,
            cooldown: 0,
            alive: true,
            is_player,
        }
    }

    pub fn bounds(&self) -> Square {
        Square::new(self.pos, self.size)
    }

    /// Translate by `delta`, then clamp into the playfield
    pub fn move_by(&mut self, delta: Vec2, field: Vec2) {
        self.pos = clamp_to_field(self.pos + delta, self.size, field);
    }

    /// Face `dir` and advance `speed` pixels that way
    pub fn drive(&mut self, dir: Direction, speed: f32, field: Vec2) {
        self.facing = dir;
        self.move_by(dir.unit() * speed, field);
    }

    /// Fire a bullet from the tank's center if the cooldown has elapsed
    pub fn fire(&mut self) -> Option<Bullet> {
        if self.cooldown > 0 {
            return None;
        }
        self.cooldown = FIRE_COOLDOWN_TICKS;
        let pos = self.bounds().center() - Vec2::splat(BULLET_SIZE / 2.0);
        Some(Bullet::new(
            pos,
            self.facing.unit() * BULLET_SPEED,
            self.is_player,
        ))
    }

    /// Count the fire cooldown down toward zero
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}

/// A bullet travelling in a straight, axis-aligned line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub from_player: bool,
    pub alive: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, from_player: bool) -> Self {
        Self {
            pos,
            vel,
            size: BULLET_SIZE,
            from_player,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Square {
        Square::new(self.pos, self.size)
    }

    /// Advance one tick; dies once the corner leaves `[0, w] x [0, h]`
    pub fn tick(&mut self, field: Vec2) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > field.x || self.pos.y < 0.0 || self.pos.y > field.y {
            self.alive = false;
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Absorbs enemy bullets for a while
    Shield,
    /// Restores one HP
    Heal,
    /// Boosts movement speed for a while
    Speed,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Shield, ItemKind::Heal, ItemKind::Speed];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Shield => "shield",
            ItemKind::Heal => "heal",
            ItemKind::Speed => "speed",
        }
    }
}

/// A power-up lying on the field; static until collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub pos: Vec2,
    pub size: f32,
    pub active: bool,
}

impl Item {
    pub fn new(id: u32, kind: ItemKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size: ITEM_SIZE,
            active: true,
        }
    }

    pub fn bounds(&self) -> Square {
        Square::new(self.pos, self.size)
    }
}
