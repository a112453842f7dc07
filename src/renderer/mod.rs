//! Backend-free rendering hooks
//!
//! Each entity draws itself into a flat triangle list of colored vertices
//! in playfield pixels. Uploading and presenting them is up to the host.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use glam::Vec2;

use crate::sim::{Bullet, GameState, Item, ItemKind, Tank};

const CIRCLE_SEGMENTS: u32 = 24;
const BARREL_WIDTH: f32 = 10.0;
const BARREL_LENGTH: f32 = 20.0;

/// Per-entity draw hook
pub trait Draw {
    fn draw(&self, out: &mut Vec<Vertex>);
}

impl Draw for Tank {
    fn draw(&self, out: &mut Vec<Vertex>) {
        if !self.alive {
            return;
        }
        let size = Vec2::splat(self.size);
        out.extend(shapes::rect(self.pos, size, self.color));
        out.extend(shapes::turned_rect(
            self.bounds().center(),
            Vec2::new(-BARREL_WIDTH / 2.0, -self.size / 2.0),
            Vec2::new(BARREL_WIDTH, BARREL_LENGTH),
            self.facing.quarter_turns(),
            colors::BARREL,
        ));
    }
}

impl Draw for Bullet {
    fn draw(&self, out: &mut Vec<Vertex>) {
        if !self.alive {
            return;
        }
        let color = if self.from_player {
            colors::PLAYER_BULLET
        } else {
            colors::ENEMY_BULLET
        };
        out.extend(shapes::rect(self.pos, Vec2::splat(self.size), color));
    }
}

impl Draw for Item {
    fn draw(&self, out: &mut Vec<Vertex>) {
        if !self.active {
            return;
        }
        let color = match self.kind {
            ItemKind::Shield => colors::ITEM_SHIELD,
            ItemKind::Heal => colors::ITEM_HEAL,
            ItemKind::Speed => colors::ITEM_SPEED,
        };
        let center = self.bounds().center();
        let radius = self.size / 2.0;
        out.extend(shapes::circle(center, radius, color, CIRCLE_SEGMENTS));
        out.extend(shapes::ring(
            center,
            radius - 1.5,
            radius + 1.5,
            colors::ITEM_OUTLINE,
            CIRCLE_SEGMENTS,
        ));
    }
}

/// Build the full frame: items, player with effect auras, enemies, bullets
pub fn draw_frame(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::new();

    for item in &state.items {
        item.draw(&mut out);
    }

    if state.player.alive {
        let center = state.player.bounds().center();
        let radius = state.player.size / 2.0;
        if state.status.shield_active() {
            out.extend(shapes::ring(
                center,
                radius + 5.0,
                radius + 11.0,
                colors::SHIELD_AURA,
                CIRCLE_SEGMENTS,
            ));
        }
        if state.status.speed_active() {
            out.extend(shapes::ring(
                center,
                radius + 14.0,
                radius + 18.0,
                colors::SPEED_AURA,
                CIRCLE_SEGMENTS,
            ));
        }
    }
    state.player.draw(&mut out);

    for enemy in &state.enemies {
        enemy.draw(&mut out);
    }
    for bullet in &state.bullets {
        bullet.draw(&mut out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ENEMY_COLOR;
    use crate::profile::Profile;
    use crate::settings::Settings;
    use crate::sim::Direction;

    #[test]
    fn test_dead_tank_draws_nothing() {
        let mut tank = Tank::new(Vec2::new(10.0, 10.0), ENEMY_COLOR, false);
        tank.alive = false;
        let mut out = Vec::new();
        tank.draw(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_barrel_points_along_facing() {
        let mut tank = Tank::new(Vec2::new(100.0, 100.0), ENEMY_COLOR, false);
        tank.facing = Direction::Right;
        let mut out = Vec::new();
        tank.draw(&mut out);
        // Body quad then barrel quad
        assert_eq!(out.len(), 12);
        let barrel_max_x = out[6..]
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert_eq!(barrel_max_x, 140.0);
        assert!(out[6..].iter().all(|v| v.color == colors::BARREL));
    }

    #[test]
    fn test_frame_includes_auras() {
        let mut state = GameState::new(&Settings::default(), 3, 1, Profile::default());
        let plain = draw_frame(&state).len();
        state.status.apply(ItemKind::Shield);
        state.status.apply(ItemKind::Speed);
        let buffed = draw_frame(&state).len();
        assert_eq!(buffed, plain + 2 * 6 * CIRCLE_SEGMENTS as usize);
    }

    #[test]
    fn test_bullet_color_by_owner() {
        let mut out = Vec::new();
        Bullet::new(Vec2::ZERO, Vec2::ZERO, true).draw(&mut out);
        Bullet::new(Vec2::ZERO, Vec2::ZERO, false).draw(&mut out);
        assert_eq!(out[0].color, colors::PLAYER_BULLET);
        assert_eq!(out[6].color, colors::ENEMY_BULLET);
    }
}
