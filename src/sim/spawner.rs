//! Random power-up placement
//!
//! Items land uniformly inside the playfield inset by `ITEM_SPAWN_MARGIN`;
//! the type comes from one uniform draw split into ~34% / 33% / 33% bands.

use glam::Vec2;
use rand::Rng;

use super::entity::{Item, ItemKind};
use crate::consts::*;

/// Map a uniform draw in `[0, 1)` to an item type
pub fn kind_for_roll(roll: f32) -> ItemKind {
    if roll < 0.34 {
        ItemKind::Shield
    } else if roll < 0.67 {
        ItemKind::Heal
    } else {
        ItemKind::Speed
    }
}

/// Random top-left corner for a new item
pub fn spawn_position<R: Rng>(rng: &mut R, field: Vec2) -> Vec2 {
    let span = (field - Vec2::splat(ITEM_SPAWN_MARGIN * 2.0 + ITEM_SIZE)).max(Vec2::ZERO);
    Vec2::new(
        rng.random::<f32>() * span.x + ITEM_SPAWN_MARGIN,
        rng.random::<f32>() * span.y + ITEM_SPAWN_MARGIN,
    )
}

/// Roll a complete item
pub fn random_item<R: Rng>(rng: &mut R, id: u32, field: Vec2) -> Item {
    let pos = spawn_position(rng, field);
    let kind = kind_for_roll(rng.random::<f32>());
    Item::new(id, kind, pos)
}

/// Whether the periodic trigger fires on this frame
#[inline]
pub fn periodic_spawn_due(frame: u64) -> bool {
    frame % ITEM_SPAWN_INTERVAL == 0
}
