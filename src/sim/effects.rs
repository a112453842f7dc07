//! Player vitals and timed power-up effects

use serde::{Deserialize, Serialize};

use super::entity::ItemKind;
use crate::consts::*;

/// HP plus the shield/speed countdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Hit points, clamped to `0..=MAX_HP`
    pub hp: u8,
    /// Remaining shield ticks (active while > 0)
    pub shield_ticks: u32,
    /// Remaining speed boost ticks (active while > 0)
    pub speed_ticks: u32,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self {
            hp: MAX_HP,
            shield_ticks: 0,
            speed_ticks: 0,
        }
    }
}

impl PlayerStatus {
    pub fn shield_active(&self) -> bool {
        self.shield_ticks > 0
    }

    pub fn speed_active(&self) -> bool {
        self.speed_ticks > 0
    }

    /// Current movement speed in pixels per tick
    pub fn move_speed(&self) -> f32 {
        if self.speed_active() {
            PLAYER_SPEED_BOOST
        } else {
            PLAYER_SPEED
        }
    }

    /// Apply a collected or purchased power-up
    pub fn apply(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::Shield => self.shield_ticks = SHIELD_TICKS,
            ItemKind::Heal => self.hp = (self.hp + 1).min(MAX_HP),
            ItemKind::Speed => self.speed_ticks = SPEED_TICKS,
        }
    }

    /// Count active effects down by one tick
    pub fn advance(&mut self) {
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.speed_ticks = self.speed_ticks.saturating_sub(1);
    }

    /// Take one point of damage; returns true if that was the last HP
    pub fn take_hit(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.hp == 0
    }
}
