//! Session state and core simulation types
//!
//! One `GameState` owns every entity of a playthrough. Restarting builds a
//! fresh state; only the `Profile` is carried over.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::deferred::{DeferredAction, DeferredQueue};
use super::effects::PlayerStatus;
use super::entity::{Bullet, Item, Tank};
use super::input::InputState;
use super::spawner;
use crate::consts::*;
use crate::ms_to_ticks;
use crate::profile::Profile;
use crate::settings::Settings;
use crate::shop;

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Win => "Victory!",
            Outcome::Lose => "Game Over",
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Match ended; terminal until restart
    Over(Outcome),
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Game seed shared by every session of one `Game`
    pub seed: u64,
    /// Session counter; deferred actions from other generations are ignored
    pub generation: u32,
    /// Session RNG (enemy turns, item type and position, respawn x)
    pub rng: Pcg32,
    /// Playfield size
    pub field: Vec2,
    /// Simulation rate used to convert millisecond delays
    pub ticks_per_second: u32,
    /// Kills required to win
    pub enemies_to_win: u32,
    /// Frames completed this session
    pub frame: u64,
    pub phase: GamePhase,
    pub player: Tank,
    /// Enemy slots; a destroyed enemy keeps its slot until respawned
    pub enemies: Vec<Tank>,
    pub bullets: Vec<Bullet>,
    /// Items waiting on the field
    pub items: Vec<Item>,
    /// HP and timed effects
    pub status: PlayerStatus,
    /// Enemies destroyed this session
    pub defeated: u32,
    /// Gold and skins (survives restarts)
    pub profile: Profile,
    /// Held actions
    pub input: InputState,
    /// Tick-counted delayed actions
    pub deferred: DeferredQueue,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Build a ready-to-run session
    pub fn new(settings: &Settings, seed: u64, generation: u32, profile: Profile) -> Self {
        let field = Vec2::new(settings.field_width, settings.field_height);
        let player_pos = Vec2::new(
            field.x / 2.0 - TANK_SIZE / 2.0,
            field.y - TANK_SIZE - PLAYER_SPAWN_GAP,
        );
        let player = Tank::new(player_pos, shop::skin_color(&profile.equipped_skin), true);

        let enemies = ENEMY_START_X
            .iter()
            .map(|&x| {
                let mut tank = Tank::new(Vec2::new(x, ENEMY_SPAWN_Y), ENEMY_COLOR, false);
                tank.move_by(Vec2::ZERO, field);
                tank
            })
            .collect();

        let mut state = Self {
            seed,
            generation,
            rng: Pcg32::seed_from_u64(seed ^ ((generation as u64) << 32)),
            field,
            ticks_per_second: settings.ticks_per_second,
            enemies_to_win: settings.enemies_to_win,
            frame: 0,
            phase: GamePhase::Playing,
            player,
            enemies,
            bullets: Vec::new(),
            items: Vec::new(),
            status: PlayerStatus::default(),
            defeated: 0,
            profile,
            input: InputState::default(),
            deferred: DeferredQueue::new(),
            next_id: 1,
        };

        let (min_ms, max_ms) = FIRST_ITEM_DELAY_MS;
        let min = ms_to_ticks(min_ms, state.ticks_per_second);
        let max = ms_to_ticks(max_ms, state.ticks_per_second).max(min + 1);
        let delay = state.rng.random_range(min..max);
        state.schedule(delay, DeferredAction::SpawnItem);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Queue `action` to run `delay_ticks` frames from now in this session
    pub fn schedule(&mut self, delay_ticks: u64, action: DeferredAction) {
        let due = self.frame + delay_ticks;
        self.deferred.schedule(due, self.generation, action);
    }

    /// Drop a random power-up on the field and return its index
    pub fn spawn_item(&mut self) -> usize {
        let id = self.next_entity_id();
        let item = spawner::random_item(&mut self.rng, id, self.field);
        log::debug!("Spawned {:?} item #{} at {}", item.kind, item.id, item.pos);
        self.items.push(item);
        self.items.len() - 1
    }

    /// Put a fresh enemy into `slot` at a random x along the spawn row
    pub fn respawn_enemy(&mut self, slot: usize) {
        let x = self.rng.random::<f32>() * (self.field.x - TANK_SIZE).max(0.0);
        let tank = Tank::new(Vec2::new(x, ENEMY_SPAWN_Y), ENEMY_COLOR, false);
        match self.enemies.get_mut(slot) {
            Some(existing) => *existing = tank,
            None => self.enemies.push(tank),
        }
        log::debug!("Enemy respawned in slot {} at x={:.1}", slot, x);
    }

    /// Recolor the live player tank (skin change)
    pub fn set_player_color(&mut self, color: [f32; 4]) {
        self.player.color = color;
    }

    /// Alive enemies only
    pub fn live_enemies(&self) -> impl Iterator<Item = &Tank> {
        self.enemies.iter().filter(|e| e.alive)
    }
}
