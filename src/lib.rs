//! Tank Skirmish - A single-player arcade tank battle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, effects, game state)
//! - `game`: Command facade used by input, shop and display collaborators
//! - `shop`: Priced consumables and cosmetic skins
//! - `profile`: Gold and skin ownership carried across restarts
//! - `renderer`: Backend-free draw hooks producing colored vertices
//! - `settings`: JSON-loadable session configuration

pub mod game;
pub mod profile;
pub mod renderer;
pub mod settings;
pub mod shop;
pub mod sim;

pub use game::Game;
pub use profile::Profile;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate the tick-counted timers are tuned for
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Entity sizes (all entities are axis-aligned squares)
    pub const TANK_SIZE: f32 = 40.0;
    pub const BULLET_SIZE: f32 = 8.0;
    pub const ITEM_SIZE: f32 = 32.0;

    /// Movement speeds (pixels per tick)
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_SPEED_BOOST: f32 = 5.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const BULLET_SPEED: f32 = 6.0;

    /// Ticks between shots for any tank
    pub const FIRE_COOLDOWN_TICKS: u32 = 30;
    /// Enemies pick a new random facing every N frames
    pub const ENEMY_TURN_INTERVAL: u64 = 60;
    /// Enemies fire every N frames (shared counter, not per enemy)
    pub const ENEMY_FIRE_INTERVAL: u64 = 120;

    /// Player vitals
    pub const MAX_HP: u8 = 3;
    /// Timed buffs
    pub const SHIELD_TICKS: u32 = 300;
    pub const SPEED_TICKS: u32 = 240;

    /// Progression
    pub const KILL_REWARD: u32 = 5;
    pub const ENEMIES_TO_WIN: u32 = 10;

    /// Enemy spawn layout
    pub const ENEMY_SPAWN_Y: f32 = 50.0;
    pub const ENEMY_START_X: [f32; 3] = [100.0, 350.0, 600.0];
    pub const ENEMY_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Gap between the player's tank and the bottom edge at spawn
    pub const PLAYER_SPAWN_GAP: f32 = 10.0;
    /// Delay before a destroyed enemy is replaced (400 ms)
    pub const ENEMY_RESPAWN_MS: u32 = 400;

    /// Items spawn this far inside each edge
    pub const ITEM_SPAWN_MARGIN: f32 = 60.0;
    /// Periodic item spawn interval in frames
    pub const ITEM_SPAWN_INTERVAL: u64 = 600;
    /// One-shot item spawn delay after session start (ms, half-open range)
    pub const FIRST_ITEM_DELAY_MS: (u32, u32) = (2000, 5000);
}

/// Convert a wall-clock delay into whole simulation ticks
#[inline]
pub fn ms_to_ticks(ms: u32, ticks_per_second: u32) -> u64 {
    (ms as u64 * ticks_per_second as u64) / 1000
}
