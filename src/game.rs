//! Game command facade
//!
//! Owns the current session plus the pause/shop flags and exposes the small
//! command set the input, shop and display collaborators talk to. The host
//! calls `step_frame` once per display frame while not paused.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::renderer::{self, Vertex};
use crate::settings::Settings;
use crate::shop::{self, ShopError};
use crate::sim::{Action, GameEvent, GamePhase, GameState, ItemKind, tick};

/// Read-only counters for the display collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub hp: u8,
    pub gold: u32,
    pub defeated: u32,
    pub enemies_to_win: u32,
    pub shield_active: bool,
    pub speed_active: bool,
    pub paused: bool,
    pub phase: GamePhase,
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP: {}  Gold: {}  Progress: {}/{}",
            self.hp, self.gold, self.defeated, self.enemies_to_win
        )?;
        if self.shield_active {
            write!(f, "  [shield]")?;
        }
        if self.speed_active {
            write!(f, "  [speed]")?;
        }
        match self.phase {
            GamePhase::Over(outcome) => write!(f, "  {}", outcome.message()),
            GamePhase::Playing if self.paused => write!(f, "  (paused)"),
            GamePhase::Playing => Ok(()),
        }
    }
}

/// A running game: current session, pause flag, shop flag
#[derive(Debug, Clone)]
pub struct Game {
    settings: Settings,
    seed: u64,
    generation: u32,
    state: GameState,
    paused: bool,
    shop_open: bool,
}

impl Game {
    /// Create a game and start its first session
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let generation = 1;
        let state = GameState::new(&settings, seed, generation, Default::default());
        log::info!("New game (seed {})", seed);
        Self {
            settings,
            seed,
            generation,
            state,
            paused: false,
            shop_open: false,
        }
    }

    /// Reset every entity, counter and timer for a new session.
    /// Gold and skins carry over; pending deferred actions do not.
    pub fn init_session(&mut self) -> &GameState {
        self.generation = self.generation.wrapping_add(1);
        let profile = std::mem::take(&mut self.state.profile);
        self.state = GameState::new(&self.settings, self.seed, self.generation, profile);
        self.paused = false;
        self.shop_open = false;
        log::info!("Session {} started", self.generation);
        &self.state
    }

    /// Advance one frame; no-op while paused or after the match ended
    pub fn step_frame(&mut self) -> Vec<GameEvent> {
        if self.paused {
            return Vec::new();
        }
        tick(&mut self.state)
    }

    /// Whether the host should keep scheduling frames
    pub fn wants_frames(&self) -> bool {
        !self.paused && self.state.is_playing()
    }

    pub fn set_input(&mut self, action: Action, pressed: bool) {
        self.state.input.set(action, pressed);
    }

    /// Key-name variant of `set_input`, tracked per physical key.
    /// Unknown keys are ignored.
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        self.state.input.set_key(key, pressed).is_some()
    }

    /// Flip the pause flag and return the new value.
    /// Ignored while the shop is open (the shop holds the game paused).
    pub fn toggle_pause(&mut self) -> bool {
        if !self.shop_open {
            self.paused = !self.paused;
            log::debug!("Paused: {}", self.paused);
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn open_shop(&mut self) {
        self.shop_open = true;
        self.paused = true;
    }

    /// Close the shop and resume play
    pub fn close_shop(&mut self) {
        self.shop_open = false;
        self.paused = false;
    }

    pub fn is_shop_open(&self) -> bool {
        self.shop_open
    }

    pub fn buy_consumable(&mut self, kind: ItemKind) -> Result<(), ShopError> {
        shop::buy_consumable(&mut self.state, kind).inspect_err(|e| {
            log::info!("Purchase rejected: {}", e);
        })
    }

    pub fn buy_skin(&mut self, id: &str) -> Result<(), ShopError> {
        shop::buy_skin(&mut self.state.profile, id).inspect_err(|e| {
            log::info!("Purchase rejected: {}", e);
        })
    }

    pub fn equip_skin(&mut self, id: &str) -> Result<(), ShopError> {
        shop::equip_skin(&mut self.state, id)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            hp: self.state.status.hp,
            gold: self.state.profile.gold,
            defeated: self.state.defeated,
            enemies_to_win: self.state.enemies_to_win,
            shield_active: self.state.status.shield_active(),
            speed_active: self.state.status.speed_active(),
            paused: self.paused,
            phase: self.state.phase,
        }
    }

    /// Vertices for the current frame
    pub fn draw(&self) -> Vec<Vertex> {
        renderer::draw_frame(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}
