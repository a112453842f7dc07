//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Seeded RNG only
//! - Tick-counted delays, never wall-clock timers
//! - No rendering or platform dependencies

pub mod deferred;
pub mod effects;
pub mod entity;
pub mod geometry;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;

pub use deferred::{DeferredAction, DeferredQueue};
pub use effects::PlayerStatus;
pub use entity::{Bullet, Direction, Item, ItemKind, Tank};
pub use geometry::{Square, intersects};
pub use input::{Action, InputState};
pub use state::{GamePhase, GameState, Outcome};
pub use tick::{GameEvent, tick};
