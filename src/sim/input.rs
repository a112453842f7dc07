//! Held-key input state
//!
//! Movement resolves to at most one direction per tick, checked in the
//! fixed priority order Up, Right, Down, Left. Fire is independent.

use serde::{Deserialize, Serialize};

use super::entity::Direction;

/// A bindable player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
    Fire,
}

/// Physical key names, lowercase, and the action each one drives
const KEY_BINDINGS: [(&str, Action); 10] = [
    ("arrowup", Action::Up),
    ("w", Action::Up),
    ("arrowright", Action::Right),
    ("d", Action::Right),
    ("arrowdown", Action::Down),
    ("s", Action::Down),
    ("arrowleft", Action::Left),
    ("a", Action::Left),
    (" ", Action::Fire),
    ("space", Action::Fire),
];

/// Position of a key in `KEY_BINDINGS`, matched case-insensitively
fn key_slot(key: &str) -> Option<usize> {
    KEY_BINDINGS
        .iter()
        .position(|(name, _)| name.eq_ignore_ascii_case(key))
}

impl Action {
    /// Map a lowercase-insensitive key name (arrows, WASD, space) to an action
    pub fn from_key(key: &str) -> Option<Self> {
        key_slot(key).map(|slot| KEY_BINDINGS[slot].1)
    }

    fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
            Action::Fire => 4,
        }
    }
}

/// Which actions are currently held
///
/// Actions can be held directly through `set` or through any of their bound
/// keys. Each physical key keeps its own bit, so releasing one of two keys
/// bound to the same action leaves the action held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: [bool; 5],
    keys: u16,
}

impl InputState {
    pub fn set(&mut self, action: Action, pressed: bool) {
        self.held[action.index()] = pressed;
    }

    /// Record a key press or release. Returns the bound action, or `None`
    /// for unbound keys, which leave the state untouched.
    pub fn set_key(&mut self, key: &str, pressed: bool) -> Option<Action> {
        let slot = key_slot(key)?;
        if pressed {
            self.keys |= 1 << slot;
        } else {
            self.keys &= !(1 << slot);
        }
        Some(KEY_BINDINGS[slot].1)
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
            || KEY_BINDINGS
                .iter()
                .enumerate()
                .any(|(slot, (_, bound))| *bound == action && self.keys & (1 << slot) != 0)
    }

    /// The single movement direction governing this tick, if any
    pub fn movement(&self) -> Option<Direction> {
        [
            (Action::Up, Direction::Up),
            (Action::Right, Direction::Right),
            (Action::Down, Direction::Down),
            (Action::Left, Direction::Left),
        ]
        .into_iter()
        .find(|(action, _)| self.is_held(*action))
        .map(|(_, dir)| dir)
    }

    pub fn fire(&self) -> bool {
        self.is_held(Action::Fire)
    }
}
