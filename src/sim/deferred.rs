//! Tick-counted deferred actions
//!
//! Delayed effects (enemy respawns, the first item spawn) are queued against
//! the session's frame counter instead of a wall clock, so they freeze while
//! paused and never outlive the session that scheduled them.

use serde::{Deserialize, Serialize};

/// Something to do later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Drop a random power-up on the field
    SpawnItem,
    /// Replace the destroyed enemy in this slot
    RespawnEnemy { slot: usize },
}

/// A queued action with its due frame and owning session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deferred {
    pub due_frame: u64,
    pub generation: u32,
    pub action: DeferredAction,
}

/// Pending deferred actions in scheduling order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeferredQueue {
    pending: Vec<Deferred>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_frame: u64, generation: u32, action: DeferredAction) {
        self.pending.push(Deferred {
            due_frame,
            generation,
            action,
        });
    }

    /// Remove and return every action due at `frame` for `generation`.
    /// Actions from other generations are discarded.
    pub fn drain_due(&mut self, frame: u64, generation: u32) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.pending.retain(|d| {
            if d.generation != generation {
                log::debug!("Dropping stale deferred {:?} (generation {})", d.action, d.generation);
                return false;
            }
            if d.due_frame <= frame {
                due.push(d.action);
                return false;
            }
            true
        });
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Deferred> {
        self.pending.iter()
    }
}
