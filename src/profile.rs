//! Player profile: wallet, skins and match tally
//!
//! Lives for the whole process and is handed from one session to the next
//! on restart. Nothing is written to disk.

use serde::{Deserialize, Serialize};

use crate::shop::DEFAULT_SKIN;
use crate::sim::Outcome;

/// Gold, skin ownership and win/loss counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Spendable gold
    pub gold: u32,
    /// Skin IDs owned (always contains the default skin)
    pub owned_skins: Vec<String>,
    /// Skin currently painted on the player's tank
    pub equipped_skin: String,
    /// Matches won
    pub wins: u32,
    /// Matches lost
    pub losses: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            gold: 0,
            owned_skins: vec![DEFAULT_SKIN.to_string()],
            equipped_skin: DEFAULT_SKIN.to_string(),
            wins: 0,
            losses: 0,
        }
    }
}

impl Profile {
    pub fn owns(&self, skin_id: &str) -> bool {
        self.owned_skins.iter().any(|s| s == skin_id)
    }

    /// Deduct `price` if affordable; returns false and changes nothing otherwise
    pub fn spend(&mut self, price: u32) -> bool {
        match self.gold.checked_sub(price) {
            Some(rest) => {
                self.gold = rest;
                true
            }
            None => false,
        }
    }

    /// Tally a finished match
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Lose => self.losses += 1,
        }
    }

    /// Serialize for display/debug collaborators
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
