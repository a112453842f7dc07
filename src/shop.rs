//! Shop: priced consumables and cosmetic skins
//!
//! Rejected purchases leave every piece of state untouched; the error's
//! `Display` text is meant to be shown to the player as-is.

use std::fmt;

use crate::profile::Profile;
use crate::sim::{GameState, ItemKind};

/// Skin every profile starts with
pub const DEFAULT_SKIN: &str = "default";

/// A consumable for sale (same effect as the matching field item)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consumable {
    pub kind: ItemKind,
    pub name: &'static str,
    pub price: u32,
}

/// A cosmetic tank skin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub color: [f32; 4],
    pub price: u32,
}

pub const CONSUMABLES: [Consumable; 3] = [
    Consumable {
        kind: ItemKind::Shield,
        name: "Shield",
        price: 10,
    },
    Consumable {
        kind: ItemKind::Heal,
        name: "Repair Kit",
        price: 8,
    },
    Consumable {
        kind: ItemKind::Speed,
        name: "Booster",
        price: 12,
    },
];

pub const SKINS: [Skin; 3] = [
    Skin {
        id: DEFAULT_SKIN,
        name: "Classic Green",
        color: [0.0, 1.0, 0.0, 1.0],
        price: 0,
    },
    Skin {
        id: "red",
        name: "Blaze Red",
        color: [1.0, 0.2, 0.2, 1.0],
        price: 20,
    },
    Skin {
        id: "blue",
        name: "Deep Space Blue",
        color: [0.2, 0.6, 1.0, 1.0],
        price: 20,
    },
];

/// Why a shop command was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    InsufficientGold { price: u32, gold: u32 },
    UnknownSkin(String),
    AlreadyOwned(String),
    NotOwned(String),
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopError::InsufficientGold { price, gold } => {
                write!(f, "Not enough gold (need {}, have {})", price, gold)
            }
            ShopError::UnknownSkin(id) => write!(f, "No such skin: {}", id),
            ShopError::AlreadyOwned(id) => write!(f, "Skin already owned: {}", id),
            ShopError::NotOwned(id) => write!(f, "Skin not owned: {}", id),
        }
    }
}

impl std::error::Error for ShopError {}

pub fn consumable(kind: ItemKind) -> &'static Consumable {
    match kind {
        ItemKind::Shield => &CONSUMABLES[0],
        ItemKind::Heal => &CONSUMABLES[1],
        ItemKind::Speed => &CONSUMABLES[2],
    }
}

pub fn skin(id: &str) -> Option<&'static Skin> {
    SKINS.iter().find(|s| s.id == id)
}

/// Body color for a skin ID (unknown IDs fall back to the default skin)
pub fn skin_color(id: &str) -> [f32; 4] {
    skin(id).unwrap_or(&SKINS[0]).color
}

/// Buy a consumable and apply it immediately
pub fn buy_consumable(state: &mut GameState, kind: ItemKind) -> Result<(), ShopError> {
    let item = consumable(kind);
    let gold = state.profile.gold;
    if !state.profile.spend(item.price) {
        return Err(ShopError::InsufficientGold {
            price: item.price,
            gold,
        });
    }
    state.status.apply(kind);
    log::info!("Bought {} for {} gold", item.name, item.price);
    Ok(())
}

/// Buy a skin; ownership lasts for the rest of the process
pub fn buy_skin(profile: &mut Profile, id: &str) -> Result<(), ShopError> {
    let skin = skin(id).ok_or_else(|| ShopError::UnknownSkin(id.to_string()))?;
    if profile.owns(skin.id) {
        return Err(ShopError::AlreadyOwned(id.to_string()));
    }
    let gold = profile.gold;
    if !profile.spend(skin.price) {
        return Err(ShopError::InsufficientGold {
            price: skin.price,
            gold,
        });
    }
    profile.owned_skins.push(skin.id.to_string());
    log::info!("Bought skin {} for {} gold", skin.name, skin.price);
    Ok(())
}

/// Equip an owned skin and repaint the live player tank
pub fn equip_skin(state: &mut GameState, id: &str) -> Result<(), ShopError> {
    let skin = skin(id).ok_or_else(|| ShopError::UnknownSkin(id.to_string()))?;
    if !state.profile.owns(skin.id) {
        return Err(ShopError::NotOwned(id.to_string()));
    }
    state.profile.equipped_skin = skin.id.to_string();
    state.set_player_color(skin.color);
    Ok(())
}
