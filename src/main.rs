//! Tank Skirmish entry point
//!
//! Headless native runner: plays one match with a simple autopilot and logs
//! the HUD. Pass a settings JSON path as the first argument to override
//! defaults; `RUST_LOG=debug` shows every kill and spawn.

#[cfg(not(target_arch = "wasm32"))]
use tank_skirmish::{
    Game, Settings, shop,
    sim::{Action, GameEvent, ItemKind, Tank},
};

/// Give up after five minutes of simulated play
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 5 * 60 * tank_skirmish::consts::TICKS_PER_SECOND as u64;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let settings = std::env::args()
        .nth(1)
        .map(|path| Settings::load_or_default(std::path::Path::new(&path)))
        .unwrap_or_default();
    match settings.to_json() {
        Ok(json) => log::debug!("Effective settings: {}", json),
        Err(e) => log::warn!("Cannot serialize settings: {}", e),
    }

    let mut game = Game::new(settings);
    log::info!("Tank Skirmish (headless) starting, seed {}", game.seed());

    let hud_interval = 10 * tank_skirmish::consts::TICKS_PER_SECOND as u64;
    for frame in 0..MAX_FRAMES {
        if !game.wants_frames() {
            break;
        }
        autopilot(&mut game);
        for event in game.step_frame() {
            match event {
                GameEvent::PlayerHit { hp } => log::info!("Hit! {} HP left", hp),
                GameEvent::ItemCollected { kind, .. } => log::info!("Picked up {}", kind.as_str()),
                GameEvent::Victory | GameEvent::Defeat => log::info!("{}", game.hud()),
                _ => {}
            }
        }
        if frame % hud_interval == 0 {
            log::info!("{}", game.hud());
        }
    }

    println!("{}", game.hud());
    match game.state().profile.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Cannot serialize profile: {}", e),
    }
}

/// Line up under the nearest enemy and keep shooting; buy a shield when affordable
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(game: &mut Game) {
    let hud = game.hud();
    let shield_price = shop::consumable(ItemKind::Shield).price;
    if !hud.shield_active && hud.gold >= shield_price && game.buy_consumable(ItemKind::Shield).is_ok() {
        log::info!("Autopilot bought a shield");
    }

    let state = game.state();
    let player_x = state.player.bounds().center().x;
    let target = state
        .live_enemies()
        .map(|e: &Tank| e.bounds().center().x)
        .min_by(|a, b| {
            (a - player_x)
                .abs()
                .partial_cmp(&(b - player_x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let (left, right) = match target {
        Some(x) if x < player_x - 6.0 => (true, false),
        Some(x) if x > player_x + 6.0 => (false, true),
        _ => (false, false),
    };
    game.set_input(Action::Left, left);
    game.set_input(Action::Right, right);
    game.set_input(Action::Up, !left && !right);
    game.set_input(Action::Fire, true);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Game` directly; there is no native loop here
}
