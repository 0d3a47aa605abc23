//! Parkour Runner entry point
//!
//! Native builds run a headless demo: boot with whatever art is found under
//! the asset root, start a run and let the autopilot play until game over.
//!
//! Usage: `parkour-runner [asset-root] [skin-id]`
//! Set `PARKOUR_TUNING` to a JSON file to override gameplay constants.

#[cfg(not(target_arch = "wasm32"))]
use parkour_runner::{
    Game, Tuning,
    assets::{AssetManifest, DirectoryStore},
    driver::autopilot,
    sim::{Command, GameEvent, GamePhase, GameState},
    skin::SkinCatalog,
};

/// Five minutes of play at 60 ticks per second
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Parkour Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let asset_root = args.next().unwrap_or_else(|| ".".to_string());
    let skin = args.next();

    let tuning = load_tuning();
    let mut store = DirectoryStore::new(&asset_root);
    let mut game = Game::boot(
        &mut store,
        &AssetManifest::builtin(),
        SkinCatalog::builtin(),
        GameState::with_tuning(tuning),
    );

    if let Some(id) = skin {
        if let Err(e) = game.select_skin(&id) {
            log::warn!("{}; keeping {}", e, game.skins().active().name);
        }
    }

    game.command(Command::Start);

    let mut coins = 0u32;
    let mut hits = 0u32;
    for _ in 0..DEMO_FRAMES {
        let input = autopilot(game.state());
        if input.jump {
            game.request_jump();
        }
        if input.slide {
            game.request_slide();
        }

        for event in game.frame() {
            match event {
                GameEvent::CoinCollected { .. } => coins += 1,
                GameEvent::ObstacleHit { kind, health, .. } => {
                    hits += 1;
                    log::info!("Hit {:?}, health {}", kind, health);
                }
                other => log::debug!("{:?}", other),
            }
        }

        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    let snapshot = game.snapshot();
    println!(
        "phase={:?} score={} health={} ticks={} coins={} hits={}",
        snapshot.phase,
        snapshot.score,
        snapshot.health,
        game.state().time_ticks,
        coins,
        hits
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning() -> Tuning {
    let Ok(path) = std::env::var("PARKOUR_TUNING") else {
        return Tuning::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Could not load tuning from {}: {}. Using defaults.", path, e);
            Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Game::frame` themselves
}
