//! Headless asteroids driver
//!
//! Loads `asteroids.toml` (or the path given as the first argument), spawns
//! the starting entities and runs a scripted flight, logging ship state as it
//! goes. Set `RUST_LOG=debug` for per-entity output.

use arcade_engine::config::Config;
use arcade_engine::foundation::logging;
use asteroids::{Game, GameConfig};

const DEFAULT_CONFIG_PATH: &str = "asteroids.toml";

/// Scripted key events: (frame, combo, pressed)
const FLIGHT_SCRIPT: &[(u64, &str, bool)] = &[
    (0, "ctrl+shift+d", true),
    (0, "w", true),
    (90, "d", true),
    (120, "d", false),
    (240, "w", false),
    (300, "s", true),
    (360, "s", false),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = GameConfig::load_or_default(&config_path)?;
    log::info!("Starting asteroids with config '{}'", config_path);

    let mut game = Game::new(&config)?;
    log::info!(
        "Playfield {}x{}, {} entities",
        config.playfield.width,
        config.playfield.height,
        game.playfield().entity_count()
    );

    for frame in 0..config.simulation.frames {
        for &(_, combo, pressed) in FLIGHT_SCRIPT.iter().filter(|(at, _, _)| *at == frame) {
            if pressed {
                game.key_down(combo)?;
            } else {
                game.key_up(combo)?;
            }
        }

        game.update(config.simulation.frame_delta)?;

        let interval = config.simulation.report_interval;
        if interval > 0 && frame % interval == 0 {
            let ship = game.playfield().movable(game.ship())?;
            log::info!(
                "Frame {:>5}: ship at ({:.1}, {:.1}) speed {:.2} heading {:.3}",
                frame,
                ship.position.x,
                ship.position.y,
                ship.speed(),
                ship.rotation
            );
            if let Some(report) = game.debug_report()? {
                log::debug!("{}", report);
            }
        }
    }

    let sprites = game.sprites()?;
    log::info!(
        "Finished {} frames ({:.1} simulated), {} sprites in final frame",
        game.clock().frame_count(),
        game.clock().total_time(),
        sprites.len()
    );
    Ok(())
}
