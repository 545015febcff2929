//! Arena skirmish binary.
//!
//! Loads configuration from the environment (and `.env`), spawns a roster
//! and runs the scripted skirmish to completion.
//!
//! ```bash
//! RUST_LOG=game::cast=debug ARENA_DURATION=30 cargo run -p arena-sim
//! ARENA_ROSTER=heroes.json ARENA_LOG_DIR=logs cargo run -p arena-sim
//! ```

use anyhow::Result;
use arena_sim::{Roster, Skirmish, SkirmishConfig, logging};
use game_core::AbilityFactory;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SkirmishConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting arena skirmish");
    tracing::info!(
        "Fixed rate: {} Hz, frame: {:.4}s, duration: {}s",
        config.simulation.fixed_update_rate,
        config.frame_dt,
        config.duration
    );

    let roster = match &config.roster_path {
        Some(path) => {
            tracing::info!("Roster: {}", path.display());
            Roster::load(path, &AbilityFactory::with_defaults())?
        }
        None => {
            tracing::debug!("No ARENA_ROSTER set, using built-in roster");
            Roster::builtin()
        }
    };

    let report = Skirmish::new(config, &roster)?.run();

    for standing in &report.standings {
        tracing::info!(
            "{} ({}): {:.1}/{:.1} hp",
            standing.name,
            standing.hero,
            standing.health,
            standing.max_health
        );
    }
    match report.winner {
        Some(winner) => tracing::info!("Winner: {} after {:.1}s", winner, report.elapsed),
        None => tracing::info!("Draw after {:.1}s", report.elapsed),
    }

    Ok(())
}
