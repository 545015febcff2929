//! Skirmish harness configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use game_core::SimulationConfig;

/// Settings for one headless skirmish run.
#[derive(Clone, Debug, PartialEq)]
pub struct SkirmishConfig {
    pub simulation: SimulationConfig,
    /// Simulated seconds before the skirmish is called a draw.
    pub duration: f32,
    /// Variable frame length handed to `Simulation::advance`.
    pub frame_dt: f32,
    /// Distance between neighbouring spawn points.
    pub spawn_spacing: f32,
    /// JSON roster to load instead of the built-in pair.
    pub roster_path: Option<PathBuf>,
    /// Directory for the log file; stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl SkirmishConfig {
    pub const DEFAULT_DURATION: f32 = 60.0;
    pub const DEFAULT_FRAME_DT: f32 = 1.0 / 30.0;
    pub const DEFAULT_SPAWN_SPACING: f32 = 4.0;

    pub fn new() -> Self {
        Self {
            simulation: SimulationConfig::new(),
            duration: Self::DEFAULT_DURATION,
            frame_dt: Self::DEFAULT_FRAME_DT,
            spawn_spacing: Self::DEFAULT_SPAWN_SPACING,
            roster_path: None,
            log_dir: None,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_FIXED_UPDATE_RATE`, `ARENA_MAX_FIXED_STEPS` - see [`SimulationConfig::from_env`]
    /// - `ARENA_DURATION` - Simulated seconds before a draw (default: 60)
    /// - `ARENA_FRAME_RATE` - Variable frames per second (default: 30)
    /// - `ARENA_SPAWN_SPACING` - Distance between spawn points (default: 4)
    /// - `ARENA_ROSTER` - Path to a JSON hero roster (default: built-in)
    /// - `ARENA_LOG_DIR` - Directory for `arena.log` (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.simulation = SimulationConfig::from_env();

        if let Some(duration) = read_env::<f32>("ARENA_DURATION") {
            if duration.is_finite() && duration > 0.0 {
                config.duration = duration;
            }
        }

        if let Some(rate) = read_env::<u32>("ARENA_FRAME_RATE") {
            config.frame_dt = 1.0 / rate.max(1) as f32;
        }

        if let Some(spacing) = read_env::<f32>("ARENA_SPAWN_SPACING") {
            if spacing.is_finite() {
                config.spawn_spacing = spacing.abs();
            }
        }

        config.roster_path = env::var("ARENA_ROSTER").ok().map(PathBuf::from);
        config.log_dir = env::var("ARENA_LOG_DIR").ok().map(PathBuf::from);

        config
    }

    /// Number of variable frames the skirmish may run.
    pub fn frame_budget(&self) -> u32 {
        (self.duration / self.frame_dt).ceil() as u32
    }
}

impl Default for SkirmishConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
