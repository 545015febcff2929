//! Game rule constants and simulation tunables.

use std::env;

/// Game rule constants.
///
/// These are balance rules, not runtime settings: changing them changes what
/// a cast or level-up means, so they are compile-time constants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    // ===== hero progression =====
    pub const MIN_HERO_LEVEL: u32 = 1;
    pub const MAX_HERO_LEVEL: u32 = 18;
    pub const MIN_DIFFICULTY: u8 = 1;
    pub const MAX_DIFFICULTY: u8 = 10;
    pub const DEFAULT_DIFFICULTY: u8 = 5;
    /// Fraction of missing health and mana restored on level-up.
    pub const LEVEL_UP_RESTORE_RATIO: f32 = 0.3;

    // ===== abilities =====
    pub const MIN_ABILITY_LEVEL: u32 = 1;
    pub const MAX_ABILITY_LEVEL: u32 = 5;

    // ===== combat =====
    /// Resistance value at which half of incoming damage is mitigated.
    pub const MITIGATION_CONSTANT: f32 = 100.0;
    /// Lowest resistance the mitigation formula sees; negative values
    /// amplify damage, at most doubling it.
    pub const MIN_RESISTANCE: f32 = -50.0;
}

/// Runtime-tunable parameters of the fixed-step loop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Fixed-stage ticks per simulated second.
    pub fixed_update_rate: u32,
    /// Upper bound on fixed ticks run by one frame; `None` catches up fully.
    pub max_fixed_steps_per_frame: Option<u32>,
}

impl SimulationConfig {
    pub const DEFAULT_FIXED_UPDATE_RATE: u32 = 60;

    pub fn new() -> Self {
        Self {
            fixed_update_rate: Self::DEFAULT_FIXED_UPDATE_RATE,
            max_fixed_steps_per_frame: None,
        }
    }

    pub fn with_fixed_update_rate(fixed_update_rate: u32) -> Self {
        Self {
            fixed_update_rate: fixed_update_rate.max(1),
            ..Self::new()
        }
    }

    /// Seconds per fixed tick.
    pub fn fixed_delta(&self) -> f32 {
        1.0 / self.fixed_update_rate.max(1) as f32
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_FIXED_UPDATE_RATE` - Fixed ticks per second (default: 60)
    /// - `ARENA_MAX_FIXED_STEPS` - Catch-up bound per frame (default: unbounded)
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Some(rate) = read_env::<u32>("ARENA_FIXED_UPDATE_RATE") {
            config.fixed_update_rate = rate.max(1);
        }

        config.max_fixed_steps_per_frame = read_env::<u32>("ARENA_MAX_FIXED_STEPS");

        config
    }
}

impl Default for SimulationConfig {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_is_sixty_hertz() {
        let config = SimulationConfig::default();
        assert_eq!(config.fixed_update_rate, 60);
        assert!((config.fixed_delta() - 1.0 / 60.0).abs() < f32::EPSILON);
        assert_eq!(config.max_fixed_steps_per_frame, None);
    }

    #[test]
    fn zero_rate_is_clamped() {
        assert_eq!(SimulationConfig::with_fixed_update_rate(0).fixed_update_rate, 1);
    }
}
