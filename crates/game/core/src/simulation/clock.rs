//! Fixed-step accumulator.

use crate::config::SimulationConfig;

/// Converts variable frame durations into a whole number of fixed ticks.
///
/// Leftover time smaller than one fixed delta carries over to the next
/// frame. When a frame would need more ticks than
/// [`SimulationConfig::max_fixed_steps_per_frame`], the excess whole ticks
/// are dropped and only the fractional remainder is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedStepClock {
    accumulator: f32,
    fixed_ticks: u64,
}

impl FixedStepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time waiting for the next fixed tick, in seconds.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Fixed ticks handed out since construction.
    pub fn fixed_ticks(&self) -> u64 {
        self.fixed_ticks
    }

    /// Adds `frame_dt` and returns how many fixed ticks are now due.
    ///
    /// Non-positive and non-finite durations add nothing.
    pub fn accumulate(&mut self, frame_dt: f32, config: &SimulationConfig) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let step = config.fixed_delta();
        if self.accumulator < step {
            return 0;
        }

        // Float-to-int `as` saturates, so absurd frames cannot overflow.
        let due = (self.accumulator / step).floor() as u32;
        let steps = config
            .max_fixed_steps_per_frame
            .map_or(due, |max| due.min(max));
        self.accumulator %= step;

        self.fixed_ticks += u64::from(steps);
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter_second() -> SimulationConfig {
        SimulationConfig::with_fixed_update_rate(4)
    }

    #[test]
    fn remainder_carries_into_next_frame() {
        let config = quarter_second();
        let mut clock = FixedStepClock::new();

        assert_eq!(clock.accumulate(0.6, &config), 2);
        assert!((clock.accumulator() - 0.1).abs() < 1e-5);

        assert_eq!(clock.accumulate(0.5, &config), 2);
        assert!((clock.accumulator() - 0.1).abs() < 1e-5);
        assert_eq!(clock.fixed_ticks(), 4);
    }

    #[test]
    fn short_frames_run_nothing() {
        let config = quarter_second();
        let mut clock = FixedStepClock::new();

        assert_eq!(clock.accumulate(0.125, &config), 0);
        assert_eq!(clock.accumulate(0.125, &config), 1);
    }

    #[test]
    fn catch_up_bound_drops_whole_steps() {
        let config = SimulationConfig {
            max_fixed_steps_per_frame: Some(2),
            ..quarter_second()
        };
        let mut clock = FixedStepClock::new();

        assert_eq!(clock.accumulate(1.3, &config), 2);
        assert!((clock.accumulator() - 0.05).abs() < 1e-5);
    }

    #[test]
    fn negative_and_nan_frames_are_ignored() {
        let config = quarter_second();
        let mut clock = FixedStepClock::new();

        assert_eq!(clock.accumulate(-1.0, &config), 0);
        assert_eq!(clock.accumulate(f32::NAN, &config), 0);
        assert_eq!(clock.accumulator(), 0.0);
    }

    #[test]
    fn huge_frame_returns_at_once() {
        let config = SimulationConfig::default();
        let mut clock = FixedStepClock::new();

        let steps = clock.accumulate(600_000.0, &config);
        assert!(steps >= 35_990_000, "steps = {steps}");
        assert!(clock.accumulator() < config.fixed_delta());
        assert_eq!(clock.fixed_ticks(), u64::from(steps));
    }

    #[test]
    fn huge_frame_respects_catch_up_bound() {
        let config = SimulationConfig {
            max_fixed_steps_per_frame: Some(8),
            ..SimulationConfig::default()
        };
        let mut clock = FixedStepClock::new();

        assert_eq!(clock.accumulate(1.0e9, &config), 8);
        assert!(clock.accumulator() < config.fixed_delta());
    }
}
