//! Damage types and resistance mitigation.

use crate::config::GameConfig;
use crate::stats::StatsSnapshot;

// ============================================================================
// Damage Type
// ============================================================================

/// Which resistance a hit is checked against.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// Reduced by armor.
    Physical,
    /// Reduced by magic resist.
    #[default]
    Magical,
}

impl DamageType {
    pub const fn is_magical(self) -> bool {
        matches!(self, Self::Magical)
    }

    /// The defender's resistance against this damage type.
    pub fn resistance(self, defender: &StatsSnapshot) -> f32 {
        match self {
            Self::Physical => defender.armor,
            Self::Magical => defender.magic_resist,
        }
    }
}

// ============================================================================
// Mitigation
// ============================================================================

/// Fraction of damage removed by `resistance`.
///
/// # Formula
///
/// ```text
/// reduction = resistance / (100 + resistance)
/// ```
///
/// Resistance is floored at [`GameConfig::MIN_RESISTANCE`] so the
/// denominator stays positive.
pub fn mitigation(resistance: f32) -> f32 {
    let resistance = resistance.max(GameConfig::MIN_RESISTANCE);
    resistance / (GameConfig::MITIGATION_CONSTANT + resistance)
}

/// Damage left after mitigation; 0 for non-positive or non-finite input.
pub fn mitigated(amount: f32, resistance: f32) -> f32 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0.0;
    }
    (amount * (1.0 - mitigation(resistance))).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_thirty_mitigates_about_twenty_three_percent() {
        let applied = mitigated(100.0, 30.0);
        assert!((applied - 76.923).abs() < 1e-3, "applied = {applied}");
    }

    #[test]
    fn zero_resistance_passes_everything() {
        assert_eq!(mitigation(0.0), 0.0);
        assert_eq!(mitigated(42.0, 0.0), 42.0);
    }

    #[test]
    fn non_positive_damage_is_ignored() {
        assert_eq!(mitigated(0.0, 30.0), 0.0);
        assert_eq!(mitigated(-5.0, 30.0), 0.0);
    }

    #[test]
    fn negative_resistance_amplifies_up_to_double() {
        assert!((mitigated(100.0, -25.0) - 133.333).abs() < 1e-3);
        assert_eq!(mitigated(100.0, -50.0), 200.0);
        assert_eq!(mitigated(100.0, -100.0), 200.0);
        assert_eq!(mitigated(100.0, -150.0), 200.0);
    }

    #[test]
    fn non_finite_inputs_mitigate_to_zero() {
        assert_eq!(mitigated(f32::NAN, 30.0), 0.0);
        assert_eq!(mitigated(f32::INFINITY, 30.0), 0.0);
        assert_eq!(mitigated(100.0, f32::INFINITY), 0.0);
    }

    #[test]
    fn damage_type_round_trips_through_strings() {
        assert_eq!("Physical".parse::<DamageType>(), Ok(DamageType::Physical));
        assert_eq!(DamageType::Magical.as_ref(), "magical");
    }
}
