//! Ability effect payloads and their scaling formula.

use crate::stats::StatsSnapshot;

use super::damage::DamageType;

/// How an effect's magnitude grows with ability level and caster stats.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Scaling {
    pub base: f32,
    pub per_level: f32,
    pub ap_ratio: f32,
    pub ad_ratio: f32,
}

impl Scaling {
    pub const fn new(base: f32, per_level: f32, ap_ratio: f32, ad_ratio: f32) -> Self {
        Self {
            base,
            per_level,
            ap_ratio,
            ad_ratio,
        }
    }

    /// Magnitude before any stat contribution.
    pub fn at_level(&self, level: u32) -> f32 {
        self.base + self.per_level * level.saturating_sub(1) as f32
    }

    /// Full magnitude for a caster.
    ///
    /// # Formula
    ///
    /// ```text
    /// amount = base + per_level × (level − 1) + AP × ap_ratio + AD × ad_ratio
    /// ```
    pub fn amount(&self, level: u32, caster: &StatsSnapshot) -> f32 {
        self.at_level(level)
            + caster.ability_power * self.ap_ratio
            + caster.attack_damage * self.ad_ratio
    }
}

/// What an effect does to each recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Damage(DamageType),
    Heal,
}

/// A damage or healing payload carried by a targeted, area or line ability.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    pub scaling: Scaling,
}

impl Effect {
    pub const fn damage(damage_type: DamageType, scaling: Scaling) -> Self {
        Self {
            kind: EffectKind::Damage(damage_type),
            scaling,
        }
    }

    pub const fn heal(scaling: Scaling) -> Self {
        Self {
            kind: EffectKind::Heal,
            scaling,
        }
    }
}

impl Default for Effect {
    fn default() -> Self {
        Self::damage(DamageType::Magical, Scaling::default())
    }
}
