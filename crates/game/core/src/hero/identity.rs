//! Hero identity types.

use std::fmt;

/// Designer-assigned hero id, distinct from the entity that hosts the hero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HeroId(pub u32);

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hero:{}", self.0)
    }
}

impl From<u32> for HeroId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Gameplay role shown in hero select.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HeroRole {
    /// Absorbs damage, initiates fights
    Tank,
    /// Sustained melee damage with some durability
    #[default]
    Fighter,
    /// Burst damage against isolated targets
    Assassin,
    /// Ability-power damage from range
    Mage,
    /// Attack-damage carry from range
    Marksman,
    /// Heals, shields and utility
    Support,
}
