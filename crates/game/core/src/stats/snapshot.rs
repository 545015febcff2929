//! StatsSnapshot - effective stats at a point in time.
//!
//! Snapshots are computed on demand from the base block, the current level
//! and active modifiers. Ability scaling reads one at cast time.

/// Effective hero stats.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    pub max_health: f32,
    pub max_mana: f32,
    pub attack_damage: f32,
    pub ability_power: f32,
    pub armor: f32,
    pub magic_resist: f32,
    pub attack_speed: f32,
    pub movement_speed: f32,
    pub health_regen: f32,
    pub mana_regen: f32,
    pub crit_chance: f32,
    pub crit_damage: f32,
    pub life_steal: f32,
    pub cooldown_reduction: f32,
}
