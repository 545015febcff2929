//! Base stat block and per-level growth.

use super::modifiers::StatModifiers;
use super::snapshot::StatsSnapshot;

/// Per-level increments applied for every level above 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatGrowth {
    pub health: f32,
    pub mana: f32,
    pub attack_damage: f32,
    pub ability_power: f32,
    pub armor: f32,
    pub magic_resist: f32,
    pub attack_speed: f32,
}

impl Default for StatGrowth {
    fn default() -> Self {
        Self {
            health: 90.0,
            mana: 40.0,
            attack_damage: 3.0,
            ability_power: 0.0,
            armor: 3.5,
            magic_resist: 1.25,
            attack_speed: 0.02,
        }
    }
}

/// A hero's authored stats at level 1, plus how they grow.
///
/// This is stored state; everything a fight reads goes through
/// [`HeroStats::snapshot`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroStats {
    pub health: f32,
    pub mana: f32,
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
    pub growth: StatGrowth,
}

impl Default for HeroStats {
    fn default() -> Self {
        Self {
            health: 600.0,
            mana: 300.0,
            attack_damage: 60.0,
            ability_power: 0.0,
            armor: 30.0,
            magic_resist: 30.0,
            attack_speed: 0.7,
            movement_speed: 350.0,
            health_regen: 5.0,
            mana_regen: 3.0,
            crit_chance: 0.0,
            crit_damage: 2.0,
            life_steal: 0.0,
            cooldown_reduction: 0.0,
            growth: StatGrowth::default(),
        }
    }
}

impl HeroStats {
    /// Derives the effective stats at `level` with `modifiers` layered on top.
    ///
    /// `derived = base + growth × (level − 1)`, then additive modifiers.
    pub fn snapshot(&self, level: u32, modifiers: &StatModifiers) -> StatsSnapshot {
        let steps = level.saturating_sub(1) as f32;
        let growth = &self.growth;

        StatsSnapshot {
            max_health: self.health + growth.health * steps,
            max_mana: self.mana + growth.mana * steps,
            attack_damage: self.attack_damage
                + growth.attack_damage * steps
                + modifiers.attack_damage,
            ability_power: self.ability_power + growth.ability_power * steps,
            armor: self.armor + growth.armor * steps,
            magic_resist: self.magic_resist + growth.magic_resist * steps,
            attack_speed: self.attack_speed + growth.attack_speed * steps,
            movement_speed: self.movement_speed + modifiers.movement_speed,
            health_regen: self.health_regen,
            mana_regen: self.mana_regen,
            crit_chance: self.crit_chance,
            crit_damage: self.crit_damage,
            life_steal: self.life_steal,
            cooldown_reduction: self.cooldown_reduction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_snapshot_equals_base() {
        let stats = HeroStats::default();
        let snapshot = stats.snapshot(1, &StatModifiers::default());

        assert_eq!(snapshot.max_health, 600.0);
        assert_eq!(snapshot.max_mana, 300.0);
        assert_eq!(snapshot.armor, 30.0);
        assert_eq!(snapshot.movement_speed, 350.0);
    }

    #[test]
    fn growth_applies_per_level_above_one() {
        let stats = HeroStats::default();
        let snapshot = stats.snapshot(3, &StatModifiers::default());

        assert_eq!(snapshot.max_health, 780.0);
        assert_eq!(snapshot.max_mana, 380.0);
        assert_eq!(snapshot.attack_damage, 66.0);
        assert_eq!(snapshot.armor, 37.0);
        assert_eq!(snapshot.magic_resist, 32.5);
    }

    #[test]
    fn modifiers_layer_on_top_of_growth() {
        let stats = HeroStats::default();
        let modifiers = StatModifiers {
            movement_speed: 25.0,
            attack_damage: 10.0,
        };
        let snapshot = stats.snapshot(2, &modifiers);

        assert_eq!(snapshot.movement_speed, 375.0);
        assert_eq!(snapshot.attack_damage, 73.0);
    }
}
