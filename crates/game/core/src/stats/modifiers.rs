//! Temporary additive stat modifiers granted by buffs.

/// Stats a buff can modify.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum BuffStat {
    MovementSpeed,
    AttackDamage,
}

/// A flat bonus to one stat.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBonus {
    pub stat: BuffStat,
    pub amount: f32,
}

impl StatBonus {
    pub const fn new(stat: BuffStat, amount: f32) -> Self {
        Self { stat, amount }
    }
}

/// Sum of every active bonus on a hero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatModifiers {
    pub movement_speed: f32,
    pub attack_damage: f32,
}

impl StatModifiers {
    pub fn apply(&mut self, bonus: StatBonus) {
        *self.slot_mut(bonus.stat) += bonus.amount;
    }

    pub fn remove(&mut self, bonus: StatBonus) {
        *self.slot_mut(bonus.stat) -= bonus.amount;
    }

    pub fn get(&self, stat: BuffStat) -> f32 {
        match stat {
            BuffStat::MovementSpeed => self.movement_speed,
            BuffStat::AttackDamage => self.attack_damage,
        }
    }

    fn slot_mut(&mut self, stat: BuffStat) -> &mut f32 {
        match stat {
            BuffStat::MovementSpeed => &mut self.movement_speed,
            BuffStat::AttackDamage => &mut self.attack_damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_then_remove_restores_zero() {
        let bonus = StatBonus::new(BuffStat::AttackDamage, 12.5);
        let mut modifiers = StatModifiers::default();

        modifiers.apply(bonus);
        assert_eq!(modifiers.get(BuffStat::AttackDamage), 12.5);
        assert_eq!(modifiers.get(BuffStat::MovementSpeed), 0.0);

        modifiers.remove(bonus);
        assert_eq!(modifiers, StatModifiers::default());
    }

    #[test]
    fn buff_stat_parses_from_snake_case() {
        assert_eq!("movement_speed".parse::<BuffStat>(), Ok(BuffStat::MovementSpeed));
        assert_eq!(BuffStat::AttackDamage.to_string(), "attack_damage");
    }
}
