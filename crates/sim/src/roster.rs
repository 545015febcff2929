//! Hero rosters: the built-in pair and JSON files.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use game_core::{
    AbilityDefinition, AbilityFactory, AbilityParams, DamageType, HeroDefinition, HeroId,
    HeroRole, HeroStats, Scaling,
};
use serde::{Deserialize, Serialize};

/// Heroes taking part in a skirmish, in spawn order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub heroes: Vec<HeroDefinition>,
}

impl Roster {
    /// Reads a roster from a JSON file.
    ///
    /// Ability type names are checked against `factory` so a typo fails here
    /// rather than halfway through spawning.
    pub fn load(path: &Path, factory: &AbilityFactory) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read roster {}", path.display()))?;
        let roster: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse roster {}", path.display()))?;
        roster.validate(factory)?;
        Ok(roster)
    }

    pub fn validate(&self, factory: &AbilityFactory) -> Result<()> {
        ensure!(self.heroes.len() >= 2, "a skirmish needs at least two heroes");
        for hero in &self.heroes {
            for ability in &hero.abilities {
                ensure!(
                    factory.contains(&ability.kind),
                    "hero `{}` uses unknown ability type `{}`",
                    hero.name,
                    ability.kind
                );
            }
        }
        Ok(())
    }

    /// A mage and a fighter with one ability of every stock shape between them.
    pub fn builtin() -> Self {
        let mage = HeroDefinition {
            id: HeroId(1),
            name: "Annie".into(),
            description: "Burst mage".into(),
            role: HeroRole::Mage,
            difficulty: 3,
            stats: HeroStats {
                ability_power: 60.0,
                ..HeroStats::default()
            },
            abilities: vec![
                ability(
                    "q",
                    "Disintegrate",
                    AbilityFactory::DAMAGE,
                    4.0,
                    60.0,
                    AbilityParams {
                        scaling: Scaling::new(80.0, 35.0, 0.75, 0.0),
                        ..AbilityParams::default()
                    },
                ),
                ability(
                    "w",
                    "Incinerate",
                    AbilityFactory::AREA_DAMAGE,
                    8.0,
                    70.0,
                    AbilityParams {
                        scaling: Scaling::new(70.0, 45.0, 0.85, 0.0),
                        radius: 3.0,
                        ..AbilityParams::default()
                    },
                ),
                ability(
                    "e",
                    "Molten Shield",
                    AbilityFactory::MOVEMENT_SPEED_BUFF,
                    12.0,
                    20.0,
                    AbilityParams {
                        duration: 3.0,
                        bonus: 50.0,
                        ..AbilityParams::default()
                    },
                ),
            ],
        };

        let fighter = HeroDefinition {
            id: HeroId(2),
            name: "Garen".into(),
            description: "Durable bruiser".into(),
            role: HeroRole::Fighter,
            difficulty: 5,
            stats: HeroStats {
                health: 690.0,
                attack_damage: 66.0,
                armor: 36.0,
                ..HeroStats::default()
            },
            abilities: vec![
                ability(
                    "q",
                    "Decisive Strike",
                    AbilityFactory::SKILLSHOT_DAMAGE,
                    6.0,
                    0.0,
                    AbilityParams {
                        scaling: Scaling::new(30.0, 30.0, 0.0, 1.0),
                        damage_type: Some(DamageType::Physical),
                        width: 2.0,
                        speed: 1500.0,
                        ..AbilityParams::default()
                    },
                ),
                ability(
                    "w",
                    "Courage",
                    AbilityFactory::HEAL,
                    10.0,
                    0.0,
                    AbilityParams {
                        scaling: Scaling::new(60.0, 20.0, 0.0, 0.0),
                        ..AbilityParams::default()
                    },
                ),
                ability(
                    "e",
                    "Judgment",
                    AbilityFactory::ATTACK_DAMAGE_BUFF,
                    9.0,
                    0.0,
                    AbilityParams {
                        duration: 3.0,
                        bonus: 25.0,
                        ..AbilityParams::default()
                    },
                ),
            ],
        };

        Self {
            heroes: vec![mage, fighter],
        }
    }
}

fn ability(
    id: &str,
    name: &str,
    kind: &str,
    cooldown: f32,
    mana_cost: f32,
    params: AbilityParams,
) -> AbilityDefinition {
    AbilityDefinition {
        id: id.into(),
        name: name.into(),
        kind: kind.into(),
        cooldown,
        mana_cost,
        params,
        ..AbilityDefinition::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_roster_is_valid() {
        let roster = Roster::builtin();
        assert!(roster.validate(&AbilityFactory::with_defaults()).is_ok());
    }

    #[test]
    fn unknown_ability_types_are_rejected() {
        let mut roster = Roster::builtin();
        roster.heroes[0].abilities[0].kind = "Teleport".into();

        let err = roster
            .validate(&AbilityFactory::with_defaults())
            .unwrap_err();
        assert!(err.to_string().contains("Teleport"));
    }

    #[test]
    fn a_single_hero_is_not_a_skirmish() {
        let mut roster = Roster::builtin();
        roster.heroes.truncate(1);
        assert!(roster.validate(&AbilityFactory::with_defaults()).is_err());
    }
}
