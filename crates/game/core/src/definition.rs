//! Plain-data hero and ability definitions for authoring tools.
//!
//! A definition is what an editor saves: identity, tuning and the list of
//! abilities by factory type name. Turning one into a live [`Hero`] goes
//! through an [`AbilityFactory`], so unknown type names are caught here
//! instead of at cast time.

use crate::ability::{Ability, AbilityFactory, AbilityParams, AbilityShape};
use crate::config::GameConfig;
use crate::error::SpawnError;
use crate::hero::{Hero, HeroId, HeroRole};
use crate::stats::HeroStats;

/// Authorable fields of one ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Factory type name, e.g. `DamageAbility`.
    pub kind: String,
    pub cooldown: f32,
    pub mana_cost: f32,
    pub range: f32,
    pub level: u32,
    pub params: AbilityParams,
}

impl Default for AbilityDefinition {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            kind: AbilityFactory::DAMAGE.to_string(),
            cooldown: 0.0,
            mana_cost: 0.0,
            range: 0.0,
            level: GameConfig::MIN_ABILITY_LEVEL,
            params: AbilityParams::default(),
        }
    }
}

impl AbilityDefinition {
    /// Creates the ability through `factory` and applies every authored field.
    pub fn build(&self, factory: &AbilityFactory) -> Result<Ability, SpawnError> {
        let mut ability = factory
            .create(&self.kind, self.id.as_str(), self.name.as_str())
            .ok_or_else(|| SpawnError::UnknownAbilityType {
                type_name: self.kind.clone(),
            })?;

        ability.set_description(self.description.as_str());
        ability.set_cooldown(self.cooldown);
        ability.set_mana_cost(self.mana_cost);
        ability.set_range(self.range);
        ability.set_level(self.level);
        self.params.apply_to(&mut ability);
        Ok(ability)
    }

    /// Captures an existing ability. `kind` has to be supplied because an
    /// instance does not remember which factory entry built it.
    pub fn from_ability(ability: &Ability, kind: impl Into<String>) -> Self {
        Self {
            id: ability.id().to_string(),
            name: ability.name().to_string(),
            description: ability.description().to_string(),
            kind: kind.into(),
            cooldown: ability.cooldown(),
            mana_cost: ability.mana_cost(),
            range: ability.range(),
            level: ability.level(),
            params: AbilityParams::from_ability(ability),
        }
    }

    /// Best-effort stock type name for a shape.
    pub fn stock_kind(shape: &AbilityShape) -> &'static str {
        use crate::combat::EffectKind;
        use crate::stats::BuffStat;

        match shape {
            AbilityShape::SingleTarget { effect } => match effect.kind {
                EffectKind::Heal => AbilityFactory::HEAL,
                EffectKind::Damage(_) => AbilityFactory::DAMAGE,
            },
            AbilityShape::Area { .. } => AbilityFactory::AREA_DAMAGE,
            AbilityShape::Line { .. } => AbilityFactory::SKILLSHOT_DAMAGE,
            AbilityShape::SelfBuff { bonus, .. } => match bonus.stat {
                BuffStat::MovementSpeed => AbilityFactory::MOVEMENT_SPEED_BUFF,
                BuffStat::AttackDamage => AbilityFactory::ATTACK_DAMAGE_BUFF,
            },
        }
    }
}

/// Authorable fields of one hero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroDefinition {
    pub id: HeroId,
    pub name: String,
    pub description: String,
    pub role: HeroRole,
    pub difficulty: u8,
    pub stats: HeroStats,
    pub abilities: Vec<AbilityDefinition>,
}

impl Default for HeroDefinition {
    fn default() -> Self {
        Self {
            id: HeroId::default(),
            name: String::new(),
            description: String::new(),
            role: HeroRole::default(),
            difficulty: GameConfig::DEFAULT_DIFFICULTY,
            stats: HeroStats::default(),
            abilities: Vec::new(),
        }
    }
}

impl HeroDefinition {
    /// Builds a level-1 hero with every listed ability.
    ///
    /// Fails on the first ability whose type is not registered.
    pub fn build(&self, factory: &AbilityFactory) -> Result<Hero, SpawnError> {
        let mut hero = Hero::new(self.id, self.name.as_str());
        hero.set_description(self.description.as_str());
        hero.set_role(self.role);
        hero.set_difficulty(self.difficulty);
        hero.set_base_stats(self.stats);

        for definition in &self.abilities {
            hero.add_ability(definition.build(factory)?);
        }
        Ok(hero)
    }

    /// Captures a live hero's authorable fields.
    pub fn from_hero(hero: &Hero) -> Self {
        Self {
            id: hero.id(),
            name: hero.name().to_string(),
            description: hero.description().to_string(),
            role: hero.role(),
            difficulty: hero.difficulty(),
            stats: *hero.base_stats(),
            abilities: hero
                .abilities()
                .iter()
                .map(|ability| {
                    AbilityDefinition::from_ability(ability, AbilityDefinition::stock_kind(ability.shape()))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageType, Scaling};

    fn mage() -> HeroDefinition {
        HeroDefinition {
            id: HeroId(7),
            name: "Lux".into(),
            role: HeroRole::Mage,
            difficulty: 12,
            abilities: vec![
                AbilityDefinition {
                    id: "q".into(),
                    name: "Light Binding".into(),
                    kind: AbilityFactory::SKILLSHOT_DAMAGE.into(),
                    cooldown: 11.0,
                    mana_cost: 50.0,
                    params: AbilityParams {
                        scaling: Scaling::new(80.0, 40.0, 0.6, 0.0),
                        damage_type: Some(DamageType::Magical),
                        width: 1.2,
                        speed: 1200.0,
                        ..AbilityParams::default()
                    },
                    ..AbilityDefinition::default()
                },
                AbilityDefinition {
                    id: "w".into(),
                    name: "Prismatic Barrier".into(),
                    kind: AbilityFactory::HEAL.into(),
                    ..AbilityDefinition::default()
                },
            ],
            ..HeroDefinition::default()
        }
    }

    #[test]
    fn build_applies_authored_fields() {
        let hero = mage().build(&AbilityFactory::with_defaults()).unwrap();

        assert_eq!(hero.id(), HeroId(7));
        assert_eq!(hero.role(), HeroRole::Mage);
        assert_eq!(hero.difficulty(), 10);
        assert_eq!(hero.abilities().len(), 2);

        let q = hero.ability(0).unwrap();
        assert_eq!(q.cooldown(), 11.0);
        assert_eq!(q.mana_cost(), 50.0);
        assert!(matches!(
            q.shape(),
            AbilityShape::Line { width, speed, .. } if *width == 1.2 && *speed == 1200.0
        ));
    }

    #[test]
    fn unknown_ability_type_is_reported() {
        let mut definition = mage();
        definition.abilities[1].kind = "Teleport".into();

        let err = definition.build(&AbilityFactory::with_defaults()).unwrap_err();
        assert_eq!(
            err,
            SpawnError::UnknownAbilityType {
                type_name: "Teleport".into()
            }
        );
    }

    #[test]
    fn from_hero_recovers_the_definition() {
        let factory = AbilityFactory::with_defaults();
        let mut original = mage();
        original.difficulty = 10;

        let hero = original.build(&factory).unwrap();
        assert_eq!(HeroDefinition::from_hero(&hero), original);
    }
}
