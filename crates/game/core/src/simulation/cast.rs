//! Cast pipeline: readiness, target validation, commit, resolution.
//!
//! Everything that can refuse a cast runs before [`Hero::commit_cast`], so
//! a refused cast never costs mana or starts a cooldown. Once committed a
//! cast always completes; an area or line that hits nobody still counts.

use glam::Vec3;
use tracing::{debug, trace};

use ecs::Entity;

use super::Simulation;
use crate::ability::AbilityShape;
use crate::combat::{Effect, EffectKind};
use crate::error::{CastError, GameError};
use crate::hero::Hero;
use crate::stats::StatBonus;
use crate::targeting::CastTarget;
use crate::transform::Transform;

/// One hero touched by a cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recipient {
    pub target: Entity,
    /// Damage after mitigation, or health actually restored.
    pub amount: f32,
}

/// Result of a successful cast.
#[derive(Clone, Debug, PartialEq)]
pub struct CastOutcome {
    pub ability: String,
    pub mana_spent: f32,
    /// Effect applied to `recipients`; `None` for self-buffs.
    pub effect: Option<EffectKind>,
    /// Raw amount each recipient was hit or healed for, before mitigation.
    pub amount: f32,
    pub recipients: Vec<Recipient>,
    /// Bonus applied to the caster by a self-buff.
    pub buff: Option<StatBonus>,
}

/// Validated aim, computed before anything is committed.
#[derive(Clone, Copy, Debug)]
enum Aim {
    Entity(Entity),
    Radius { center: Vec3, radius: f32 },
    Line { origin: Vec3, direction: Vec3, width: f32 },
    Caster,
}

impl Simulation {
    /// Casts the ability in `slot` of the hero on `caster`.
    ///
    /// Checks run in this order: caster, slot, cooldown, target, mana.
    /// The effect amount is computed once from the caster's stats at cast
    /// time and applied identically to every recipient. Resolved targets
    /// without a hero are skipped.
    pub fn cast(
        &mut self,
        caster: Entity,
        slot: usize,
        target: CastTarget,
    ) -> Result<CastOutcome, CastError> {
        let result = self.try_cast(caster, slot, target);
        match &result {
            Ok(outcome) => debug!(
                target: "game::cast",
                %caster,
                ability = %outcome.ability,
                mana = outcome.mana_spent,
                recipients = outcome.recipients.len(),
                "cast resolved"
            ),
            Err(err) => debug!(
                target: "game::cast",
                %caster,
                slot,
                code = err.error_code(),
                severity = err.severity().as_str(),
                "cast refused: {err}"
            ),
        }
        result
    }

    fn try_cast(
        &mut self,
        caster: Entity,
        slot: usize,
        target: CastTarget,
    ) -> Result<CastOutcome, CastError> {
        if !self.world.is_alive(caster) {
            return Err(CastError::UnknownCaster { caster });
        }
        let hero = self
            .world
            .get::<Hero>(caster)
            .ok_or(CastError::UnknownCaster { caster })?;

        let ability = hero.ready_ability(caster, slot)?;
        let name = ability.name().to_string();
        let shape = *ability.shape();
        let mana_spent = ability.mana_cost();
        let amount = ability.effect_amount(&hero.current_stats()).unwrap_or(0.0);

        let aim = self.aim(caster, &name, &shape, target)?;

        self.world
            .get_mut::<Hero>(caster)
            .ok_or(CastError::UnknownCaster { caster })?
            .commit_cast(caster, slot)?;

        let mut outcome = CastOutcome {
            ability: name,
            mana_spent,
            effect: shape.effect().map(|effect| effect.kind),
            amount,
            recipients: Vec::new(),
            buff: None,
        };

        match shape.effect() {
            Some(effect) => {
                let targets = self.resolve(aim);
                outcome.recipients = self.apply_effect(effect, amount, targets);
            }
            None => outcome.buff = self.apply_self_buff(caster, slot),
        }

        Ok(outcome)
    }

    /// Shape-specific validation; nothing here mutates the world.
    fn aim(
        &self,
        caster: Entity,
        ability: &str,
        shape: &AbilityShape,
        target: CastTarget,
    ) -> Result<Aim, CastError> {
        let caster_position = || {
            self.world
                .get::<Transform>(caster)
                .map(|transform| transform.position)
                .ok_or_else(|| CastError::MissingPosition {
                    caster,
                    ability: ability.to_string(),
                })
        };

        match *shape {
            AbilityShape::SingleTarget { .. } => {
                let CastTarget::Entity(entity) = target else {
                    return Err(CastError::MissingTarget {
                        ability: ability.to_string(),
                    });
                };
                if !self.world.is_active(entity) {
                    return Err(CastError::InactiveTarget { target: entity });
                }
                if !self.world.has::<Hero>(entity) {
                    return Err(CastError::TargetNotHero { target: entity });
                }
                Ok(Aim::Entity(entity))
            }
            AbilityShape::Area { radius, .. } => {
                let center = match target {
                    CastTarget::Point(point) => point,
                    _ => caster_position()?,
                };
                Ok(Aim::Radius { center, radius })
            }
            AbilityShape::Line { width, .. } => {
                let direction = match target {
                    CastTarget::Direction(direction) => direction.try_normalize(),
                    _ => None,
                }
                .ok_or_else(|| CastError::InvalidDirection {
                    ability: ability.to_string(),
                })?;
                Ok(Aim::Line {
                    origin: caster_position()?,
                    direction,
                    width,
                })
            }
            AbilityShape::SelfBuff { .. } => Ok(Aim::Caster),
        }
    }

    fn resolve(&self, aim: Aim) -> Vec<Entity> {
        match aim {
            Aim::Entity(entity) => vec![entity],
            Aim::Radius { center, radius } => self
                .targeting
                .find_targets_in_radius(&self.world, center, radius)
                .into_iter()
                .collect(),
            Aim::Line {
                origin,
                direction,
                width,
            } => self
                .targeting
                .find_targets_along_line(&self.world, origin, direction, width)
                .into_iter()
                .collect(),
            Aim::Caster => Vec::new(),
        }
    }

    fn apply_effect(&mut self, effect: &Effect, amount: f32, targets: Vec<Entity>) -> Vec<Recipient> {
        let mut recipients = Vec::with_capacity(targets.len());
        for target in targets {
            let Some(hero) = self.world.get_mut::<Hero>(target) else {
                trace!(target: "game::cast", entity = %target, "skipping target without hero");
                continue;
            };
            let applied = match effect.kind {
                EffectKind::Damage(damage_type) => hero.take_damage(amount, damage_type),
                EffectKind::Heal => hero.heal(amount),
            };
            recipients.push(Recipient {
                target,
                amount: applied,
            });
        }
        recipients
    }

    /// Starts (or restarts) the buff in `slot` and moves the bonus onto the caster.
    fn apply_self_buff(&mut self, caster: Entity, slot: usize) -> Option<StatBonus> {
        let activation = self
            .world
            .get_mut::<Hero>(caster)?
            .ability_mut(slot)?
            .activate_buff(caster)?;

        if let Some(previous) = activation.replaced {
            if let Some(holder) = self.world.get_mut::<Hero>(previous.caster) {
                holder.remove_bonus(previous.bonus);
            }
        }
        self.world
            .get_mut::<Hero>(caster)?
            .apply_bonus(activation.applied);
        Some(activation.applied)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use ecs::World;

    use super::*;
    use crate::ability::{Ability, AbilityFactory};
    use crate::combat::{DamageType, Scaling};
    use crate::config::SimulationConfig;
    use crate::hero::HeroId;
    use crate::targeting::{NoTargets, TargetingOracle};

    /// Returns the same entities for every query.
    struct Everyone(BTreeSet<Entity>);

    impl TargetingOracle for Everyone {
        fn find_targets_in_radius(&self, _: &World, _: Vec3, _: f32) -> BTreeSet<Entity> {
            self.0.clone()
        }

        fn find_targets_along_line(&self, _: &World, _: Vec3, _: Vec3, _: f32) -> BTreeSet<Entity> {
            self.0.clone()
        }
    }

    fn duel() -> (Simulation, Entity, Entity) {
        let mut sim = Simulation::new(SimulationConfig::default(), NoTargets).unwrap();
        let caster = sim.create_hero(HeroId(1), "Annie").unwrap();
        let target = sim.create_hero(HeroId(2), "Garen").unwrap();
        (sim, caster, target)
    }

    #[test]
    fn refused_single_target_commits_nothing() {
        let (mut sim, caster, target) = duel();
        sim.learn_ability(caster, AbilityFactory::DAMAGE, "q", "Disintegrate")
            .unwrap();
        sim.hero_mut(caster).unwrap().ability_mut(0).unwrap().set_mana_cost(60.0);
        sim.hero_mut(caster).unwrap().ability_mut(0).unwrap().set_cooldown(4.0);
        sim.world_mut().set_active(target, false);

        let err = sim.cast(caster, 0, CastTarget::Entity(target)).unwrap_err();
        assert_eq!(err, CastError::InactiveTarget { target });

        let hero = sim.hero(caster).unwrap();
        assert_eq!(hero.mana(), hero.max_mana());
        assert!(hero.ability(0).unwrap().is_ready());
    }

    #[test]
    fn line_needs_a_direction() {
        let (mut sim, caster, _) = duel();
        sim.learn_ability(caster, AbilityFactory::SKILLSHOT_DAMAGE, "e", "Skillshot")
            .unwrap();

        let err = sim.cast(caster, 0, CastTarget::Direction(Vec3::ZERO)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DIRECTION");

        let err = sim.cast(caster, 0, CastTarget::None).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DIRECTION");
    }

    #[test]
    fn area_hits_every_resolved_hero_for_the_same_amount() {
        let (mut sim, caster, target) = duel();
        let bystander = sim.world_mut().create_entity();
        sim.set_targeting(Everyone(BTreeSet::from([target, bystander, caster])));

        let blast = Ability::new(
            "r",
            "Tibbers",
            AbilityShape::Area {
                radius: 3.0,
                effect: Effect::damage(DamageType::Magical, Scaling::new(100.0, 0.0, 0.0, 0.0)),
            },
        );
        sim.hero_mut(caster).unwrap().add_ability(blast);

        let outcome = sim.cast(caster, 0, CastTarget::None).unwrap();
        let hit: Vec<_> = outcome.recipients.iter().map(|r| r.target).collect();
        assert_eq!(hit, [caster, target]);
        assert_eq!(outcome.amount, 100.0);
    }
}
