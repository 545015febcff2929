//! Scripted free-for-all between the heroes of a roster.
//!
//! Every hero stands still and, each frame, fires whatever is off cooldown
//! at its nearest living opponent. The script is deliberately dumb; it
//! exists to drive casts, regeneration and buff timers end to end.
use anyhow::Result;
use ecs::Entity;
use game_core::{
    AbilityShape, CastTarget, EffectKind, GameError, HeroId, Simulation, Transform,
};
use glam::Vec3;
use tracing::{debug, info};

use crate::config::SkirmishConfig;
use crate::oracle::ProximityOracle;
use crate::roster::Roster;

/// Final state of one hero.
#[derive(Clone, Debug, PartialEq)]
pub struct Standing {
    pub hero: HeroId,
    pub name: String,
    pub health: f32,
    pub max_health: f32,
}

impl Standing {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// What happened during [`Skirmish::run`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkirmishReport {
    pub frames: u32,
    pub fixed_steps: u64,
    pub elapsed: f32,
    pub casts: u32,
    pub refusals: u32,
    pub standings: Vec<Standing>,
    /// Last hero standing; `None` on a draw.
    pub winner: Option<HeroId>,
}

#[derive(Debug)]
pub struct Skirmish {
    config: SkirmishConfig,
    sim: Simulation,
    heroes: Vec<Entity>,
}

impl Skirmish {
    /// Spawns every roster hero on the x axis, `spawn_spacing` apart.
    pub fn new(config: SkirmishConfig, roster: &Roster) -> Result<Self> {
        let mut sim = Simulation::new(config.simulation.clone(), ProximityOracle)?;

        let mut heroes = Vec::with_capacity(roster.heroes.len());
        for (index, definition) in roster.heroes.iter().enumerate() {
            let position = Vec3::new(index as f32 * config.spawn_spacing, 0.0, 0.0);
            heroes.push(sim.spawn_hero_at(definition, position)?);
        }

        Ok(Self {
            config,
            sim,
            heroes,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn heroes(&self) -> &[Entity] {
        &self.heroes
    }

    /// Runs until one hero is left or the frame budget is spent.
    pub fn run(mut self) -> SkirmishReport {
        let mut report = SkirmishReport::default();
        let budget = self.config.frame_budget();

        while report.frames < budget && self.living().len() > 1 {
            let frame = self.sim.advance(self.config.frame_dt);
            report.frames += 1;
            report.elapsed += self.config.frame_dt;

            if frame.fixed_steps > 0 {
                self.act(&mut report);
            }
        }

        report.fixed_steps = self.sim.clock().fixed_ticks();
        report.standings = self.standings();
        report.winner = match self.living().as_slice() {
            [survivor] => self.sim.hero(*survivor).map(|hero| hero.id()),
            _ => None,
        };

        info!(
            target: "game::sim",
            frames = report.frames,
            elapsed = report.elapsed,
            casts = report.casts,
            refusals = report.refusals,
            winner = ?report.winner,
            "skirmish finished"
        );
        report
    }

    fn living(&self) -> Vec<Entity> {
        self.heroes
            .iter()
            .copied()
            .filter(|&entity| self.sim.hero(entity).is_some_and(|hero| !hero.is_dead()))
            .collect()
    }

    fn standings(&self) -> Vec<Standing> {
        self.heroes
            .iter()
            .filter_map(|&entity| self.sim.hero(entity))
            .map(|hero| Standing {
                hero: hero.id(),
                name: hero.name().to_string(),
                health: hero.health(),
                max_health: hero.max_health(),
            })
            .collect()
    }

    fn nearest_opponent(&self, entity: Entity, living: &[Entity]) -> Option<(Entity, Vec3)> {
        let origin = self.sim.position(entity)?;
        living
            .iter()
            .filter(|&&other| other != entity)
            .filter_map(|&other| Some((other, self.sim.position(other)?)))
            .min_by(|(_, a), (_, b)| origin.distance_squared(*a).total_cmp(&origin.distance_squared(*b)))
    }

    fn act(&mut self, report: &mut SkirmishReport) {
        let living = self.living();
        for &caster in &living {
            let Some((opponent, opponent_position)) = self.nearest_opponent(caster, &living) else {
                continue;
            };
            let slots = self.sim.hero(caster).map_or(0, |hero| hero.abilities().len());

            for slot in 0..slots {
                let Some(target) = self.aim(caster, slot, opponent, opponent_position) else {
                    continue;
                };
                match self.sim.cast(caster, slot, target) {
                    Ok(outcome) => {
                        report.casts += 1;
                        info!(
                            target: "game::sim",
                            %caster,
                            ability = %outcome.ability,
                            amount = outcome.amount,
                            recipients = outcome.recipients.len(),
                            "cast"
                        );
                    }
                    Err(err) => {
                        report.refusals += 1;
                        debug!(target: "game::sim", %caster, slot, code = err.error_code(), "cast refused");
                    }
                }
            }
        }
    }

    /// Picks a target for `slot`, or `None` when casting now would be wasted.
    fn aim(
        &mut self,
        caster: Entity,
        slot: usize,
        opponent: Entity,
        opponent_position: Vec3,
    ) -> Option<CastTarget> {
        let hero = self.sim.hero(caster)?;
        let ability = hero.ability(slot)?;
        if !ability.is_ready() {
            return None;
        }
        let shape = *ability.shape();
        let buff_running = ability.buff().is_active();
        let wounded = hero.health() < hero.max_health();

        match shape {
            AbilityShape::SingleTarget { effect } => match effect.kind {
                EffectKind::Heal if wounded => Some(CastTarget::Entity(caster)),
                EffectKind::Heal => None,
                EffectKind::Damage(_) => Some(CastTarget::Entity(opponent)),
            },
            AbilityShape::Area { .. } => Some(CastTarget::Point(opponent_position)),
            AbilityShape::Line { .. } => {
                let direction = opponent_position - self.sim.position(caster)?;
                if let Some(transform) = self.sim.world_mut().get_mut::<Transform>(caster) {
                    transform.face(direction);
                }
                Some(CastTarget::Direction(direction))
            }
            AbilityShape::SelfBuff { .. } if !buff_running => Some(CastTarget::None),
            AbilityShape::SelfBuff { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short(duration: f32) -> SkirmishConfig {
        SkirmishConfig {
            duration,
            ..SkirmishConfig::default()
        }
    }

    #[test]
    fn heroes_spawn_along_the_x_axis() {
        let skirmish = Skirmish::new(short(1.0), &Roster::builtin()).unwrap();
        let positions: Vec<_> = skirmish
            .heroes()
            .iter()
            .map(|&entity| skirmish.simulation().position(entity).unwrap())
            .collect();
        assert_eq!(positions, [Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)]);
    }

    #[test]
    fn opening_volley_lands() {
        let report = Skirmish::new(short(0.1), &Roster::builtin()).unwrap().run();

        assert!(report.casts > 0);
        assert!(report.frames <= 4);
        assert!(report
            .standings
            .iter()
            .all(|standing| standing.health < standing.max_health));
    }

    #[test]
    fn long_skirmish_ends_with_a_winner() {
        let report = Skirmish::new(short(600.0), &Roster::builtin()).unwrap().run();

        let survivors: Vec<_> = report.standings.iter().filter(|s| s.is_alive()).collect();
        assert_eq!(survivors.len(), 1);
        assert_eq!(report.winner, Some(survivors[0].hero));
        assert!(report.elapsed < 600.0);
    }
}
