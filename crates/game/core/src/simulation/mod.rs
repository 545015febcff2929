//! The simulation context: one world, its processors and the cast pipeline.
//!
//! [`Simulation`] owns everything a match needs (the ECS world, the ability
//! factory and the targeting oracle) so there is no global state. Frames are
//! driven explicitly by [`Simulation::advance`] or [`Simulation::step`];
//! nothing here reads a wall clock.

mod cast;
mod clock;

pub use cast::{CastOutcome, Recipient};
pub use clock::FixedStepClock;

use std::fmt;

use ecs::{EcsError, Entity, World};
use glam::Vec3;
use tracing::{debug, info, trace};

use crate::ability::AbilityFactory;
use crate::config::SimulationConfig;
use crate::definition::HeroDefinition;
use crate::error::SpawnError;
use crate::hero::{Hero, HeroId};
use crate::processors::{AbilityProcessor, HeroProcessor};
use crate::targeting::TargetingOracle;
use crate::transform::Transform;

/// What one call to [`Simulation::advance`] or [`Simulation::step`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Fixed-stage ticks run.
    pub fixed_steps: u32,
    /// Entities released by the deferred-destruction sweep.
    pub released: usize,
}

pub struct Simulation {
    world: World,
    config: SimulationConfig,
    abilities: AbilityFactory,
    targeting: Box<dyn TargetingOracle>,
    clock: FixedStepClock,
}

impl Simulation {
    /// Creates an empty world with the hero and ability processors
    /// registered, in that order.
    pub fn new(
        config: SimulationConfig,
        targeting: impl TargetingOracle + 'static,
    ) -> Result<Self, EcsError> {
        let mut world = World::new();
        world.register_processor(HeroProcessor::new())?;
        world.register_processor(AbilityProcessor)?;

        debug!(
            target: "game::sim",
            fixed_update_rate = config.fixed_update_rate,
            max_fixed_steps = ?config.max_fixed_steps_per_frame,
            "simulation ready"
        );

        Ok(Self {
            world,
            config,
            abilities: AbilityFactory::with_defaults(),
            targeting: Box::new(targeting),
            clock: FixedStepClock::new(),
        })
    }

    // ===== accessors =====

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for custom fragments and processors.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn clock(&self) -> &FixedStepClock {
        &self.clock
    }

    pub fn abilities(&self) -> &AbilityFactory {
        &self.abilities
    }

    pub fn abilities_mut(&mut self) -> &mut AbilityFactory {
        &mut self.abilities
    }

    pub fn set_targeting(&mut self, targeting: impl TargetingOracle + 'static) {
        self.targeting = Box::new(targeting);
    }

    // ===== frame stepping =====

    /// Runs one frame: the deferred-destruction sweep, the variable stage
    /// with `frame_dt`, then as many fixed ticks as the accumulator allows.
    pub fn advance(&mut self, frame_dt: f32) -> FrameReport {
        let released = self.world.process_deferred_destructions();
        self.world.update_all(frame_dt);

        let fixed_steps = self.clock.accumulate(frame_dt, &self.config);
        let fixed_dt = self.config.fixed_delta();
        for _ in 0..fixed_steps {
            self.world.fixed_update_all(fixed_dt);
        }

        trace!(target: "game::sim", frame_dt, fixed_steps, released, "frame advanced");
        FrameReport {
            fixed_steps,
            released,
        }
    }

    /// Runs the sweep and exactly one fixed tick of `dt` seconds, bypassing
    /// the accumulator.
    pub fn step(&mut self, dt: f32) -> FrameReport {
        let released = self.world.process_deferred_destructions();
        self.world.fixed_update_all(dt);
        FrameReport {
            fixed_steps: 1,
            released,
        }
    }

    // ===== heroes =====

    /// Creates an entity carrying a default [`Transform`] and a fresh level-1 hero.
    pub fn create_hero(&mut self, id: HeroId, name: impl Into<String>) -> Result<Entity, EcsError> {
        self.insert_hero(Hero::new(id, name), Vec3::ZERO)
    }

    /// Builds `definition` and places the hero at the origin.
    ///
    /// Nothing is created when an ability type is unknown.
    pub fn spawn_hero(&mut self, definition: &HeroDefinition) -> Result<Entity, SpawnError> {
        self.spawn_hero_at(definition, Vec3::ZERO)
    }

    pub fn spawn_hero_at(
        &mut self,
        definition: &HeroDefinition,
        position: Vec3,
    ) -> Result<Entity, SpawnError> {
        let hero = definition.build(&self.abilities)?;
        Ok(self.insert_hero(hero, position)?)
    }

    fn insert_hero(&mut self, hero: Hero, position: Vec3) -> Result<Entity, EcsError> {
        let entity = self.world.create_entity();
        self.world.attach(entity, Transform::from_position(position))?;
        let hero = self.world.attach(entity, hero)?;

        info!(
            target: "game::hero",
            %entity,
            hero = %hero.id(),
            name = hero.name(),
            abilities = hero.abilities().len(),
            "hero spawned"
        );
        Ok(entity)
    }

    /// Creates an ability through the factory and appends it to the hero on `entity`.
    pub fn learn_ability(
        &mut self,
        entity: Entity,
        type_name: &str,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<usize, SpawnError> {
        let ability = self.abilities.create(type_name, id, name).ok_or_else(|| {
            SpawnError::UnknownAbilityType {
                type_name: type_name.to_string(),
            }
        })?;
        let hero = self
            .world
            .get_mut::<Hero>(entity)
            .ok_or(SpawnError::NotAHero { entity })?;
        Ok(hero.add_ability(ability))
    }

    /// Entity whose hero currently carries `id`.
    ///
    /// Uses the hero processor's index and falls back to a scan when the
    /// id was changed after the hero was attached.
    pub fn get_hero_by_id(&self, id: HeroId) -> Option<Entity> {
        let carries = |entity: Entity| {
            self.world
                .get::<Hero>(entity)
                .is_some_and(|hero| hero.id() == id)
        };

        let indexed = self
            .world
            .processor::<HeroProcessor>()
            .and_then(|processor| processor.entity_for(id));
        match indexed {
            Some(entity) if carries(entity) => Some(entity),
            _ => self.world.matched::<HeroProcessor>()?.find(|&entity| carries(entity)),
        }
    }

    /// Every entity with a hero, in ascending entity order.
    pub fn all_heroes(&self) -> Vec<Entity> {
        self.world
            .matched::<HeroProcessor>()
            .map(|matched| matched.collect())
            .unwrap_or_default()
    }

    pub fn hero(&self, entity: Entity) -> Option<&Hero> {
        self.world.get::<Hero>(entity)
    }

    pub fn hero_mut(&mut self, entity: Entity) -> Option<&mut Hero> {
        self.world.get_mut::<Hero>(entity)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.world
            .get::<Transform>(entity)
            .map(|transform| transform.position)
    }

    /// Moves an entity; `false` if it has no [`Transform`].
    pub fn set_position(&mut self, entity: Entity, position: Vec3) -> bool {
        match self.world.get_mut::<Transform>(entity) {
            Some(transform) => {
                transform.position = position;
                true
            }
            None => false,
        }
    }

    /// Schedules `entity` for removal at the start of the next frame.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        self.world.destroy_entity(entity)
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("world", &self.world)
            .field("config", &self.config)
            .field("abilities", &self.abilities)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::targeting::NoTargets;

    fn simulation() -> Simulation {
        Simulation::new(SimulationConfig::with_fixed_update_rate(4), NoTargets).unwrap()
    }

    #[test]
    fn processors_run_hero_then_ability() {
        let sim = simulation();
        let names: Vec<_> = sim.world().processor_names().collect();
        assert_eq!(names, ["hero", "ability"]);
    }

    #[test]
    fn advance_runs_due_fixed_ticks() {
        let mut sim = simulation();
        assert_eq!(sim.advance(0.6).fixed_steps, 2);
        assert_eq!(sim.advance(0.1).fixed_steps, 0);
        assert_eq!(sim.clock().fixed_ticks(), 2);
    }

    #[test]
    fn destroyed_entities_are_released_next_frame() {
        let mut sim = simulation();
        let entity = sim.create_hero(HeroId(1), "Garen").unwrap();

        assert!(sim.destroy(entity));
        assert!(sim.world().is_alive(entity));
        assert!(!sim.world().is_active(entity));

        assert_eq!(sim.advance(0.0).released, 1);
        assert!(!sim.world().is_alive(entity));
        assert_eq!(sim.get_hero_by_id(HeroId(1)), None);
    }

    #[test]
    fn learn_ability_rejects_unknown_types() {
        let mut sim = simulation();
        let entity = sim.create_hero(HeroId(1), "Garen").unwrap();

        let err = sim.learn_ability(entity, "Teleport", "r", "Flash").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_ABILITY_TYPE");

        let slot = sim
            .learn_ability(entity, AbilityFactory::DAMAGE, "q", "Decisive Strike")
            .unwrap();
        assert_eq!(slot, 0);
    }

    #[test]
    fn hero_lookup_survives_id_changes() {
        let mut sim = simulation();
        let entity = sim.create_hero(HeroId(1), "Garen").unwrap();
        sim.hero_mut(entity).unwrap().set_id(HeroId(9));

        assert_eq!(sim.get_hero_by_id(HeroId(9)), Some(entity));
        assert_eq!(sim.get_hero_by_id(HeroId(1)), None);
    }
}
