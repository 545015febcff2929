//! Hero regeneration and the hero-id index.

use std::collections::{BTreeMap, BTreeSet};

use ecs::{ComponentStore, Entity, Processor, Requirements, Stage, TickContext};
use tracing::trace;

use crate::hero::{Hero, HeroId};

/// Regenerates health and mana of every hero each fixed tick and keeps a
/// hero-id → entity index up to date.
///
/// Regeneration is unconditional: dead heroes and heroes at full resources
/// still receive (clamped) heals.
#[derive(Debug, Default)]
pub struct HeroProcessor {
    by_id: BTreeMap<HeroId, Entity>,
}

impl HeroProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entity indexed for `id` when the hero was added.
    pub fn entity_for(&self, id: HeroId) -> Option<Entity> {
        self.by_id.get(&id).copied()
    }

    pub fn indexed(&self) -> impl Iterator<Item = (HeroId, Entity)> + '_ {
        self.by_id.iter().map(|(id, entity)| (*id, *entity))
    }
}

impl Processor for HeroProcessor {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn requirements(&self, requirements: &mut Requirements) {
        requirements.require::<Hero>();
    }

    fn stage(&self) -> Stage {
        Stage::Fixed
    }

    fn update(&mut self, matched: &BTreeSet<Entity>, ctx: &mut TickContext<'_>, dt: f32) {
        for &entity in matched {
            let Some(hero) = ctx.get_mut::<Hero>(entity) else {
                continue;
            };
            let stats = hero.current_stats();
            hero.heal(stats.health_regen * dt);
            hero.restore_mana(stats.mana_regen * dt);
        }
    }

    fn on_entity_added(&mut self, entity: Entity, components: &ComponentStore) {
        if let Some(hero) = components.get::<Hero>(entity) {
            trace!(target: "game::hero", %entity, hero = %hero.id(), "indexed hero");
            self.by_id.insert(hero.id(), entity);
        }
    }

    fn on_entity_removed(&mut self, entity: Entity, _components: &ComponentStore) {
        // The fragment may already be gone, so match on the entity.
        self.by_id.retain(|_, indexed| *indexed != entity);
    }
}
