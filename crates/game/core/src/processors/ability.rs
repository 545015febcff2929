//! Ability cooldown and buff timers.

use std::collections::BTreeSet;

use ecs::{Entity, Processor, Requirements, Stage, TickContext};
use tracing::debug;

use crate::hero::Hero;

/// Ticks every owned ability of every hero and removes expired buff
/// bonuses from the entity that cast them.
#[derive(Debug, Default)]
pub struct AbilityProcessor;

impl Processor for AbilityProcessor {
    fn name(&self) -> &'static str {
        "ability"
    }

    fn requirements(&self, requirements: &mut Requirements) {
        requirements.require::<Hero>();
    }

    fn stage(&self) -> Stage {
        Stage::Fixed
    }

    fn update(&mut self, matched: &BTreeSet<Entity>, ctx: &mut TickContext<'_>, dt: f32) {
        for &entity in matched {
            let expired = match ctx.get_mut::<Hero>(entity) {
                Some(hero) => hero.tick_abilities(dt),
                None => continue,
            };

            for buff in expired {
                if let Some(caster) = ctx.get_mut::<Hero>(buff.caster) {
                    caster.remove_bonus(buff.bonus);
                }
                debug!(
                    target: "game::cast",
                    owner = %entity,
                    caster = %buff.caster,
                    stat = %buff.bonus.stat,
                    amount = buff.bonus.amount,
                    "buff expired"
                );
            }
        }
    }
}
