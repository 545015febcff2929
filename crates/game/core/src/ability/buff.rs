//! Self-buff lifecycle carried by a single ability instance.

use ecs::Entity;

use crate::stats::StatBonus;

/// Live state of a self-buff: at most one application per ability.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuffState {
    active: bool,
    remaining: f32,
    caster: Option<Entity>,
    bonus: Option<StatBonus>,
}

/// Bonus that stopped applying, and who it was applied to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExpiredBuff {
    pub caster: Entity,
    pub bonus: StatBonus,
}

/// Result of (re)activating a buff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuffActivation {
    /// Prior application that must be removed before `applied` is added.
    pub replaced: Option<ExpiredBuff>,
    pub applied: StatBonus,
}

impl BuffState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn caster(&self) -> Option<Entity> {
        self.caster
    }

    pub fn bonus(&self) -> Option<StatBonus> {
        self.bonus
    }

    /// Starts a fresh application, handing back the one it displaces.
    pub(crate) fn activate(&mut self, caster: Entity, duration: f32, bonus: StatBonus) -> BuffActivation {
        let replaced = self.clear();
        *self = Self {
            active: true,
            remaining: duration,
            caster: Some(caster),
            bonus: Some(bonus),
        };
        BuffActivation {
            replaced,
            applied: bonus,
        }
    }

    /// Counts down; yields the bonus exactly once when the buff runs out.
    pub(crate) fn tick(&mut self, dt: f32) -> Option<ExpiredBuff> {
        if !self.active {
            return None;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            return self.clear();
        }
        None
    }

    /// Deactivates, returning the application that was live (if any).
    pub(crate) fn clear(&mut self) -> Option<ExpiredBuff> {
        let expired = match (self.active, self.caster, self.bonus) {
            (true, Some(caster), Some(bonus)) => Some(ExpiredBuff { caster, bonus }),
            _ => None,
        };
        *self = Self::default();
        expired
    }
}
