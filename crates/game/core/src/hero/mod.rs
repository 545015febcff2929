//! The hero fragment: identity, progression, live resources and abilities.
//!
//! Health and mana are the only live values a hero stores. Their maximums,
//! and every other stat, come from [`Hero::current_stats`], which layers
//! level growth and active buff modifiers over the base block.
//!
//! Invariant: `0 ≤ health ≤ max_health` and `0 ≤ mana ≤ max_mana` after
//! every public operation.

pub mod identity;
pub mod observers;

pub use identity::{HeroId, HeroRole};
pub use observers::{
    DamageEvent, DeathEvent, HealEvent, LevelUpEvent, ListenerHandle, Observers,
};

use ecs::{Component, Entity};
use tracing::debug;

use crate::ability::{Ability, ExpiredBuff};
use crate::combat::{self, DamageType};
use crate::config::GameConfig;
use crate::error::CastError;
use crate::stats::{HeroStats, StatBonus, StatModifiers, StatsSnapshot};

use observers::HeroObservers;

/// Hero fragment attached to a hero entity.
#[derive(Debug)]
pub struct Hero {
    id: HeroId,
    name: String,
    description: String,
    role: HeroRole,
    difficulty: u8,
    level: u32,
    stats: HeroStats,
    modifiers: StatModifiers,
    health: f32,
    mana: f32,
    abilities: Vec<Ability>,
    observers: HeroObservers,
}

impl Hero {
    /// A level-1 hero with default stats, at full health and mana.
    pub fn new(id: HeroId, name: impl Into<String>) -> Self {
        let stats = HeroStats::default();
        Self {
            id,
            name: name.into(),
            description: String::new(),
            role: HeroRole::default(),
            difficulty: GameConfig::DEFAULT_DIFFICULTY,
            level: GameConfig::MIN_HERO_LEVEL,
            health: stats.health,
            mana: stats.mana,
            stats,
            modifiers: StatModifiers::default(),
            abilities: Vec::new(),
            observers: HeroObservers::default(),
        }
    }

    // ========================================================================
    // Identity
    // ========================================================================

    pub fn id(&self) -> HeroId {
        self.id
    }

    pub fn set_id(&mut self, id: HeroId) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn role(&self) -> HeroRole {
        self.role
    }

    pub fn set_role(&mut self, role: HeroRole) {
        self.role = role;
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// Clamped to `1..=10`.
    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.difficulty = difficulty.clamp(GameConfig::MIN_DIFFICULTY, GameConfig::MAX_DIFFICULTY);
    }

    // ========================================================================
    // Stats
    // ========================================================================

    pub fn base_stats(&self) -> &HeroStats {
        &self.stats
    }

    /// Replaces the base block; live resources are re-clamped to the new maximums.
    pub fn set_base_stats(&mut self, stats: HeroStats) {
        self.stats = stats;
        self.clamp_resources();
    }

    pub fn modifiers(&self) -> &StatModifiers {
        &self.modifiers
    }

    pub fn apply_bonus(&mut self, bonus: StatBonus) {
        self.modifiers.apply(bonus);
    }

    pub fn remove_bonus(&mut self, bonus: StatBonus) {
        self.modifiers.remove(bonus);
    }

    /// Effective stats right now. Never cached.
    pub fn current_stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.level, &self.modifiers)
    }

    pub fn max_health(&self) -> f32 {
        self.current_stats().max_health
    }

    pub fn max_mana(&self) -> f32 {
        self.current_stats().max_mana
    }

    // ========================================================================
    // Resources
    // ========================================================================

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn mana(&self) -> f32 {
        self.mana
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Applies mitigated damage and returns how much was removed.
    ///
    /// Death observers fire only on the hit that takes health from above
    /// zero to zero, and before the damage observers hear about that hit.
    /// Non-finite amounts are ignored.
    pub fn take_damage(&mut self, amount: f32, damage_type: DamageType) -> f32 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }

        let resistance = damage_type.resistance(&self.current_stats());
        let applied = combat::mitigated(amount, resistance);
        let was_alive = self.health > 0.0;
        self.health = (self.health - applied).max(0.0);

        if was_alive && self.health <= 0.0 {
            debug!(target: "game::hero", hero = %self.id, name = %self.name, "hero died");
            self.observers.death.notify(&DeathEvent { hero: self.id });
        }

        self.observers.damage.notify(&DamageEvent {
            hero: self.id,
            amount: applied,
            damage_type,
        });
        applied
    }

    /// Restores health up to max and returns how much was restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }

        let before = self.health;
        self.health = (self.health + amount).min(self.max_health());
        let healed = self.health - before;

        self.observers.heal.notify(&HealEvent {
            hero: self.id,
            amount: healed,
        });
        healed
    }

    /// Spends mana if there is enough; a non-positive cost always succeeds
    /// and a non-finite one always fails.
    pub fn use_mana(&mut self, amount: f32) -> bool {
        if !amount.is_finite() {
            return false;
        }
        if amount <= 0.0 {
            return true;
        }
        if self.mana < amount {
            return false;
        }
        self.mana -= amount;
        true
    }

    pub fn restore_mana(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.mana = (self.mana + amount).min(self.max_mana());
    }

    fn clamp_resources(&mut self) {
        let stats = self.current_stats();
        self.health = self.health.min(stats.max_health).max(0.0);
        self.mana = self.mana.min(stats.max_mana).max(0.0);
    }

    // ========================================================================
    // Progression
    // ========================================================================

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Gains one level and restores part of the missing health and mana.
    ///
    /// Returns `false` (and changes nothing) at the level cap.
    pub fn level_up(&mut self) -> bool {
        if self.level >= GameConfig::MAX_HERO_LEVEL {
            return false;
        }
        self.level += 1;

        let stats = self.current_stats();
        let ratio = GameConfig::LEVEL_UP_RESTORE_RATIO;
        self.health += (stats.max_health - self.health) * ratio;
        self.mana += (stats.max_mana - self.mana) * ratio;
        self.clamp_resources();

        debug!(target: "game::hero", hero = %self.id, level = self.level, "level up");
        self.observers.level_up.notify(&LevelUpEvent {
            hero: self.id,
            level: self.level,
        });
        true
    }

    /// Jumps straight to `level` (clamped to `1..=18`) without the
    /// level-up restore; resources are re-clamped to the new maximums.
    pub fn set_level(&mut self, level: u32) {
        self.level = level.clamp(GameConfig::MIN_HERO_LEVEL, GameConfig::MAX_HERO_LEVEL);
        self.clamp_resources();
        self.observers.level_up.notify(&LevelUpEvent {
            hero: self.id,
            level: self.level,
        });
    }

    // ========================================================================
    // Abilities
    // ========================================================================

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn ability(&self, slot: usize) -> Option<&Ability> {
        self.abilities.get(slot)
    }

    pub fn ability_mut(&mut self, slot: usize) -> Option<&mut Ability> {
        self.abilities.get_mut(slot)
    }

    /// Slot of the first ability with `id`.
    pub fn find_ability(&self, id: &str) -> Option<usize> {
        self.abilities.iter().position(|ability| ability.id() == id)
    }

    /// Appends `ability` and returns its slot.
    pub fn add_ability(&mut self, ability: Ability) -> usize {
        self.abilities.push(ability);
        self.abilities.len() - 1
    }

    /// Removes the ability with `id`, ending any buff it was running on this hero.
    pub fn remove_ability(&mut self, id: &str) -> Option<Ability> {
        let slot = self.find_ability(id)?;
        let mut ability = self.abilities.remove(slot);
        if let Some(expired) = ability.cancel_buff() {
            self.modifiers.remove(expired.bonus);
        }
        Some(ability)
    }

    /// Checks slot and cooldown without committing anything.
    pub(crate) fn ready_ability(&self, caster: Entity, slot: usize) -> Result<&Ability, CastError> {
        let ability = self
            .abilities
            .get(slot)
            .ok_or(CastError::AbilityNotFound { caster, slot })?;

        if !ability.is_ready() {
            return Err(CastError::OnCooldown {
                ability: ability.name().to_string(),
                remaining: ability.remaining_cooldown(),
            });
        }
        Ok(ability)
    }

    /// Deducts mana and starts the cooldown of the ability in `slot`.
    ///
    /// The only fallible step is the mana check; nothing changes on error.
    pub(crate) fn commit_cast(&mut self, caster: Entity, slot: usize) -> Result<(), CastError> {
        let (name, cost) = {
            let ability = self.ready_ability(caster, slot)?;
            (ability.name().to_string(), ability.mana_cost())
        };

        if !self.use_mana(cost) {
            return Err(CastError::InsufficientMana {
                ability: name,
                required: cost,
                available: self.mana,
            });
        }

        if let Some(ability) = self.abilities.get_mut(slot) {
            ability.start_cooldown();
        }
        Ok(())
    }

    /// Ticks every owned ability, collecting buffs that ran out this tick.
    pub fn tick_abilities(&mut self, dt: f32) -> Vec<ExpiredBuff> {
        self.abilities
            .iter_mut()
            .filter_map(|ability| ability.tick(dt))
            .collect()
    }

    // ========================================================================
    // Observers
    // ========================================================================

    pub fn on_damage(&mut self, listener: impl FnMut(&DamageEvent) + 'static) -> ListenerHandle {
        let handle = self.observers.next_handle();
        self.observers.damage.subscribe(handle, Box::new(listener));
        handle
    }

    pub fn on_heal(&mut self, listener: impl FnMut(&HealEvent) + 'static) -> ListenerHandle {
        let handle = self.observers.next_handle();
        self.observers.heal.subscribe(handle, Box::new(listener));
        handle
    }

    pub fn on_death(&mut self, listener: impl FnMut(&DeathEvent) + 'static) -> ListenerHandle {
        let handle = self.observers.next_handle();
        self.observers.death.subscribe(handle, Box::new(listener));
        handle
    }

    pub fn on_level_up(&mut self, listener: impl FnMut(&LevelUpEvent) + 'static) -> ListenerHandle {
        let handle = self.observers.next_handle();
        self.observers.level_up.subscribe(handle, Box::new(listener));
        handle
    }

    /// Revokes a subscription; `false` if it was already gone.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        self.observers.remove(handle)
    }

    pub fn listener_count(&self) -> usize {
        self.observers.total()
    }
}

impl Component for Hero {
    fn on_attach(&mut self, entity: Entity) {
        let stats = self.current_stats();
        self.health = stats.max_health;
        self.mana = stats.max_mana;
        debug!(target: "game::hero", %entity, hero = %self.id, name = %self.name, "hero attached");
    }

    fn on_detach(&mut self, entity: Entity) {
        self.abilities.clear();
        self.observers.clear();
        debug!(target: "game::hero", %entity, hero = %self.id, "hero detached");
    }
}
