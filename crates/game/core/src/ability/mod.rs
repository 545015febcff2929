//! Ability instances: cooldown, level and casting shape.
//!
//! # State machine
//!
//! ```text
//!            successful cast
//!   Ready ─────────────────────▶ OnCooldown(remaining > 0)
//!     ▲                                 │
//!     └──────── tick(dt) reaches 0 ─────┘
//! ```
//!
//! An ability never leaves `Ready` on its own; only [`Ability::start_cooldown`]
//! (called by the cast path after every check has passed) moves it.

pub mod buff;
pub mod factory;

pub use buff::{BuffActivation, BuffState, ExpiredBuff};
pub use factory::{AbilityFactory, AbilityParams};

use ecs::Entity;

use crate::combat::Effect;
use crate::config::GameConfig;
use crate::stats::{StatBonus, StatsSnapshot};

/// How an ability picks its recipients, and what it carries.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum AbilityShape {
    /// One explicit target entity.
    SingleTarget { effect: Effect },
    /// Everything the targeting oracle finds within `radius` of a point.
    Area { radius: f32, effect: Effect },
    /// Everything along a ray from the caster, `width` wide.
    Line { width: f32, speed: f32, effect: Effect },
    /// The caster only; `bonus` lasts `duration` seconds.
    SelfBuff { duration: f32, bonus: StatBonus },
}

impl AbilityShape {
    pub fn effect(&self) -> Option<&Effect> {
        match self {
            Self::SingleTarget { effect }
            | Self::Area { effect, .. }
            | Self::Line { effect, .. } => Some(effect),
            Self::SelfBuff { .. } => None,
        }
    }

    pub fn effect_mut(&mut self) -> Option<&mut Effect> {
        match self {
            Self::SingleTarget { effect }
            | Self::Area { effect, .. }
            | Self::Line { effect, .. } => Some(effect),
            Self::SelfBuff { .. } => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::SingleTarget { .. } => "single_target",
            Self::Area { .. } => "area",
            Self::Line { .. } => "line",
            Self::SelfBuff { .. } => "self_buff",
        }
    }
}

/// One ability owned by a hero.
#[derive(Clone, Debug, PartialEq)]
pub struct Ability {
    id: String,
    name: String,
    description: String,
    cooldown: f32,
    remaining_cooldown: f32,
    mana_cost: f32,
    range: f32,
    level: u32,
    shape: AbilityShape,
    buff: BuffState,
}

impl Ability {
    pub fn new(id: impl Into<String>, name: impl Into<String>, shape: AbilityShape) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cooldown: 0.0,
            remaining_cooldown: 0.0,
            mana_cost: 0.0,
            range: 0.0,
            level: GameConfig::MIN_ABILITY_LEVEL,
            shape,
            buff: BuffState::default(),
        }
    }

    // ===== builder =====

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = cooldown.max(0.0);
        self
    }

    #[must_use]
    pub fn with_mana_cost(mut self, mana_cost: f32) -> Self {
        self.mana_cost = mana_cost.max(0.0);
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range.max(0.0);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.set_level(level);
        self
    }

    // ===== identity & parameters =====

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
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

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn set_cooldown(&mut self, cooldown: f32) {
        self.cooldown = cooldown.max(0.0);
    }

    pub fn remaining_cooldown(&self) -> f32 {
        self.remaining_cooldown
    }

    pub fn mana_cost(&self) -> f32 {
        self.mana_cost
    }

    pub fn set_mana_cost(&mut self, mana_cost: f32) {
        self.mana_cost = mana_cost.max(0.0);
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn set_range(&mut self, range: f32) {
        self.range = range.max(0.0);
    }

    pub fn shape(&self) -> &AbilityShape {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut AbilityShape {
        &mut self.shape
    }

    pub fn buff(&self) -> &BuffState {
        &self.buff
    }

    // ===== level =====

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level.clamp(GameConfig::MIN_ABILITY_LEVEL, GameConfig::MAX_ABILITY_LEVEL);
    }

    /// Raises the level by one; `false` once the cap is reached.
    pub fn level_up(&mut self) -> bool {
        if self.level >= GameConfig::MAX_ABILITY_LEVEL {
            return false;
        }
        self.level += 1;
        true
    }

    // ===== state machine =====

    /// Resets to `Ready` with no buff running.
    pub fn initialize(&mut self) {
        self.remaining_cooldown = 0.0;
        self.buff = BuffState::default();
    }

    pub fn is_ready(&self) -> bool {
        self.remaining_cooldown <= 0.0
    }

    pub(crate) fn start_cooldown(&mut self) {
        self.remaining_cooldown = self.cooldown;
    }

    /// Advances cooldown and buff timers by `dt` seconds.
    ///
    /// Returns the buff bonus that has to be removed from its caster, once,
    /// on the tick the buff runs out.
    pub fn tick(&mut self, dt: f32) -> Option<ExpiredBuff> {
        if self.remaining_cooldown > 0.0 {
            self.remaining_cooldown = (self.remaining_cooldown - dt).max(0.0);
        }
        self.buff.tick(dt)
    }

    /// Effect magnitude for `caster` at the current level; `None` for buffs.
    pub fn effect_amount(&self, caster: &StatsSnapshot) -> Option<f32> {
        self.shape
            .effect()
            .map(|effect| effect.scaling.amount(self.level, caster))
    }

    /// (Re)starts the self-buff for `caster`; `None` for other shapes.
    pub(crate) fn activate_buff(&mut self, caster: Entity) -> Option<BuffActivation> {
        match self.shape {
            AbilityShape::SelfBuff { duration, bonus } => {
                Some(self.buff.activate(caster, duration, bonus))
            }
            _ => None,
        }
    }

    /// Ends a running buff without waiting for it to expire.
    pub(crate) fn cancel_buff(&mut self) -> Option<ExpiredBuff> {
        self.buff.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageType, Scaling};
    use crate::stats::BuffStat;

    fn bolt() -> Ability {
        Ability::new(
            "bolt",
            "Bolt",
            AbilityShape::SingleTarget {
                effect: Effect::damage(DamageType::Magical, Scaling::new(100.0, 50.0, 0.6, 0.0)),
            },
        )
        .with_cooldown(8.0)
    }

    #[test]
    fn defaults_match_a_fresh_ability() {
        let ability = Ability::new("a", "A", AbilityShape::SingleTarget { effect: Effect::default() });
        assert_eq!(ability.cooldown(), 0.0);
        assert_eq!(ability.mana_cost(), 0.0);
        assert_eq!(ability.range(), 0.0);
        assert_eq!(ability.level(), 1);
        assert!(ability.is_ready());
    }

    #[test]
    fn cooldown_floors_at_zero() {
        let mut ability = bolt();
        ability.start_cooldown();
        assert!(!ability.is_ready());

        ability.tick(5.0);
        assert_eq!(ability.remaining_cooldown(), 3.0);

        ability.tick(10.0);
        assert_eq!(ability.remaining_cooldown(), 0.0);
        assert!(ability.is_ready());
    }

    #[test]
    fn level_is_capped_at_five() {
        let mut ability = bolt();
        for _ in 0..4 {
            assert!(ability.level_up());
        }
        assert_eq!(ability.level(), 5);
        assert!(!ability.level_up());
        assert_eq!(ability.level(), 5);

        ability.set_level(0);
        assert_eq!(ability.level(), 1);
    }

    #[test]
    fn level_changes_scaling_only() {
        let caster = StatsSnapshot {
            ability_power: 100.0,
            ..crate::stats::HeroStats::default().snapshot(1, &Default::default())
        };
        let mut ability = bolt();
        let level_one = ability.effect_amount(&caster).unwrap();
        assert!((level_one - 160.0).abs() < 1e-3);

        ability.set_level(3);
        let level_three = ability.effect_amount(&caster).unwrap();
        assert!((level_three - 260.0).abs() < 1e-3);
        assert_eq!(ability.cooldown(), 8.0);
    }

    #[test]
    fn non_buff_abilities_cannot_activate_a_buff() {
        let mut ability = bolt();
        assert_eq!(ability.activate_buff(Entity::from_raw(0)), None);

        let mut haste = Ability::new(
            "haste",
            "Haste",
            AbilityShape::SelfBuff {
                duration: 3.0,
                bonus: StatBonus::new(BuffStat::MovementSpeed, 25.0),
            },
        );
        assert!(haste.activate_buff(Entity::from_raw(0)).is_some());
        assert!(haste.buff().is_active());

        haste.initialize();
        assert!(!haste.buff().is_active());
    }
}
