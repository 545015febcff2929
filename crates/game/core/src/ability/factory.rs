//! Ability construction by registered type name.

use std::collections::BTreeMap;
use std::fmt;

use crate::combat::{DamageType, Effect, EffectKind, Scaling};
use crate::stats::{BuffStat, StatBonus};

use super::{Ability, AbilityShape};

type ShapeConstructor = Box<dyn Fn() -> AbilityShape>;

/// Builds initialized abilities from a type name.
///
/// [`AbilityFactory::with_defaults`] knows the stock types:
///
/// | Type name                  | Shape         | Payload               |
/// |----------------------------|---------------|-----------------------|
/// | `DamageAbility`            | single target | magical damage        |
/// | `HealAbility`              | single target | healing               |
/// | `AreaDamageAbility`        | area          | magical damage        |
/// | `SkillshotDamageAbility`   | line          | magical damage        |
/// | `MovementSpeedBuffAbility` | self buff     | movement speed bonus  |
/// | `AttackDamageBuffAbility`  | self buff     | attack damage bonus   |
///
/// All numeric parameters start at zero; tune them with
/// [`AbilityParams`] or the [`Ability`] setters.
pub struct AbilityFactory {
    constructors: BTreeMap<String, ShapeConstructor>,
}

impl AbilityFactory {
    pub const DAMAGE: &'static str = "DamageAbility";
    pub const HEAL: &'static str = "HealAbility";
    pub const AREA_DAMAGE: &'static str = "AreaDamageAbility";
    pub const SKILLSHOT_DAMAGE: &'static str = "SkillshotDamageAbility";
    pub const MOVEMENT_SPEED_BUFF: &'static str = "MovementSpeedBuffAbility";
    pub const ATTACK_DAMAGE_BUFF: &'static str = "AttackDamageBuffAbility";

    /// An empty factory.
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let magical = || Effect::damage(DamageType::Magical, Scaling::default());

        let mut factory = Self::new();
        factory.register(Self::DAMAGE, move || AbilityShape::SingleTarget {
            effect: magical(),
        });
        factory.register(Self::HEAL, || AbilityShape::SingleTarget {
            effect: Effect::heal(Scaling::default()),
        });
        factory.register(Self::AREA_DAMAGE, move || AbilityShape::Area {
            radius: 0.0,
            effect: magical(),
        });
        factory.register(Self::SKILLSHOT_DAMAGE, move || AbilityShape::Line {
            width: 0.0,
            speed: 0.0,
            effect: magical(),
        });
        factory.register(Self::MOVEMENT_SPEED_BUFF, || AbilityShape::SelfBuff {
            duration: 0.0,
            bonus: StatBonus::new(BuffStat::MovementSpeed, 0.0),
        });
        factory.register(Self::ATTACK_DAMAGE_BUFF, || AbilityShape::SelfBuff {
            duration: 0.0,
            bonus: StatBonus::new(BuffStat::AttackDamage, 0.0),
        });
        factory
    }

    /// Registers `constructor` under `type_name`; returns `true` if it
    /// replaced an existing registration.
    pub fn register<F>(&mut self, type_name: impl Into<String>, constructor: F) -> bool
    where
        F: Fn() -> AbilityShape + 'static,
    {
        self.constructors
            .insert(type_name.into(), Box::new(constructor))
            .is_some()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Registered type names in sorted order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.constructors.keys().map(String::as_str)
    }

    /// Creates an initialized (ready) ability, or `None` for unknown types.
    pub fn create(
        &self,
        type_name: &str,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Option<Ability> {
        let constructor = self.constructors.get(type_name)?;
        let mut ability = Ability::new(id, name, constructor());
        ability.initialize();
        Some(ability)
    }
}

impl Default for AbilityFactory {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for AbilityFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbilityFactory")
            .field("types", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Shape-independent tuning knobs, applied to whichever fields the
/// ability's shape actually has.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityParams {
    pub scaling: Scaling,
    /// Overrides the damage type of damaging shapes.
    pub damage_type: Option<DamageType>,
    pub radius: f32,
    pub width: f32,
    pub speed: f32,
    pub duration: f32,
    pub bonus: f32,
}

impl AbilityParams {
    /// Reads the knobs back out of an ability.
    pub fn from_ability(ability: &Ability) -> Self {
        let mut params = Self::default();
        match *ability.shape() {
            AbilityShape::SingleTarget { effect } => params.read_effect(effect),
            AbilityShape::Area { radius, effect } => {
                params.radius = radius;
                params.read_effect(effect);
            }
            AbilityShape::Line {
                width,
                speed,
                effect,
            } => {
                params.width = width;
                params.speed = speed;
                params.read_effect(effect);
            }
            AbilityShape::SelfBuff { duration, bonus } => {
                params.duration = duration;
                params.bonus = bonus.amount;
            }
        }
        params
    }

    pub fn apply_to(&self, ability: &mut Ability) {
        match ability.shape_mut() {
            AbilityShape::SingleTarget { effect } => self.write_effect(effect),
            AbilityShape::Area { radius, effect } => {
                *radius = self.radius.max(0.0);
                self.write_effect(effect);
            }
            AbilityShape::Line {
                width,
                speed,
                effect,
            } => {
                *width = self.width.max(0.0);
                *speed = self.speed.max(0.0);
                self.write_effect(effect);
            }
            AbilityShape::SelfBuff { duration, bonus } => {
                *duration = self.duration.max(0.0);
                bonus.amount = self.bonus;
            }
        }
    }

    fn read_effect(&mut self, effect: Effect) {
        self.scaling = effect.scaling;
        if let EffectKind::Damage(damage_type) = effect.kind {
            self.damage_type = Some(damage_type);
        }
    }

    fn write_effect(&self, effect: &mut Effect) {
        effect.scaling = self.scaling;
        if let (EffectKind::Damage(current), Some(damage_type)) = (&mut effect.kind, self.damage_type) {
            *current = damage_type;
        }
    }
}
