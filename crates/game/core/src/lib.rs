//! Gameplay rules for the arena: heroes, abilities and combat resolution.
//!
//! `game-core` layers the hero and ability model on top of the `ecs` crate
//! and exposes a single [`Simulation`] context that owns the world, the
//! ability factory and the targeting oracle. Casting, regeneration and buff
//! timers all run through it; rendering, input and spatial queries stay
//! outside and plug in through [`TargetingOracle`].
pub mod ability;
pub mod combat;
pub mod config;
pub mod definition;
pub mod error;
pub mod hero;
pub mod processors;
pub mod simulation;
pub mod stats;
pub mod targeting;
pub mod transform;

pub use ability::{Ability, AbilityFactory, AbilityParams, AbilityShape, BuffState};
pub use combat::{DamageType, Effect, EffectKind, Scaling, mitigated, mitigation};
pub use config::{GameConfig, SimulationConfig};
pub use definition::{AbilityDefinition, HeroDefinition};
pub use error::{CastError, ErrorSeverity, GameError, SpawnError};
pub use hero::{
    DamageEvent, DeathEvent, HealEvent, Hero, HeroId, HeroRole, LevelUpEvent, ListenerHandle,
};
pub use processors::{AbilityProcessor, HeroProcessor};
pub use simulation::{CastOutcome, FixedStepClock, FrameReport, Recipient, Simulation};
pub use stats::{BuffStat, HeroStats, StatBonus, StatGrowth, StatModifiers, StatsSnapshot};
pub use targeting::{CastTarget, NoTargets, TargetingOracle};
pub use transform::Transform;
