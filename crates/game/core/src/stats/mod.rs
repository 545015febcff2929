//! Hero stat system.
//!
//! # Architecture
//!
//! ```text
//! [ HeroStats: base values + per-level growth ]   (stored)
//!      ↓  level
//! [ level-scaled values ]
//!      ↓  StatModifiers (active buffs)
//! [ StatsSnapshot ]                               (derived, never stored)
//! ```
//!
//! Live health and mana are the only stat-like values a hero stores beyond
//! its base block; their maximums always come from a fresh snapshot.

pub mod base;
pub mod modifiers;
pub mod snapshot;

pub use base::{HeroStats, StatGrowth};
pub use modifiers::{BuffStat, StatBonus, StatModifiers};
pub use snapshot::StatsSnapshot;
