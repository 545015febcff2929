//! Combat resolution: pure functions from stats to damage and healing amounts.
//!
//! Nothing here touches the world. Callers feed in a [`StatsSnapshot`]
//! taken at cast time and apply the resulting amount to hero fragments.
//!
//! [`StatsSnapshot`]: crate::stats::StatsSnapshot

pub mod damage;
pub mod scaling;

pub use damage::{DamageType, mitigated, mitigation};
pub use scaling::{Effect, EffectKind, Scaling};
