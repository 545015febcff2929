//! Per-tick gameplay processors.
//!
//! Both run in the fixed stage, hero regeneration first, then ability
//! timers, in the order [`Simulation`](crate::Simulation) registers them.

pub mod ability;
pub mod hero;

pub use ability::AbilityProcessor;
pub use hero::HeroProcessor;
