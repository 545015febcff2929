//! Headless arena skirmish harness.
//!
//! Wires a [`game_core::Simulation`] to a brute-force targeting oracle and
//! a hero roster, then lets the heroes fight on a fixed script. Used as a
//! smoke test for the whole stack and as the composition root for logging
//! and environment configuration.
pub mod config;
pub mod logging;
pub mod oracle;
pub mod roster;
pub mod skirmish;

pub use config::SkirmishConfig;
pub use oracle::ProximityOracle;
pub use roster::Roster;
pub use skirmish::{Skirmish, SkirmishReport, Standing};
