//! Type-indexed entity/component runtime.
//!
//! The crate is deliberately small and single-threaded. A [`World`] owns
//! three things and keeps them consistent with each other on every
//! structural change:
//!
//! - [`EntityRegistry`]: issues ids, recycles them FIFO after the
//!   deferred-destruction sweep
//! - [`ComponentStore`]: at most one fragment per type per entity, plus the
//!   per-entity [`CapabilityMask`]
//! - processors: behavior units that declare the fragment types they need
//!   and receive exactly the entities whose mask satisfies that requirement
//!
//! # Architecture
//!
//! - [`Component`]: fragments with attach/detach lifecycle hooks
//! - [`Processor`]: per-tick behavior over a matched entity set
//! - [`TickContext`]: what a processor may touch while it runs
//! - [`Stage`]: variable-rate or fixed-rate update pass

pub mod component;
pub mod entity;
pub mod error;
pub mod mask;
pub mod processor;
pub mod storage;
pub mod world;

pub use component::{Component, ComponentId, ComponentRegistry};
pub use entity::{Entity, EntityRegistry};
pub use error::EcsError;
pub use mask::CapabilityMask;
pub use processor::{AsAny, Processor, ProcessorId, Requirements, Stage, TickContext};
pub use storage::ComponentStore;
pub use world::World;
