//! Target acquisition: the cast-side request and the spatial query seam.

use std::collections::BTreeSet;

use ecs::{Entity, World};
use glam::Vec3;

/// What the caller aims a cast at.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CastTarget {
    /// Self-buffs, or area casts centred on the caster.
    #[default]
    None,
    /// Single-target abilities.
    Entity(Entity),
    /// Area abilities aimed at the ground.
    Point(Vec3),
    /// Line abilities; need not be normalized but must be non-zero.
    Direction(Vec3),
}

/// Spatial queries the cast path delegates to.
///
/// Implementations decide what counts as "in range" (hitboxes, teams,
/// line of sight). Results are ordered sets so resolution order is
/// deterministic. The caster is not filtered out by the cast path.
pub trait TargetingOracle {
    fn find_targets_in_radius(&self, world: &World, center: Vec3, radius: f32) -> BTreeSet<Entity>;

    fn find_targets_along_line(
        &self,
        world: &World,
        origin: Vec3,
        direction: Vec3,
        width: f32,
    ) -> BTreeSet<Entity>;
}

/// Oracle that never finds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTargets;

impl TargetingOracle for NoTargets {
    fn find_targets_in_radius(&self, _: &World, _: Vec3, _: f32) -> BTreeSet<Entity> {
        BTreeSet::new()
    }

    fn find_targets_along_line(&self, _: &World, _: Vec3, _: Vec3, _: f32) -> BTreeSet<Entity> {
        BTreeSet::new()
    }
}
