//! Brute-force spatial queries over entity transforms.
use std::collections::BTreeSet;

use ecs::{Entity, World};
use game_core::{TargetingOracle, Transform};
use glam::Vec3;

/// Scans every active entity with a [`Transform`].
///
/// Good enough for a handful of heroes; a real match would plug in its
/// physics broad-phase here instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProximityOracle;

impl ProximityOracle {
    fn positions(world: &World) -> impl Iterator<Item = (Entity, Vec3)> + '_ {
        world.entities().filter_map(move |entity| {
            if !world.is_active(entity) {
                return None;
            }
            world
                .get::<Transform>(entity)
                .map(|transform| (entity, transform.position))
        })
    }
}

impl TargetingOracle for ProximityOracle {
    fn find_targets_in_radius(&self, world: &World, center: Vec3, radius: f32) -> BTreeSet<Entity> {
        Self::positions(world)
            .filter(|(_, position)| position.distance_squared(center) <= radius * radius)
            .map(|(entity, _)| entity)
            .collect()
    }

    fn find_targets_along_line(
        &self,
        world: &World,
        origin: Vec3,
        direction: Vec3,
        width: f32,
    ) -> BTreeSet<Entity> {
        let direction = direction.normalize_or_zero();
        let half_width = width * 0.5;

        Self::positions(world)
            .filter(|(_, position)| {
                let offset = *position - origin;
                let along = offset.dot(direction);
                along > 0.0 && offset.reject_from_normalized(direction).length() <= half_width
            })
            .map(|(entity, _)| entity)
            .collect()
    }
}
