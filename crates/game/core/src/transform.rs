//! World-space placement fragment.

use ecs::Component;
use glam::{Quat, Vec3};

/// Position, orientation and scale of an entity.
///
/// Area and line abilities read the caster's position from here.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Unit vector the entity is facing (local -Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Rotates about +Y so that `forward` points along `direction` on the ground plane.
    pub fn face(&mut self, direction: Vec3) {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.length_squared() > f32::EPSILON {
            self.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, flat.normalize());
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform {}
