//! Authoring errors raised by the runtime.
//!
//! Conditions a caller is expected to handle in normal play (a missing
//! fragment, an unknown id on a read) are reported as `None`/`false` by the
//! accessors instead. The variants here indicate a programming mistake in
//! how the world was put together.

use crate::entity::Entity;
use crate::mask::CapabilityMask;

/// Errors produced while composing a [`World`](crate::World).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    /// More distinct fragment types than the capability mask has bits.
    #[error(
        "component type `{type_name}` exceeds the capacity of {} distinct fragment types",
        CapabilityMask::CAPACITY
    )]
    ComponentCapacity { type_name: &'static str },

    /// The entity was never created, or its id has already been released.
    #[error("entity {entity} is not alive")]
    UnknownEntity { entity: Entity },

    /// A processor of the same concrete type is already registered.
    #[error("processor `{name}` is already registered")]
    DuplicateProcessor { name: &'static str },
}

impl EcsError {
    /// Returns a static identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ComponentCapacity { .. } => "COMPONENT_CAPACITY",
            Self::UnknownEntity { .. } => "UNKNOWN_ENTITY",
            Self::DuplicateProcessor { .. } => "DUPLICATE_PROCESSOR",
        }
    }
}
