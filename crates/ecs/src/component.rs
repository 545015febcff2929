//! Fragment trait and the per-world type registry.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use crate::entity::Entity;
use crate::error::EcsError;
use crate::mask::CapabilityMask;

/// Data fragment attached to an entity.
///
/// The store owns every fragment. `on_attach` runs right after the fragment
/// is stored and its mask bit is set; `on_detach` runs before the storage is
/// released, on explicit detach, on replacement and on entity destruction.
pub trait Component: Any {
    fn on_attach(&mut self, _entity: Entity) {}

    fn on_detach(&mut self, _entity: Entity) {}
}

/// Object-safe view over any [`Component`] used inside the store.
pub(crate) trait ErasedComponent: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn attach_hook(&mut self, entity: Entity);
    fn detach_hook(&mut self, entity: Entity);
}

impl<T: Component> ErasedComponent for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn attach_hook(&mut self, entity: Entity) {
        self.on_attach(entity);
    }

    fn detach_hook(&mut self, entity: Entity) {
        self.on_detach(entity);
    }
}

/// Dense slot id of a fragment type; doubles as its mask bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u8);

impl ComponentId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component:{}", self.0)
    }
}

/// Assigns [`ComponentId`]s to fragment types in first-use order.
///
/// Scoped to one world, so two worlds may number the same type differently.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentId>,
    names: Vec<&'static str>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `T`, assigning the next free slot on first use.
    pub fn register<T: 'static>(&mut self) -> Result<ComponentId, EcsError> {
        self.register_raw(TypeId::of::<T>(), type_name::<T>())
    }

    pub(crate) fn register_raw(
        &mut self,
        type_id: TypeId,
        name: &'static str,
    ) -> Result<ComponentId, EcsError> {
        if let Some(id) = self.ids.get(&type_id) {
            return Ok(*id);
        }
        if self.names.len() >= CapabilityMask::CAPACITY {
            return Err(EcsError::ComponentCapacity { type_name: name });
        }

        let id = ComponentId::new(self.names.len() as u8);
        self.ids.insert(type_id, id);
        self.names.push(name);
        tracing::debug!(target: "ecs::component", component = name, id = id.index(), "registered component type");
        Ok(id)
    }

    /// Id for `T` if it has been seen before.
    pub fn id_of<T: 'static>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    pub fn name(&self, id: ComponentId) -> Option<&'static str> {
        self.names.get(id.index() as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
