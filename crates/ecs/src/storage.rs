//! Per-entity fragment storage.

use crate::component::{Component, ComponentId, ComponentRegistry, ErasedComponent};
use crate::entity::Entity;
use crate::mask::CapabilityMask;

type Slot = Option<Box<dyn ErasedComponent>>;

#[derive(Default)]
struct Row {
    mask: CapabilityMask,
    slots: Vec<Slot>,
}

impl Row {
    fn slot_mut(&mut self, id: ComponentId) -> &mut Slot {
        let index = id.index() as usize;
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        &mut self.slots[index]
    }
}

/// Fragment storage indexed by entity id, then by component id.
///
/// Lookups are two vector indexes plus one downcast. The store keeps each
/// entity's [`CapabilityMask`] next to its fragments so the two can only
/// change together; lifecycle hooks and processor bookkeeping are the
/// world's job.
#[derive(Default)]
pub struct ComponentStore {
    registry: ComponentRegistry,
    rows: Vec<Row>,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        let id = self.registry.id_of::<T>()?;
        self.rows
            .get(entity.index())?
            .slots
            .get(id.index() as usize)?
            .as_deref()?
            .as_any()
            .downcast_ref::<T>()
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let id = self.registry.id_of::<T>()?;
        self.rows
            .get_mut(entity.index())?
            .slots
            .get_mut(id.index() as usize)?
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.registry
            .id_of::<T>()
            .is_some_and(|id| self.mask(entity).has(id))
    }

    /// Capability mask of `entity`; empty for unknown ids.
    pub fn mask(&self, entity: Entity) -> CapabilityMask {
        self.rows
            .get(entity.index())
            .map(|row| row.mask)
            .unwrap_or_default()
    }

    /// Stores `value` in the slot for `id`, setting the mask bit.
    /// Returns the fragment it displaced, if any.
    pub(crate) fn insert(
        &mut self,
        entity: Entity,
        id: ComponentId,
        value: Box<dyn ErasedComponent>,
    ) -> Option<Box<dyn ErasedComponent>> {
        let index = entity.index();
        if self.rows.len() <= index {
            self.rows.resize_with(index + 1, Row::default);
        }
        let row = &mut self.rows[index];
        row.mask.set(id);
        row.slot_mut(id).replace(value)
    }

    /// Removes the fragment for `id`, clearing the mask bit.
    pub(crate) fn take(
        &mut self,
        entity: Entity,
        id: ComponentId,
    ) -> Option<Box<dyn ErasedComponent>> {
        let row = self.rows.get_mut(entity.index())?;
        let value = row.slots.get_mut(id.index() as usize)?.take();
        row.mask.clear(id);
        value
    }
}

impl std::fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentStore")
            .field("registry", &self.registry)
            .field("rows", &self.rows.len())
            .finish()
    }
}
