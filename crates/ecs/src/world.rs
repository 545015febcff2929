//! The world: entities, fragments and processors kept in lockstep.

use std::any::TypeId;

use tracing::{debug, trace};

use crate::component::Component;
use crate::entity::{Entity, EntityRegistry};
use crate::error::EcsError;
use crate::mask::CapabilityMask;
use crate::processor::{
    AsAny, Processor, ProcessorId, ProcessorSlot, Requirements, Stage, TickContext,
};
use crate::storage::ComponentStore;

/// Owner of every entity, fragment and processor of one simulation.
///
/// Every structural change (attach, detach, registration, destruction sweep)
/// re-evaluates processor membership for the affected entities before
/// returning, so the capability masks and matched sets never disagree.
#[derive(Default)]
pub struct World {
    entities: EntityRegistry,
    components: ComponentStore,
    processors: Vec<ProcessorSlot>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Entities
    // ========================================================================

    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.create();
        // Processors with an empty requirement match every entity.
        self.refresh_entity(entity);
        trace!(target: "ecs::world", %entity, "created entity");
        entity
    }

    /// Queues `entity` for removal; nothing is freed until
    /// [`process_deferred_destructions`](Self::process_deferred_destructions).
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let marked = self.entities.mark_for_destruction(entity);
        if marked {
            debug!(target: "ecs::world", %entity, "entity marked for destruction");
        }
        marked
    }

    /// Sweeps every pending entity in ascending id order.
    ///
    /// Each entity leaves all processors first (fragments still readable in
    /// `on_entity_removed`), then every fragment is finalized and dropped,
    /// and finally the id goes back to the free pool.
    pub fn process_deferred_destructions(&mut self) -> usize {
        let pending = self.entities.take_pending();

        for &entity in &pending {
            for slot in &mut self.processors {
                slot.evict(entity, &self.components);
            }

            for id in self.components.mask(entity).iter() {
                if let Some(mut fragment) = self.components.take(entity, id) {
                    fragment.detach_hook(entity);
                }
            }

            self.entities.release(entity);
        }

        if !pending.is_empty() {
            debug!(
                target: "ecs::world",
                released = pending.len(),
                live = self.entities.len(),
                "processed deferred destructions"
            );
        }
        pending.len()
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Alive, not deactivated and not pending destruction.
    pub fn is_active(&self, entity: Entity) -> bool {
        self.entities.is_active(entity)
    }

    pub fn set_active(&mut self, entity: Entity, active: bool) -> bool {
        self.entities.set_active(entity, active)
    }

    pub fn is_pending_destruction(&self, entity: Entity) -> bool {
        self.entities.is_pending_destruction(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    // ========================================================================
    // Fragments
    // ========================================================================

    /// Attaches `value`, replacing (and finalizing) any fragment of the same type.
    pub fn attach<T: Component>(&mut self, entity: Entity, value: T) -> Result<&mut T, EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::UnknownEntity { entity });
        }

        let id = self.components.registry_mut().register::<T>()?;
        if let Some(mut previous) = self.components.take(entity, id) {
            previous.detach_hook(entity);
        }

        self.components.insert(entity, id, Box::new(value));
        if let Some(fragment) = self.components.get_mut::<T>(entity) {
            fragment.on_attach(entity);
        }
        self.refresh_entity(entity);

        trace!(
            target: "ecs::world",
            %entity,
            component = std::any::type_name::<T>(),
            "attached component"
        );
        self.components
            .get_mut::<T>(entity)
            .ok_or(EcsError::UnknownEntity { entity })
    }

    /// Detaches and returns the fragment of type `T`; `None` when absent.
    pub fn detach<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let id = self.components.registry().id_of::<T>()?;
        let mut fragment = self.components.take(entity, id)?;
        fragment.detach_hook(entity);
        self.refresh_entity(entity);

        trace!(
            target: "ecs::world",
            %entity,
            component = std::any::type_name::<T>(),
            "detached component"
        );
        fragment.into_any().downcast::<T>().ok().map(|boxed| *boxed)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.components.get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut(entity)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.components.has::<T>(entity)
    }

    pub fn mask(&self, entity: Entity) -> CapabilityMask {
        self.components.mask(entity)
    }

    pub fn components(&self) -> &ComponentStore {
        &self.components
    }

    // ========================================================================
    // Processors
    // ========================================================================

    /// Registers `processor` and adds every live entity that already matches.
    pub fn register_processor<P: Processor>(&mut self, mut processor: P) -> Result<ProcessorId, EcsError> {
        let type_id = TypeId::of::<P>();
        if self.processors.iter().any(|slot| slot.type_id == type_id) {
            return Err(EcsError::DuplicateProcessor {
                name: processor.name(),
            });
        }

        let mut requirements = Requirements::default();
        processor.requirements(&mut requirements);
        let mut required = CapabilityMask::EMPTY;
        for (type_id, name) in requirements.into_types() {
            required.set(self.components.registry_mut().register_raw(type_id, name)?);
        }

        processor.initialize();

        let mut slot = ProcessorSlot::new(self.processors.len(), type_id, required, Box::new(processor));
        for entity in self.entities.iter() {
            slot.refresh(entity, self.components.mask(entity), &self.components);
        }

        debug!(
            target: "ecs::processor",
            processor = slot.name,
            id = slot.id.index(),
            stage = ?slot.stage,
            required = ?slot.required,
            matched = slot.matched.len(),
            "registered processor"
        );

        let id = slot.id;
        self.processors.push(slot);
        Ok(id)
    }

    pub fn processor<P: Processor>(&self) -> Option<&P> {
        self.slot_of::<P>()
            .and_then(|slot| slot.processor.as_ref().as_any().downcast_ref::<P>())
    }

    pub fn processor_mut<P: Processor>(&mut self) -> Option<&mut P> {
        let type_id = TypeId::of::<P>();
        self.processors
            .iter_mut()
            .find(|slot| slot.type_id == type_id)
            .and_then(|slot| slot.processor.as_mut().as_any_mut().downcast_mut::<P>())
    }

    /// Entities currently matched by processor `P`, in ascending id order.
    pub fn matched<P: Processor>(&self) -> Option<impl Iterator<Item = Entity> + '_> {
        self.slot_of::<P>().map(|slot| slot.matched.iter().copied())
    }

    /// Pauses or resumes `P` without unregistering it.
    pub fn set_processor_active<P: Processor>(&mut self, active: bool) -> bool {
        let type_id = TypeId::of::<P>();
        match self.processors.iter_mut().find(|slot| slot.type_id == type_id) {
            Some(slot) => {
                slot.active = active;
                true
            }
            None => false,
        }
    }

    pub fn is_processor_active<P: Processor>(&self) -> bool {
        self.slot_of::<P>().is_some_and(|slot| slot.active)
    }

    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    /// Registered processor names in registration order (for debugging).
    pub fn processor_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.processors.iter().map(|slot| slot.name)
    }

    /// Runs every active [`Stage::Variable`] processor once.
    pub fn update_all(&mut self, dt: f32) {
        self.run_stage(Stage::Variable, dt);
    }

    /// Runs every active [`Stage::Fixed`] processor once.
    pub fn fixed_update_all(&mut self, dt: f32) {
        self.run_stage(Stage::Fixed, dt);
    }

    fn run_stage(&mut self, stage: Stage, dt: f32) {
        let mut ctx = TickContext {
            components: &mut self.components,
            entities: &mut self.entities,
        };

        for slot in self
            .processors
            .iter_mut()
            .filter(|slot| slot.active && slot.stage == stage)
        {
            slot.processor.update(&slot.matched, &mut ctx, dt);
        }
    }

    fn slot_of<P: Processor>(&self) -> Option<&ProcessorSlot> {
        let type_id = TypeId::of::<P>();
        self.processors.iter().find(|slot| slot.type_id == type_id)
    }

    fn refresh_entity(&mut self, entity: Entity) {
        let mask = self.components.mask(entity);
        for slot in &mut self.processors {
            slot.refresh(entity, mask, &self.components);
        }
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entities)
            .field("components", &self.components)
            .field("processors", &self.processors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(u32);
    impl Component for Health {}

    #[derive(Debug, PartialEq)]
    struct Armor(u32);
    impl Component for Armor {}

    #[test]
    fn attach_sets_mask_bit_and_detach_clears_it() {
        let mut world = World::new();
        let entity = world.create_entity();

        world.attach(entity, Health(10)).unwrap();
        let id = world.components().registry().id_of::<Health>().unwrap();
        assert!(world.mask(entity).has(id));
        assert!(world.has::<Health>(entity));

        assert_eq!(world.detach::<Health>(entity), Some(Health(10)));
        assert!(!world.mask(entity).has(id));
        assert_eq!(world.get::<Health>(entity), None);
    }

    #[test]
    fn attach_replaces_existing_fragment() {
        let mut world = World::new();
        let entity = world.create_entity();

        world.attach(entity, Armor(1)).unwrap();
        world.attach(entity, Armor(7)).unwrap();

        assert_eq!(world.get::<Armor>(entity), Some(&Armor(7)));
        assert_eq!(world.mask(entity).count(), 1);
    }

    #[test]
    fn detach_of_absent_type_is_a_no_op() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.attach(entity, Health(3)).unwrap();

        assert_eq!(world.detach::<Armor>(entity), None);
        assert!(world.has::<Health>(entity));
    }

    #[test]
    fn attach_to_unknown_entity_fails() {
        let mut world = World::new();
        let ghost = Entity::from_raw(9);

        assert_eq!(
            world.attach(ghost, Health(1)).unwrap_err(),
            EcsError::UnknownEntity { entity: ghost }
        );
        assert_eq!(world.get::<Health>(ghost), None);
    }

    #[test]
    fn sweep_drops_fragments_and_recycles_id() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.attach(entity, Health(5)).unwrap();

        world.destroy_entity(entity);
        assert!(world.has::<Health>(entity));
        assert!(!world.is_active(entity));

        assert_eq!(world.process_deferred_destructions(), 1);
        assert!(!world.is_alive(entity));
        assert!(world.mask(entity).is_empty());

        let reused = world.create_entity();
        assert_eq!(reused, entity);
        assert_eq!(world.get::<Health>(reused), None);
    }
}
