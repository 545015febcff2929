//! Processors: behavior units driven once per tick over a matched entity set.

use std::any::{Any, TypeId, type_name};
use std::collections::BTreeSet;
use std::fmt;

use crate::component::Component;
use crate::entity::{Entity, EntityRegistry};
use crate::mask::CapabilityMask;
use crate::storage::ComponentStore;

// ============================================================================
// Processor Trait
// ============================================================================

/// Upcast helper so registered processors can be looked up by concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Which update pass drives a processor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Runs once per frame with the frame's delta time.
    #[default]
    Variable,
    /// Runs zero or more times per frame with the fixed step.
    Fixed,
}

/// A behavior unit with a required capability set.
///
/// The world keeps `matched` equal to the set of live entities whose mask
/// contains every required fragment. `on_entity_added` and
/// `on_entity_removed` fire on each transition of that set, so processors
/// can maintain their own indexes.
///
/// # Lifecycle
///
/// 1. [`requirements`](Self::requirements) is read once at registration
/// 2. [`initialize`](Self::initialize) runs before the first scan
/// 3. every live entity is scanned and matching ones are added
/// 4. [`update`](Self::update) runs each pass of [`stage`](Self::stage)
///    while the processor is active
pub trait Processor: AsAny {
    /// Name used in logs and error messages.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    fn requirements(&self, requirements: &mut Requirements);

    fn stage(&self) -> Stage {
        Stage::Variable
    }

    fn initialize(&mut self) {}

    fn update(&mut self, matched: &BTreeSet<Entity>, ctx: &mut TickContext<'_>, dt: f32);

    fn on_entity_added(&mut self, _entity: Entity, _components: &ComponentStore) {}

    fn on_entity_removed(&mut self, _entity: Entity, _components: &ComponentStore) {}
}

/// Fragment types a processor needs, collected before they are assigned ids.
#[derive(Debug, Default)]
pub struct Requirements {
    types: Vec<(TypeId, &'static str)>,
}

impl Requirements {
    pub fn require<T: Component>(&mut self) -> &mut Self {
        self.types.push((TypeId::of::<T>(), type_name::<T>()));
        self
    }

    pub(crate) fn into_types(self) -> Vec<(TypeId, &'static str)> {
        self.types
    }
}

// ============================================================================
// Tick Context
// ============================================================================

/// What a processor may touch during [`Processor::update`].
///
/// Fragments can be read and mutated in place and entities can be queued for
/// destruction. Attaching or detaching is not possible here, so the matched
/// set handed to the processor cannot change underneath it.
pub struct TickContext<'w> {
    pub(crate) components: &'w mut ComponentStore,
    pub(crate) entities: &'w mut EntityRegistry,
}

impl<'w> TickContext<'w> {
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.components.get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut(entity)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.components.has::<T>(entity)
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.entities.is_active(entity)
    }

    /// Queues `entity` for the next destruction sweep.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        self.entities.mark_for_destruction(entity)
    }
}

// ============================================================================
// Registered Slot
// ============================================================================

/// Stable id of a registered processor, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessorId(u32);

impl ProcessorId {
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "processor:{}", self.0)
    }
}

pub(crate) struct ProcessorSlot {
    pub(crate) id: ProcessorId,
    pub(crate) type_id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) stage: Stage,
    pub(crate) required: CapabilityMask,
    pub(crate) matched: BTreeSet<Entity>,
    pub(crate) active: bool,
    pub(crate) processor: Box<dyn Processor>,
}

impl ProcessorSlot {
    pub(crate) fn new(
        index: usize,
        type_id: TypeId,
        required: CapabilityMask,
        processor: Box<dyn Processor>,
    ) -> Self {
        Self {
            id: ProcessorId(index as u32),
            type_id,
            name: processor.name(),
            stage: processor.stage(),
            required,
            matched: BTreeSet::new(),
            active: true,
            processor,
        }
    }

    /// Brings membership of `entity` in line with `mask`.
    pub(crate) fn refresh(
        &mut self,
        entity: Entity,
        mask: CapabilityMask,
        components: &ComponentStore,
    ) {
        if mask.satisfies(self.required) {
            if self.matched.insert(entity) {
                self.processor.on_entity_added(entity, components);
            }
        } else {
            self.evict(entity, components);
        }
    }

    pub(crate) fn evict(&mut self, entity: Entity, components: &ComponentStore) {
        if self.matched.remove(&entity) {
            self.processor.on_entity_removed(entity, components);
        }
    }
}
