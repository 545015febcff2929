//! Entity identifiers and their lifecycle.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

/// Opaque entity identifier.
///
/// Carries no data of its own. Ids are recycled, so holding an `Entity`
/// across a destruction sweep may alias a newer entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct EntityRecord {
    alive: bool,
    active: bool,
}

/// Issues and recycles entity ids.
///
/// Destruction is two-phase: [`mark_for_destruction`](Self::mark_for_destruction)
/// only records intent, and ids return to the free pool when
/// [`release`](Self::release) is called during the sweep. Released ids are
/// handed out again oldest-first.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    records: Vec<EntityRecord>,
    free: VecDeque<Entity>,
    pending: BTreeSet<Entity>,
    live: usize,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh active entity, reusing the oldest released id if any.
    pub fn create(&mut self) -> Entity {
        let entity = match self.free.pop_front() {
            Some(entity) => entity,
            None => {
                let entity = Entity(self.records.len() as u32);
                self.records.push(EntityRecord::default());
                entity
            }
        };

        self.records[entity.index()] = EntityRecord {
            alive: true,
            active: true,
        };
        self.live += 1;
        entity
    }

    /// Records that `entity` should be removed at the next sweep.
    ///
    /// Returns `false` when the entity is not alive or already pending.
    pub fn mark_for_destruction(&mut self, entity: Entity) -> bool {
        self.is_alive(entity) && self.pending.insert(entity)
    }

    /// Takes the pending set, leaving it empty.
    pub(crate) fn take_pending(&mut self) -> BTreeSet<Entity> {
        std::mem::take(&mut self.pending)
    }

    /// Returns the id to the free pool. Called once per swept entity.
    pub(crate) fn release(&mut self, entity: Entity) {
        match self.records.get_mut(entity.index()) {
            Some(record) if record.alive => {
                *record = EntityRecord::default();
                self.free.push_back(entity);
                self.live -= 1;
            }
            _ => {}
        }
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.records
            .get(entity.index())
            .is_some_and(|record| record.alive)
    }

    pub fn is_pending_destruction(&self, entity: Entity) -> bool {
        self.pending.contains(&entity)
    }

    /// Alive, not deactivated and not waiting to be swept.
    pub fn is_active(&self, entity: Entity) -> bool {
        self.records
            .get(entity.index())
            .is_some_and(|record| record.alive && record.active)
            && !self.is_pending_destruction(entity)
    }

    /// Toggles the active flag. Returns `false` for entities that are not alive.
    pub fn set_active(&mut self, entity: Entity, active: bool) -> bool {
        match self.records.get_mut(entity.index()) {
            Some(record) if record.alive => {
                record.active = active;
                true
            }
            _ => false,
        }
    }

    /// Number of alive entities, including those pending destruction.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Alive entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.alive)
            .map(|(index, _)| Entity(index as u32))
    }
}
