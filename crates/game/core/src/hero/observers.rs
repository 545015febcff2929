//! Hero event observers with revocable subscriptions.

use std::fmt;

use crate::combat::DamageType;

use super::identity::HeroId;

/// Returned by every `on_*` subscription; pass to
/// [`Hero::unsubscribe`](super::Hero::unsubscribe) to revoke it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageEvent {
    pub hero: HeroId,
    /// Damage actually removed from health, after mitigation.
    pub amount: f32,
    pub damage_type: DamageType,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealEvent {
    pub hero: HeroId,
    /// Health actually restored, after clamping to max.
    pub amount: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeathEvent {
    pub hero: HeroId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUpEvent {
    pub hero: HeroId,
    pub level: u32,
}

type Listener<E> = Box<dyn FnMut(&E)>;

/// Ordered listener list for one event type.
pub struct Observers<E> {
    listeners: Vec<(ListenerHandle, Listener<E>)>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, handle: ListenerHandle, listener: Listener<E>) {
        self.listeners.push((handle, listener));
    }

    pub(crate) fn remove(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    /// Calls every listener in subscription order.
    pub(crate) fn notify(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// All observer lists of one hero, sharing a handle counter.
#[derive(Debug, Default)]
pub(crate) struct HeroObservers {
    next_handle: u64,
    pub(crate) damage: Observers<DamageEvent>,
    pub(crate) heal: Observers<HealEvent>,
    pub(crate) death: Observers<DeathEvent>,
    pub(crate) level_up: Observers<LevelUpEvent>,
}

impl HeroObservers {
    pub(crate) fn next_handle(&mut self) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    pub(crate) fn remove(&mut self, handle: ListenerHandle) -> bool {
        self.damage.remove(handle)
            || self.heal.remove(handle)
            || self.death.remove(handle)
            || self.level_up.remove(handle)
    }

    pub(crate) fn clear(&mut self) {
        self.damage.clear();
        self.heal.clear();
        self.death.clear();
        self.level_up.clear();
    }

    pub(crate) fn total(&self) -> usize {
        self.damage.len() + self.heal.len() + self.death.len() + self.level_up.len()
    }
}
