//! Fixed-width capability bit-set.

use core::fmt;

use crate::component::ComponentId;

/// One bit per fragment type attached to an entity.
///
/// Bit `i` is set exactly when the entity holds a fragment whose
/// [`ComponentId`] is `i`. Processors describe what they need with the same
/// type, so "does this entity qualify" is a single AND.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapabilityMask(u64);

impl CapabilityMask {
    /// Number of distinct fragment types a mask can describe.
    pub const CAPACITY: usize = u64::BITS as usize;

    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub fn set(&mut self, id: ComponentId) {
        self.0 |= Self::bit(id);
    }

    pub fn clear(&mut self, id: ComponentId) {
        self.0 &= !Self::bit(id);
    }

    pub const fn has(self, id: ComponentId) -> bool {
        self.0 & Self::bit(id) != 0
    }

    /// Returns a copy with `id` set (builder style).
    #[must_use]
    pub const fn with(self, id: ComponentId) -> Self {
        Self(self.0 | Self::bit(id))
    }

    /// True when every bit of `required` is also set here.
    pub const fn satisfies(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the set component ids in ascending order.
    pub fn iter(self) -> impl Iterator<Item = ComponentId> {
        let bits = self.0;
        (0..Self::CAPACITY as u8)
            .filter(move |i| bits & (1u64 << i) != 0)
            .map(ComponentId::new)
    }

    const fn bit(id: ComponentId) -> u64 {
        1u64 << id.index()
    }
}

impl fmt::Debug for CapabilityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityMask({:#018x})", self.0)
    }
}

impl fmt::Binary for CapabilityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}
