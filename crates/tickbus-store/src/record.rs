//! Record identifiers and slot allocation.
//!
//! A [`RecordId`] is a slot index paired with a generation counter. Slots
//! are recycled through a free list; every release bumps the slot's
//! generation, so an identifier held past its record's release no longer
//! matches and is rejected as stale instead of aliasing a newer record.

use crate::error::StoreError;
use crate::pool::PoolId;

/// Opaque handle for one live record in the store.
///
/// Callers only store and compare identifiers. The slot/generation layout
/// is an implementation detail of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId {
    /// Slot index in the record table.
    index: u32,
    /// Generation of the slot at allocation time.
    generation: u32,
}

impl RecordId {
    /// Return the slot index as a `usize` for table lookups.
    pub(crate) const fn slot(self) -> usize {
        self.index as usize
    }

    /// Return the generation counter of this identifier.
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Book-keeping for a single record slot.
#[derive(Debug, Default)]
struct Slot {
    /// Current generation. Bumped on every release.
    generation: u32,
    /// Whether the slot currently holds a live record.
    alive: bool,
    /// Pools holding a payload for the live record, in attach order.
    pools: Vec<PoolId>,
}

/// Slot table with a free list of recyclable indices.
#[derive(Debug, Default)]
pub(crate) struct RecordTable {
    /// All slots ever allocated.
    slots: Vec<Slot>,
    /// Indices of released slots, reused LIFO.
    free: Vec<u32>,
    /// Number of live records.
    live: usize,
}

impl RecordTable {
    /// Allocate a fresh record, reusing a released slot when possible.
    pub(crate) fn allocate(&mut self) -> Result<RecordId, StoreError> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = u32::try_from(self.slots.len())
                    .map_err(|_err| StoreError::CapacityExhausted(self.slots.len()))?;
                self.slots.push(Slot::default());
                index
            }
        };

        let slot = self
            .slots
            .get_mut(index as usize)
            .ok_or(StoreError::Internal("allocated slot index out of range"))?;
        slot.alive = true;
        self.live = self.live.saturating_add(1);

        Ok(RecordId {
            index,
            generation: slot.generation,
        })
    }

    /// Return whether `id` names a live record of the current generation.
    pub(crate) fn is_live(&self, id: RecordId) -> bool {
        self.slots
            .get(id.slot())
            .is_some_and(|slot| slot.alive && slot.generation == id.generation)
    }

    /// Remember that `pool` now holds a payload for `id`.
    pub(crate) fn note_attached(&mut self, id: RecordId, pool: PoolId) -> Result<(), StoreError> {
        let slot = self.live_slot_mut(id)?;
        slot.pools.push(pool);
        Ok(())
    }

    /// Release `id`, returning the pools that held payloads for it.
    pub(crate) fn release(&mut self, id: RecordId) -> Result<Vec<PoolId>, StoreError> {
        let slot = self.live_slot_mut(id)?;
        slot.alive = false;
        slot.generation = slot.generation.wrapping_add(1);
        let pools = core::mem::take(&mut slot.pools);

        self.free.push(id.index);
        self.live = self.live.saturating_sub(1);
        Ok(pools)
    }

    /// Number of live records.
    pub(crate) const fn live(&self) -> usize {
        self.live
    }

    /// Drop every slot. Identifiers issued before the reset must not be
    /// used again; they may alias records allocated afterwards.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    fn live_slot_mut(&mut self, id: RecordId) -> Result<&mut Slot, StoreError> {
        self.slots
            .get_mut(id.slot())
            .filter(|slot| slot.alive && slot.generation == id.generation)
            .ok_or(StoreError::StaleRecord(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn allocation_hands_out_distinct_ids() {
        let mut table = RecordTable::default();
        let a = table.allocate().unwrap();
        let b = table.allocate().unwrap();
        assert_ne!(a, b);
        assert_eq!(table.live(), 2);
    }

    #[test]
    fn released_slot_is_recycled_with_new_generation() {
        let mut table = RecordTable::default();
        let first = table.allocate().unwrap();
        table.release(first).unwrap();

        let second = table.allocate().unwrap();
        assert_eq!(first.slot(), second.slot());
        assert_ne!(first.generation(), second.generation());
        assert!(!table.is_live(first));
        assert!(table.is_live(second));
    }

    #[test]
    fn double_release_is_rejected() {
        let mut table = RecordTable::default();
        let id = table.allocate().unwrap();
        assert!(table.release(id).is_ok());
        assert_eq!(table.release(id), Err(StoreError::StaleRecord(id)));
        assert_eq!(table.live(), 0);
    }

    #[test]
    fn release_returns_attached_pools() {
        let mut table = RecordTable::default();
        let id = table.allocate().unwrap();
        table.note_attached(id, PoolId(0)).unwrap();
        table.note_attached(id, PoolId(3)).unwrap();
        assert_eq!(table.release(id).unwrap(), vec![PoolId(0), PoolId(3)]);
    }

    #[test]
    fn clear_invalidates_everything() {
        let mut table = RecordTable::default();
        let id = table.allocate().unwrap();
        table.clear();
        assert!(!table.is_live(id));
        assert_eq!(table.live(), 0);
    }
}
