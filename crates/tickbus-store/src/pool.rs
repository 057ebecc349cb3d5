//! Typed payload pools.
//!
//! Each payload type gets one [`Pool`]: a sparse set mapping record slots
//! to a densely packed payload vector. Dense storage keeps iteration over
//! every record carrying a type a plain slice walk, and `swap_remove`
//! keeps release O(1).
//!
//! Pools are stored type-erased behind [`ErasedPool`] so a record release
//! can drop its payloads without knowing their types.

use std::any::Any;

use crate::error::StoreError;
use crate::record::RecordId;

/// Dense index of a pool inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolId(pub(crate) usize);

/// Sparse-set storage for payloads of one type.
#[derive(Debug)]
pub(crate) struct Pool<T> {
    /// Packed payloads.
    dense: Vec<T>,
    /// Owner of each packed payload, parallel to `dense`.
    owners: Vec<RecordId>,
    /// Record slot -> position in `dense`.
    sparse: Vec<Option<usize>>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            dense: Vec::new(),
            owners: Vec::new(),
            sparse: Vec::new(),
        }
    }
}

impl<T: Default> Pool<T> {
    /// Attach a default-initialized payload to `id`.
    pub(crate) fn insert_default(&mut self, id: RecordId) -> Result<&mut T, StoreError> {
        if self.position(id).is_some() {
            return Err(StoreError::AlreadyAttached {
                record: id,
                payload: core::any::type_name::<T>(),
            });
        }

        let slot = id.slot();
        if self.sparse.len() <= slot {
            let len = slot
                .checked_add(1)
                .ok_or(StoreError::Internal("sparse index overflow"))?;
            self.sparse.resize(len, None);
        }

        let position = self.dense.len();
        self.dense.push(T::default());
        self.owners.push(id);
        if let Some(entry) = self.sparse.get_mut(slot) {
            *entry = Some(position);
        }

        self.dense
            .last_mut()
            .ok_or(StoreError::Internal("failed to retrieve payload after insert"))
    }
}

impl<T> Pool<T> {
    /// Borrow the payload of `id`.
    pub(crate) fn get(&self, id: RecordId) -> Result<&T, StoreError> {
        self.position(id)
            .and_then(|position| self.dense.get(position))
            .ok_or_else(|| Self::missing(id))
    }

    /// Mutably borrow the payload of `id`.
    pub(crate) fn get_mut(&mut self, id: RecordId) -> Result<&mut T, StoreError> {
        match self.position(id) {
            Some(position) => self.dense.get_mut(position).ok_or_else(|| Self::missing(id)),
            None => Err(Self::missing(id)),
        }
    }

    /// Position of `id` in the dense arrays, checking the generation.
    fn position(&self, id: RecordId) -> Option<usize> {
        let position = self.sparse.get(id.slot()).copied().flatten()?;
        (self.owners.get(position) == Some(&id)).then_some(position)
    }

    fn missing(id: RecordId) -> StoreError {
        StoreError::PayloadMissing {
            record: id,
            payload: core::any::type_name::<T>(),
        }
    }
}

/// Type-erased view of a [`Pool`].
pub(crate) trait ErasedPool: Any {
    /// Drop the payload of `id` if present. Returns whether one was removed.
    fn remove(&mut self, id: RecordId) -> bool;

    /// Records currently carrying this payload type, in dense order.
    fn owners(&self) -> &[RecordId];

    /// Upcast for downcasting back to the concrete pool.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting back to the concrete pool.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> ErasedPool for Pool<T> {
    fn remove(&mut self, id: RecordId) -> bool {
        let Some(position) = self.position(id) else {
            return false;
        };

        self.dense.swap_remove(position);
        self.owners.swap_remove(position);
        if let Some(entry) = self.sparse.get_mut(id.slot()) {
            *entry = None;
        }

        // The former last element now lives at `position`.
        if let Some(moved) = self.owners.get(position).copied()
            && let Some(entry) = self.sparse.get_mut(moved.slot())
        {
            *entry = Some(position);
        }
        true
    }

    fn owners(&self) -> &[RecordId] {
        &self.owners
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
