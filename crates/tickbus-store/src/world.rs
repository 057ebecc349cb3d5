//! In-memory [`RecordStore`] implementation.
//!
//! The [`World`] owns the record table, one type-erased pool per payload
//! type, and every registered query. Pools are created the first time a
//! payload of their type is attached and are addressed by a dense
//! [`PoolId`] afterwards; the tag lookup happens once per call.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::StoreError;
use crate::pool::{ErasedPool, Pool, PoolId};
use crate::query::{QueryId, QueryIter, QueryState};
use crate::record::{RecordId, RecordTable};
use crate::store::{Payload, RecordStore};
use crate::tag::TypeTag;

/// In-memory record store.
#[derive(Default)]
pub struct World {
    /// Record slots and generations.
    records: RecordTable,
    /// Payload type -> pool.
    pool_index: BTreeMap<TypeTag, PoolId>,
    /// Type-erased pools, indexed by [`PoolId`].
    pools: Vec<Box<dyn ErasedPool>>,
    /// Registered queries, indexed by [`QueryId`].
    queries: Vec<QueryState>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub const fn live_records(&self) -> usize {
        self.records.live()
    }

    /// Return whether `id` names a live record.
    pub fn is_live(&self, id: RecordId) -> bool {
        self.records.is_live(id)
    }

    /// Number of distinct queries registered since the last teardown.
    pub const fn queries_created(&self) -> usize {
        self.queries.len()
    }

    /// Number of payload pools created since the last teardown.
    pub const fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Return the pool for `T`, creating it on first use.
    fn ensure_pool<T: Payload>(&mut self) -> PoolId {
        let tag = TypeTag::of::<T>();
        if let Some(id) = self.pool_index.get(&tag) {
            return *id;
        }

        let id = PoolId(self.pools.len());
        self.pools.push(Box::new(Pool::<T>::default()));
        self.pool_index.insert(tag, id);

        // Queries registered before the first attach start matching now.
        for query in self.queries.iter_mut().filter(|q| q.tag == tag) {
            query.pool = Some(id);
        }

        trace!(payload = %tag, pool = id.0, "Payload pool created");
        id
    }

    fn typed_mut<T: Payload>(
        pools: &mut [Box<dyn ErasedPool>],
        id: PoolId,
    ) -> Result<&mut Pool<T>, StoreError> {
        pools
            .get_mut(id.0)
            .and_then(|pool| pool.as_any_mut().downcast_mut::<Pool<T>>())
            .ok_or(StoreError::PoolTypeMismatch {
                payload: core::any::type_name::<T>(),
            })
    }

    fn typed<T: Payload>(&self, id: PoolId) -> Result<&Pool<T>, StoreError> {
        self.pools
            .get(id.0)
            .and_then(|pool| pool.as_any().downcast_ref::<Pool<T>>())
            .ok_or(StoreError::PoolTypeMismatch {
                payload: core::any::type_name::<T>(),
            })
    }

    /// Resolve the pool of `T` for a read of `id`.
    fn readable_pool<T: Payload>(&self, id: RecordId) -> Result<PoolId, StoreError> {
        if !self.records.is_live(id) {
            return Err(StoreError::StaleRecord(id));
        }
        self.pool_index
            .get(&TypeTag::of::<T>())
            .copied()
            .ok_or(StoreError::PayloadMissing {
                record: id,
                payload: core::any::type_name::<T>(),
            })
    }

    fn query_owners(&self, query: QueryId) -> &[RecordId] {
        self.queries
            .get(query.0)
            .and_then(|state| state.pool)
            .and_then(|pool| self.pools.get(pool.0))
            .map(|pool| pool.owners())
            .unwrap_or_default()
    }
}

impl RecordStore for World {
    fn allocate_record(&mut self) -> Result<RecordId, StoreError> {
        self.records.allocate()
    }

    fn attach_payload<T: Payload>(&mut self, id: RecordId) -> Result<&mut T, StoreError> {
        if !self.records.is_live(id) {
            return Err(StoreError::StaleRecord(id));
        }

        let pool_id = self.ensure_pool::<T>();
        let payload = Self::typed_mut::<T>(&mut self.pools, pool_id)?.insert_default(id)?;
        self.records.note_attached(id, pool_id)?;
        Ok(payload)
    }

    fn read_payload<T: Payload>(&mut self, id: RecordId) -> Result<&mut T, StoreError> {
        let pool_id = self.readable_pool::<T>(id)?;
        Self::typed_mut::<T>(&mut self.pools, pool_id)?.get_mut(id)
    }

    fn payload<T: Payload>(&self, id: RecordId) -> Result<&T, StoreError> {
        let pool_id = self.readable_pool::<T>(id)?;
        self.typed::<T>(pool_id)?.get(id)
    }

    fn release_record(&mut self, id: RecordId) -> Result<(), StoreError> {
        for pool_id in self.records.release(id)? {
            if let Some(pool) = self.pools.get_mut(pool_id.0) {
                pool.remove(id);
            }
        }
        Ok(())
    }

    fn query_of(&mut self, tag: TypeTag) -> QueryId {
        if let Some(existing) = self.queries.iter().position(|q| q.tag == tag) {
            return QueryId(existing);
        }

        let id = QueryId(self.queries.len());
        let pool = self.pool_index.get(&tag).copied();
        self.queries.push(QueryState { tag, pool });
        debug!(payload = %tag, query = id.0, "Query registered");
        id
    }

    fn query_count(&self, query: QueryId) -> usize {
        self.query_owners(query).len()
    }

    fn query_ids(&self, query: QueryId) -> QueryIter<'_> {
        QueryIter::new(self.query_owners(query))
    }

    fn teardown(&mut self) {
        debug!(
            live_records = self.records.live(),
            pools = self.pools.len(),
            queries = self.queries.len(),
            "World torn down"
        );
        self.records.clear();
        self.pool_index.clear();
        self.pools.clear();
        self.queries.clear();
    }
}

impl core::fmt::Debug for World {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("World")
            .field("live_records", &self.records.live())
            .field("pools", &self.pool_index.keys().collect::<Vec<_>>())
            .field("queries", &self.queries.len())
            .finish()
    }
}
