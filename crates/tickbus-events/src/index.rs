//! The event index: typed singleton and replicant events over a record
//! store.
//!
//! [`EventIndex`] translates typed event operations into [`RecordStore`]
//! operations and keeps two per-type indices:
//!
//! - **Singleton index** -- event tag to the one live record of that type.
//!   A key is present iff a live singleton of that type exists. Creating a
//!   singleton that already exists returns the existing payload (upsert).
//! - **Query cache** -- event tag to a memoized store query enumerating
//!   every live record of that type. A query is created the first time a
//!   type is created, read, checked or destroyed, and reused until the
//!   index is destroyed. It is never invalidated individually: destroying
//!   every record of a type empties its results, the handle stays valid.
//!
//! # Ownership
//!
//! The index is generic over its store handle. `EventIndex<World>` owns
//! its store; `EventIndex<&mut World>` borrows one owned elsewhere. The
//! store must outlive the index, which the borrow checker enforces for the
//! borrowed form.
//!
//! # Contract
//!
//! The index is the only authorized mutator of its store. Releasing a
//! record behind its back (through [`EventIndex::store_mut`] or a shared
//! external store) leaves the singleton index pointing at a dead record;
//! later operations on that type report store errors. This is not guarded
//! against at runtime.
//!
//! Replicant events persist until explicitly destroyed. Nothing purges
//! them implicitly: a replicant type that no system destroys accumulates
//! across ticks. Register every replicant type with a
//! [`DestroyEventsSystem`](crate::DestroyEventsSystem) or destroy it by
//! hand.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use core::marker::PhantomData;

use tickbus_store::{Payload, Query, QueryId, QueryIter, RecordId, RecordStore, TypeTag, World};
use tracing::{debug, trace, warn};

use crate::config::EventsConfig;
use crate::destroy::DestroyEventsSystem;
use crate::error::EventError;
use crate::event::{ReplicantEvent, SingletonEvent};

/// Typed event index over a record store.
///
/// References returned by [`create_singleton`](Self::create_singleton),
/// [`get_singleton`](Self::get_singleton) and
/// [`create_replicant`](Self::create_replicant) borrow the index mutably,
/// so they cannot outlive the next operation that could release records.
#[derive(Debug)]
pub struct EventIndex<S: RecordStore = World> {
    /// Backing record store.
    store: S,
    /// Singleton event tag -> its live record.
    singletons: HashMap<TypeTag, RecordId>,
    /// Event tag -> memoized query over records of that type.
    queries: HashMap<TypeTag, QueryId>,
    /// Capacities used for this index and the systems it builds.
    config: EventsConfig,
}

impl EventIndex<World> {
    /// Create an index owning a fresh [`World`], with default capacities.
    pub fn new() -> Self {
        Self::from_config(&EventsConfig::default())
    }

    /// Create an index owning a fresh [`World`], pre-sizing the query cache
    /// for `capacity_events` types and the singleton index for
    /// `capacity_singletons` types.
    pub fn with_capacity(capacity_events: usize, capacity_singletons: usize) -> Self {
        Self::from_config(&EventsConfig {
            capacity_events,
            capacity_singletons,
            ..EventsConfig::default()
        })
    }

    /// Create an index owning a fresh [`World`], sized from `config`.
    pub fn from_config(config: &EventsConfig) -> Self {
        Self::with_store_and_config(World::new(), config)
    }
}

impl Default for EventIndex<World> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RecordStore> EventIndex<S> {
    /// Create an index over `store` with default capacities.
    ///
    /// Pass `&mut world` to index a store owned elsewhere. Queries are
    /// shared with anything else asking the store for the same types.
    pub fn with_store(store: S) -> Self {
        Self::with_store_and_config(store, &EventsConfig::default())
    }

    /// Create an index over `store`, sized from `config`.
    pub fn with_store_and_config(store: S, config: &EventsConfig) -> Self {
        Self {
            store,
            singletons: HashMap::with_capacity(config.capacity_singletons),
            queries: HashMap::with_capacity(config.capacity_events),
            config: *config,
        }
    }

    // -----------------------------------------------------------------------
    // Singleton events
    // -----------------------------------------------------------------------

    /// Return the live singleton of `T` for in-place population, creating
    /// it first if none exists.
    ///
    /// A new record is allocated and a default payload attached only when
    /// no singleton of `T` is live. Otherwise the existing payload is
    /// returned and nothing is allocated.
    pub fn create_singleton<T: SingletonEvent>(&mut self) -> Result<&mut T, EventError> {
        let tag = T::tag();
        if let Some(&id) = self.singletons.get(&tag) {
            return Ok(self.store.read_payload::<T>(id)?);
        }

        let id = self.allocate_with::<T>()?;
        self.singletons.insert(tag, id);
        trace!(event = %tag, record = %id, "Singleton event created");
        Ok(self.store.read_payload::<T>(id)?)
    }

    /// Return whether a singleton of `T` is live.
    pub fn has_singleton<T: SingletonEvent>(&self) -> bool {
        self.singletons.contains_key(&T::tag())
    }

    /// Return a copy of the live singleton of `T`, if any.
    ///
    /// Use [`get_singleton`](Self::get_singleton) to modify the payload.
    pub fn try_get_singleton<T: SingletonEvent>(&self) -> Option<T> {
        let id = self.singletons.get(&T::tag())?;
        self.store.payload::<T>(*id).ok().cloned()
    }

    /// Mutably borrow the live singleton of `T`. Never allocates.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::NotFound`] if no singleton of `T` is live.
    pub fn get_singleton<T: SingletonEvent>(&mut self) -> Result<&mut T, EventError> {
        let tag = T::tag();
        let id = *self
            .singletons
            .get(&tag)
            .ok_or(EventError::NotFound { event: tag.name() })?;
        Ok(self.store.read_payload::<T>(id)?)
    }

    /// Return the record of the live singleton of `T`, if any.
    pub fn singleton_id<T: SingletonEvent>(&self) -> Option<RecordId> {
        self.singletons.get(&T::tag()).copied()
    }

    /// Destroy the live singleton of `T`. No-op if none is live.
    pub fn destroy_singleton<T: SingletonEvent>(&mut self) -> Result<(), EventError> {
        self.destroy_singleton_tagged(T::tag())
    }

    pub(crate) fn destroy_singleton_tagged(&mut self, tag: TypeTag) -> Result<(), EventError> {
        // The entry goes even if the release fails; a record the store
        // rejects is already gone.
        let Some(id) = self.singletons.remove(&tag) else {
            return Ok(());
        };

        self.store.release_record(id)?;
        trace!(event = %tag, record = %id, "Singleton event destroyed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Replicant events
    // -----------------------------------------------------------------------

    /// Allocate a new replicant of `T` and return its default payload for
    /// in-place population. Any number of replicants of one type may be
    /// live at once.
    pub fn create_replicant<T: ReplicantEvent>(&mut self) -> Result<&mut T, EventError> {
        // `destroy` finds replicants through the cached queries.
        self.query_for(T::tag());
        let id = self.allocate_with::<T>()?;
        trace!(event = %T::tag(), record = %id, "Replicant event created");
        Ok(self.store.read_payload::<T>(id)?)
    }

    /// Return the cached query over live replicants of `T` and an accessor
    /// for their payloads.
    ///
    /// The query is created on the first call for `T` and the same handle
    /// is returned afterwards. Iterating it always reflects the live set at
    /// iteration time.
    pub fn query_replicants<T: ReplicantEvent>(&mut self) -> (Query<T>, Payloads<'_, T, S>) {
        let query = Query::from_id(self.query_for(T::tag()));
        let payloads = Payloads {
            store: &mut self.store,
            _marker: PhantomData,
        };
        (query, payloads)
    }

    /// Return whether any replicant of `T` is live. O(1).
    pub fn has_replicants<T: ReplicantEvent>(&mut self) -> bool {
        self.replicant_count::<T>() != 0
    }

    /// Number of live replicants of `T`. O(1).
    pub fn replicant_count<T: ReplicantEvent>(&mut self) -> usize {
        let query = self.query_for(T::tag());
        self.store.query_count(query)
    }

    /// Destroy every live replicant of `T`, in query order. No-op if none
    /// is live.
    pub fn destroy_replicants<T: ReplicantEvent>(&mut self) -> Result<(), EventError> {
        self.destroy_replicants_tagged(T::tag())
    }

    pub(crate) fn destroy_replicants_tagged(&mut self, tag: TypeTag) -> Result<(), EventError> {
        let query = self.query_for(tag);

        // Releasing mutates the pool the query walks; iterate a snapshot.
        let doomed: Vec<RecordId> = self.store.query_ids(query).collect();
        if doomed.is_empty() {
            return Ok(());
        }

        for id in &doomed {
            self.store.release_record(*id)?;
        }
        trace!(event = %tag, released = doomed.len(), "Replicant events destroyed");
        Ok(())
    }

    /// Allocate a record carrying a default `T`. A record whose attach
    /// fails is released again before the error is returned.
    fn allocate_with<T: Payload>(&mut self) -> Result<RecordId, EventError> {
        let id = self.store.allocate_record()?;
        if let Err(err) = self.store.attach_payload::<T>(id).map(|_| ()) {
            if let Err(release) = self.store.release_record(id) {
                warn!(record = %id, error = %release, "Record leaked after failed attach");
            }
            return Err(err.into());
        }
        Ok(id)
    }

    /// Return the memoized query for `tag`, registering it on first use.
    pub(crate) fn query_for(&mut self, tag: TypeTag) -> QueryId {
        match self.queries.entry(tag) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let query = self.store.query_of(tag);
                debug!(event = %tag, "Event query cached");
                *entry.insert(query)
            }
        }
    }

    /// Return the cached query for `T` without creating one.
    pub fn cached_query<T: ReplicantEvent>(&self) -> Option<Query<T>> {
        self.queries.get(&T::tag()).copied().map(Query::from_id)
    }

    // -----------------------------------------------------------------------
    // Lifecycle and introspection
    // -----------------------------------------------------------------------

    /// Build an empty [`DestroyEventsSystem`] sized from this index's
    /// configuration.
    pub fn destroy_events_system(&self) -> DestroyEventsSystem {
        DestroyEventsSystem::with_capacity(self.config.destroy_actions_capacity)
    }

    /// Number of live singleton events.
    pub fn singleton_count(&self) -> usize {
        self.singletons.len()
    }

    /// Number of cached queries.
    pub fn cached_query_count(&self) -> usize {
        self.queries.len()
    }

    /// Return the configuration this index was built with.
    pub const fn config(&self) -> &EventsConfig {
        &self.config
    }

    /// Borrow the backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the backing store.
    ///
    /// Releasing records or tearing the store down through this reference
    /// desynchronizes the index from its store. Attaching unrelated
    /// payloads is harmless.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Tear the index down: release every live singleton and every
    /// record matched by a cached query, then clear both indices.
    ///
    /// An owned store is dropped with the index. A borrowed store keeps
    /// every record of a type this index never handled.
    ///
    /// # Errors
    ///
    /// Returns the first release error, after every release has been
    /// attempted.
    pub fn destroy(mut self) -> Result<(), EventError> {
        let mut doomed: Vec<RecordId> = self.singletons.drain().map(|(_, id)| id).collect();
        for query in self.queries.values() {
            doomed.extend(self.store.query_ids(*query));
        }
        doomed.sort_unstable();
        doomed.dedup();

        let mut first_error = None;
        for id in &doomed {
            if let Err(err) = self.store.release_record(*id) {
                first_error.get_or_insert(EventError::from(err));
            }
        }
        debug!(
            released = doomed.len(),
            queries = self.queries.len(),
            "Event index destroyed"
        );
        self.queries.clear();
        first_error.map_or(Ok(()), Err)
    }

    /// Drop the indices and hand the store back untouched.
    pub fn into_store(self) -> S {
        self.store
    }
}

/// Payload accessor returned by [`EventIndex::query_replicants`].
///
/// Borrows the index's store; drop it before creating or destroying
/// events.
pub struct Payloads<'a, T, S> {
    store: &'a mut S,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ReplicantEvent, S: RecordStore> Payloads<'_, T, S> {
    /// Iterate the records currently matched by `query`.
    pub fn ids(&self, query: Query<T>) -> QueryIter<'_> {
        self.store.query_ids(query.id())
    }

    /// Collect the records currently matched by `query`, so payloads can
    /// be mutated while walking them.
    pub fn snapshot(&self, query: Query<T>) -> Vec<RecordId> {
        self.ids(query).collect()
    }

    /// Number of records currently matched by `query`.
    pub fn len(&self, query: Query<T>) -> usize {
        self.store.query_count(query.id())
    }

    /// Return whether `query` currently matches nothing.
    pub fn is_empty(&self, query: Query<T>) -> bool {
        self.len(query) == 0
    }

    /// Iterate `(record, payload)` pairs for every record matched by
    /// `query`.
    pub fn iter(&self, query: Query<T>) -> impl Iterator<Item = (RecordId, &T)> + '_ {
        self.ids(query)
            .filter_map(move |id| self.store.payload::<T>(id).ok().map(|payload| (id, payload)))
    }

    /// Borrow the payload of `id`.
    pub fn get(&self, id: RecordId) -> Result<&T, EventError> {
        Ok(self.store.payload::<T>(id)?)
    }

    /// Mutably borrow the payload of `id`.
    pub fn get_mut(&mut self, id: RecordId) -> Result<&mut T, EventError> {
        Ok(self.store.read_payload::<T>(id)?)
    }
}

impl<T, S> core::fmt::Debug for Payloads<'_, T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Payloads")
            .field("payload", &core::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use tickbus_store::{Payload, StoreError};

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct Damage {
        amount: u32,
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct Pause;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct Hit {
        target: u32,
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct Spawned {
        id: u32,
    }

    crate::declare_events! {
        singleton Damage,
        singleton Pause,
        replicant Hit,
        replicant Spawned,
    }

    #[test]
    fn create_singleton_is_idempotent() {
        let mut events = EventIndex::new();
        events.create_singleton::<Damage>().unwrap().amount = 3;
        let first = events.singleton_id::<Damage>().unwrap();
        let records = events.store().live_records();

        let again = events.create_singleton::<Damage>().unwrap();
        assert_eq!(again.amount, 3);
        assert_eq!(events.singleton_id::<Damage>(), Some(first));
        assert_eq!(events.store().live_records(), records);
        assert_eq!(events.singleton_count(), 1);
    }

    #[test]
    fn singleton_presence_follows_lifecycle() {
        let mut events = EventIndex::new();
        assert!(!events.has_singleton::<Damage>());
        assert!(events.try_get_singleton::<Damage>().is_none());

        events.create_singleton::<Damage>().unwrap();
        assert!(events.has_singleton::<Damage>());
        assert!(events.get_singleton::<Damage>().is_ok());

        events.destroy_singleton::<Damage>().unwrap();
        assert!(!events.has_singleton::<Damage>());
        assert!(events.singleton_id::<Damage>().is_none());
        assert_eq!(events.store().live_records(), 0);
    }

    #[test]
    fn get_singleton_when_absent_is_not_found() {
        let mut events = EventIndex::new();
        let err = events.get_singleton::<Damage>().unwrap_err();
        assert!(matches!(err, EventError::NotFound { event } if event.ends_with("Damage")));
        assert_eq!(events.store().live_records(), 0);
    }

    #[test]
    fn try_get_singleton_returns_a_copy() {
        let mut events = EventIndex::new();
        events.create_singleton::<Damage>().unwrap().amount = 10;

        let mut copy = events.try_get_singleton::<Damage>().unwrap();
        copy.amount = 99;
        assert_eq!(events.get_singleton::<Damage>().unwrap().amount, 10);
    }

    #[test]
    fn singleton_types_are_independent() {
        let mut events = EventIndex::new();
        events.create_singleton::<Damage>().unwrap();
        events.create_singleton::<Pause>().unwrap();
        events.destroy_singleton::<Pause>().unwrap();

        assert!(events.has_singleton::<Damage>());
        assert!(!events.has_singleton::<Pause>());
    }

    #[test]
    fn recreated_singleton_gets_a_fresh_default_payload() {
        let mut events = EventIndex::new();
        events.create_singleton::<Damage>().unwrap().amount = 7;
        events.destroy_singleton::<Damage>().unwrap();
        assert_eq!(events.create_singleton::<Damage>().unwrap().amount, 0);
    }

    #[test]
    fn replicants_accumulate() {
        let mut events = EventIndex::new();
        for target in 1..=4 {
            events.create_replicant::<Hit>().unwrap().target = target;
        }

        assert!(events.has_replicants::<Hit>());
        assert_eq!(events.replicant_count::<Hit>(), 4);

        let (query, payloads) = events.query_replicants::<Hit>();
        let mut targets: Vec<u32> = payloads.iter(query).map(|(_, hit)| hit.target).collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![1, 2, 3, 4]);
        assert_eq!(payloads.len(query), 4);
    }

    #[test]
    fn query_is_memoized_per_type() {
        let mut events = EventIndex::new();
        let (first, _) = events.query_replicants::<Hit>();
        assert!(!events.has_replicants::<Hit>());
        events.destroy_replicants::<Hit>().unwrap();
        let (second, _) = events.query_replicants::<Hit>();

        assert_eq!(first, second);
        assert_eq!(events.cached_query_count(), 1);
        assert_eq!(events.store().queries_created(), 1);

        assert!(!events.has_replicants::<Spawned>());
        assert_eq!(events.cached_query_count(), 2);
    }

    #[test]
    fn query_reflects_events_created_after_it() {
        let mut events = EventIndex::new();
        let (query, payloads) = events.query_replicants::<Hit>();
        assert!(payloads.is_empty(query));

        events.create_replicant::<Hit>().unwrap().target = 5;
        let (_, payloads) = events.query_replicants::<Hit>();
        assert_eq!(payloads.ids(query).count(), 1);
    }

    #[test]
    fn payloads_can_be_mutated_in_place() {
        let mut events = EventIndex::new();
        events.create_replicant::<Hit>().unwrap().target = 1;
        events.create_replicant::<Hit>().unwrap().target = 2;

        let (query, mut payloads) = events.query_replicants::<Hit>();
        for id in payloads.snapshot(query) {
            payloads.get_mut(id).unwrap().target += 10;
        }

        let (query, payloads) = events.query_replicants::<Hit>();
        let mut targets: Vec<u32> = payloads.iter(query).map(|(_, hit)| hit.target).collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![11, 12]);
    }

    #[test]
    fn destroy_replicants_empties_the_same_query() {
        let mut events = EventIndex::new();
        for _ in 0..3 {
            events.create_replicant::<Hit>().unwrap();
        }
        events.create_replicant::<Spawned>().unwrap();
        let (before, _) = events.query_replicants::<Hit>();

        events.destroy_replicants::<Hit>().unwrap();

        assert!(!events.has_replicants::<Hit>());
        let (after, payloads) = events.query_replicants::<Hit>();
        assert_eq!(before, after);
        assert_eq!(payloads.ids(after).count(), 0);
        assert_eq!(events.cached_query::<Hit>(), Some(before));
        assert_eq!(events.replicant_count::<Spawned>(), 1);
        assert_eq!(events.store().live_records(), 1);
    }

    #[test]
    fn destroy_absent_events_is_a_no_op() {
        let mut events = EventIndex::new();
        events.create_singleton::<Pause>().unwrap();

        assert!(events.destroy_singleton::<Damage>().is_ok());
        assert!(events.destroy_replicants::<Hit>().is_ok());
        assert!(events.destroy_replicants::<Hit>().is_ok());

        assert!(events.has_singleton::<Pause>());
        assert_eq!(events.store().live_records(), 1);
    }

    #[test]
    fn store_errors_propagate_unchanged() {
        let mut events = EventIndex::new();
        events.create_singleton::<Damage>().unwrap();
        let id = events.singleton_id::<Damage>().unwrap();

        // Releasing behind the index's back breaks the contract.
        events.store_mut().release_record(id).unwrap();
        let err = events.destroy_singleton::<Damage>().unwrap_err();
        assert_eq!(
            err,
            EventError::Store {
                source: StoreError::StaleRecord(id)
            }
        );
        // The dead entry is dropped, so the type can be created again.
        assert!(!events.has_singleton::<Damage>());
        assert!(events.create_singleton::<Damage>().is_ok());
    }

    #[test]
    fn borrowed_store_outlives_the_index() {
        let mut world = World::new();
        {
            let mut events = EventIndex::with_store(&mut world);
            events.create_singleton::<Damage>().unwrap().amount = 1;
            events.create_replicant::<Hit>().unwrap();
        }
        assert_eq!(world.live_records(), 2);
    }

    #[test]
    fn into_store_keeps_records() {
        let mut events = EventIndex::new();
        events.create_replicant::<Hit>().unwrap();
        let world = events.into_store();
        assert_eq!(world.live_records(), 1);
    }

    #[test]
    fn destroy_releases_only_index_records() {
        #[derive(Debug, Default)]
        struct Marker;

        let mut world = World::new();
        let outside = world.allocate_record().unwrap();
        world.attach_payload::<Marker>(outside).unwrap();

        let mut events = EventIndex::with_store(&mut world);
        events.create_singleton::<Damage>().unwrap();
        events.create_replicant::<Hit>().unwrap();
        events.create_replicant::<Hit>().unwrap();
        assert_eq!(events.replicant_count::<Spawned>(), 0);
        events.destroy().unwrap();

        assert_eq!(world.live_records(), 1);
        assert!(world.is_live(outside));
        assert!(world.payload::<Marker>(outside).is_ok());
    }

    #[test]
    fn destroy_covers_replicants_created_after_the_query() {
        let mut world = World::new();
        let mut events = EventIndex::with_store(&mut world);
        events.create_replicant::<Hit>().unwrap();
        let (query, _) = events.query_replicants::<Hit>();
        events.create_replicant::<Hit>().unwrap();
        events.create_singleton::<Pause>().unwrap();
        assert_eq!(events.cached_query::<Hit>(), Some(query));

        events.destroy().unwrap();
        assert_eq!(world.live_records(), 0);
    }

    #[derive(Debug, Default)]
    struct RejectingStore(World);

    impl RecordStore for RejectingStore {
        fn allocate_record(&mut self) -> Result<RecordId, StoreError> {
            self.0.allocate_record()
        }

        fn attach_payload<T: Payload>(&mut self, _id: RecordId) -> Result<&mut T, StoreError> {
            Err(StoreError::Internal("attach rejected"))
        }

        fn read_payload<T: Payload>(&mut self, id: RecordId) -> Result<&mut T, StoreError> {
            self.0.read_payload(id)
        }

        fn payload<T: Payload>(&self, id: RecordId) -> Result<&T, StoreError> {
            self.0.payload(id)
        }

        fn release_record(&mut self, id: RecordId) -> Result<(), StoreError> {
            self.0.release_record(id)
        }

        fn query_of(&mut self, tag: TypeTag) -> QueryId {
            self.0.query_of(tag)
        }

        fn query_count(&self, query: QueryId) -> usize {
            self.0.query_count(query)
        }

        fn query_ids(&self, query: QueryId) -> QueryIter<'_> {
            self.0.query_ids(query)
        }

        fn teardown(&mut self) {
            self.0.teardown();
        }
    }

    #[test]
    fn failed_attach_releases_the_new_record() {
        let mut events = EventIndex::with_store(RejectingStore::default());

        for _ in 0..3 {
            assert!(matches!(
                events.create_replicant::<Hit>(),
                Err(EventError::Store {
                    source: StoreError::Internal(_)
                })
            ));
        }
        assert!(events.create_singleton::<Damage>().is_err());

        assert!(!events.has_singleton::<Damage>());
        assert_eq!(events.replicant_count::<Hit>(), 0);
        assert_eq!(events.store().0.live_records(), 0);
    }

    #[test]
    fn capacities_come_from_config() {
        let config = EventsConfig {
            capacity_events: 2,
            capacity_singletons: 3,
            destroy_actions_capacity: 5,
        };
        let events = EventIndex::from_config(&config);
        assert_eq!(events.config(), &config);
        assert!(events.destroy_events_system().is_empty());

        let sized = EventIndex::with_capacity(4, 4);
        assert_eq!(sized.config().capacity_events, 4);
        assert_eq!(sized.config().destroy_actions_capacity, 16);
    }
}
