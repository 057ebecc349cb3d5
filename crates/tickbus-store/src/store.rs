//! The [`RecordStore`] trait: the minimal store contract the event layer
//! consumes.
//!
//! [`World`](crate::World) is the in-crate implementation. The blanket
//! implementation for `&mut S` lets a consumer either own its store or
//! borrow one owned elsewhere through the same generic parameter.

use crate::error::StoreError;
use crate::query::{QueryId, QueryIter};
use crate::record::RecordId;
use crate::tag::TypeTag;

/// A payload that can be attached to a record.
///
/// Payloads start out default-initialized and are populated in place.
pub trait Payload: Default + 'static {}

impl<T: Default + 'static> Payload for T {}

/// Keyed record store with typed payloads and live per-type queries.
///
/// References returned by [`attach_payload`](Self::attach_payload) and
/// [`read_payload`](Self::read_payload) borrow the store, so they cannot
/// outlive the next structural mutation.
pub trait RecordStore {
    /// Allocate a fresh, previously unused record identifier.
    fn allocate_record(&mut self) -> Result<RecordId, StoreError>;

    /// Attach a default-initialized `T` to `id` and return it for
    /// population.
    ///
    /// Fails if `id` is not live or already carries a `T`.
    fn attach_payload<T: Payload>(&mut self, id: RecordId) -> Result<&mut T, StoreError>;

    /// Mutably borrow the `T` attached to `id`.
    fn read_payload<T: Payload>(&mut self, id: RecordId) -> Result<&mut T, StoreError>;

    /// Borrow the `T` attached to `id`.
    fn payload<T: Payload>(&self, id: RecordId) -> Result<&T, StoreError>;

    /// Release `id` and drop every payload attached to it.
    ///
    /// Releasing an identifier twice is a caller error and fails with
    /// [`StoreError::StaleRecord`].
    fn release_record(&mut self, id: RecordId) -> Result<(), StoreError>;

    /// Return the query matching records that carry the payload type named
    /// by `tag`, registering it on first request. Every caller asking for
    /// the same tag gets the same handle. The type does not need to have
    /// been attached yet.
    fn query_of(&mut self, tag: TypeTag) -> QueryId;

    /// Number of records currently matched by `query`. Unknown handles
    /// match nothing.
    fn query_count(&self, query: QueryId) -> usize;

    /// Iterate the records currently matched by `query`. Unknown handles
    /// match nothing.
    fn query_ids(&self, query: QueryId) -> QueryIter<'_>;

    /// Release every record, pool and query. Identifiers and query handles
    /// issued before the teardown must not be used afterwards.
    fn teardown(&mut self);
}

impl<S: RecordStore> RecordStore for &mut S {
    fn allocate_record(&mut self) -> Result<RecordId, StoreError> {
        (**self).allocate_record()
    }

    fn attach_payload<T: Payload>(&mut self, id: RecordId) -> Result<&mut T, StoreError> {
        (**self).attach_payload(id)
    }

    fn read_payload<T: Payload>(&mut self, id: RecordId) -> Result<&mut T, StoreError> {
        (**self).read_payload(id)
    }

    fn payload<T: Payload>(&self, id: RecordId) -> Result<&T, StoreError> {
        (**self).payload(id)
    }

    fn release_record(&mut self, id: RecordId) -> Result<(), StoreError> {
        (**self).release_record(id)
    }

    fn query_of(&mut self, tag: TypeTag) -> QueryId {
        (**self).query_of(tag)
    }

    fn query_count(&self, query: QueryId) -> usize {
        (**self).query_count(query)
    }

    fn query_ids(&self, query: QueryId) -> QueryIter<'_> {
        (**self).query_ids(query)
    }

    fn teardown(&mut self) {
        (**self).teardown();
    }
}
