//! Live queries over the records carrying one payload type.
//!
//! A query is a stored description ("every record with a `T` payload"),
//! not a result set. Iterating it walks the payload pool as it is at that
//! moment, so records attached or released between two iterations are
//! always reflected. Handles stay valid until the store is torn down.

use core::marker::PhantomData;

use crate::pool::PoolId;
use crate::record::RecordId;
use crate::tag::TypeTag;

/// Untyped handle of a query registered in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryId(pub(crate) usize);

/// Typed wrapper around a [`QueryId`] matching records that carry `T`.
pub struct Query<T> {
    id: QueryId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Query<T> {
    /// Wrap an untyped query handle.
    ///
    /// The caller asserts that `id` was created for the tag of `T`.
    pub const fn from_id(id: QueryId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Return the untyped handle.
    pub const fn id(self) -> QueryId {
        self.id
    }
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Query<T> {}

impl<T> PartialEq for Query<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Query<T> {}

impl<T> core::fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Query")
            .field("id", &self.id)
            .field("payload", &core::any::type_name::<T>())
            .finish()
    }
}

/// What the store remembers about a registered query.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QueryState {
    /// Payload type the query matches.
    pub(crate) tag: TypeTag,
    /// Pool of that type, once one exists.
    pub(crate) pool: Option<PoolId>,
}

/// Lazy iterator over the records matched by a query.
///
/// Borrows the store, so the live set cannot change mid-iteration. To
/// release records while walking a query, collect the identifiers first.
#[derive(Debug, Clone)]
pub struct QueryIter<'a> {
    inner: core::iter::Copied<core::slice::Iter<'a, RecordId>>,
}

impl<'a> QueryIter<'a> {
    pub(crate) fn new(owners: &'a [RecordId]) -> Self {
        Self {
            inner: owners.iter().copied(),
        }
    }
}

impl Iterator for QueryIter<'_> {
    type Item = RecordId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for QueryIter<'_> {}
