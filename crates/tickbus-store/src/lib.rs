//! Generic record store backing the tickbus event layer.
//!
//! The store allocates opaque record identifiers, attaches typed payloads
//! to them, releases records, and answers "which records currently carry
//! payload type `T`" through live queries. It knows nothing about events;
//! the `tickbus-events` crate builds singleton and replicant semantics on
//! top of the [`RecordStore`] contract defined here.
//!
//! # Modules
//!
//! - [`record`] -- [`RecordId`] and slot allocation with generations.
//! - [`pool`] -- Per-type sparse-set payload pools.
//! - [`query`] -- Live per-type queries and their iterators.
//! - [`store`] -- The [`RecordStore`] trait and [`Payload`] bound.
//! - [`tag`] -- [`TypeTag`], the runtime identity of a payload type.
//! - [`world`] -- [`World`], the in-memory implementation.
//!
//! # Usage
//!
//! ```
//! use tickbus_store::{RecordStore, TypeTag, World};
//!
//! #[derive(Default)]
//! struct Position {
//!     x: i32,
//! }
//!
//! # fn main() -> Result<(), tickbus_store::StoreError> {
//! let mut world = World::new();
//! let query = world.query_of(TypeTag::of::<Position>());
//!
//! let id = world.allocate_record()?;
//! world.attach_payload::<Position>(id)?.x = 3;
//!
//! assert_eq!(world.query_count(query), 1);
//! assert_eq!(world.payload::<Position>(id)?.x, 3);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod pool;
pub mod query;
pub mod record;
pub mod store;
pub mod tag;
pub mod world;

pub use error::StoreError;
pub use pool::PoolId;
pub use query::{Query, QueryId, QueryIter};
pub use record::RecordId;
pub use store::{Payload, RecordStore};
pub use tag::TypeTag;
pub use world::World;
