//! Typed event distribution for a tick-driven simulation.
//!
//! Subsystems publish strongly-typed event payloads during a tick and
//! other subsystems discover and consume them later in the same tick,
//! without knowing about each other. Events are records in a
//! [`RecordStore`](tickbus_store::RecordStore); this crate adds the typed
//! indexing and lifecycle on top.
//!
//! # Event kinds
//!
//! - **Singleton** -- at most one live instance per type. Creating one
//!   when it already exists returns the existing payload.
//! - **Replicant** -- any number of live instances per type, enumerated
//!   through a cached per-type query.
//!
//! # Tick lifecycle
//!
//! ```text
//! producers          consumers            end of tick
//! create_singleton   get_singleton        DestroyEventsSystem::run
//! create_replicant   query_replicants       -> destroy_singleton / destroy_replicants
//! ```
//!
//! Everything is single-threaded and synchronous: reads observe every
//! write issued earlier in the same tick. Replicants are never purged
//! implicitly; every replicant type needs a destroy action somewhere.
//!
//! # Modules
//!
//! - [`event`] -- [`Event`] trait, [`Singleton`] / [`Replicant`] kinds,
//!   and the [`declare_events!`] macro.
//! - [`index`] -- [`EventIndex`], the singleton index and query cache.
//! - [`destroy`] -- [`DestroyEventsSystem`], ordered per-tick cleanup.
//! - [`config`] -- [`EventsConfig`] capacities loaded from YAML.
//! - [`error`] -- [`EventError`].
//!
//! # Usage
//!
//! ```
//! use tickbus_events::EventIndex;
//!
//! #[derive(Debug, Clone, Default)]
//! struct Damage {
//!     amount: u32,
//! }
//!
//! #[derive(Debug, Clone, Default)]
//! struct Hit {
//!     target: u32,
//! }
//!
//! tickbus_events::declare_events! {
//!     singleton Damage,
//!     replicant Hit,
//! }
//!
//! # fn main() -> Result<(), tickbus_events::EventError> {
//! let mut events = EventIndex::new();
//! let cleanup = events
//!     .destroy_events_system()
//!     .register_singleton::<Damage>()
//!     .register_replicant::<Hit>();
//!
//! // Producer.
//! events.create_singleton::<Damage>()?.amount = 10;
//! events.create_replicant::<Hit>()?.target = 1;
//!
//! // Consumer.
//! assert_eq!(events.get_singleton::<Damage>()?.amount, 10);
//! let (query, hits) = events.query_replicants::<Hit>();
//! assert_eq!(hits.iter(query).count(), 1);
//!
//! // End of tick.
//! cleanup.run(&mut events)?;
//! assert!(!events.has_singleton::<Damage>());
//! assert!(!events.has_replicants::<Hit>());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod destroy;
pub mod error;
pub mod event;
pub mod index;

pub use config::{ConfigError, EventsConfig};
pub use destroy::{DestroyAction, DestroyEventsSystem};
pub use error::EventError;
pub use event::{Event, EventKind, EventKindTag, Replicant, ReplicantEvent, Singleton, SingletonEvent};
pub use index::{EventIndex, Payloads};
