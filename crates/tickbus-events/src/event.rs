//! Event kinds.
//!
//! Every event payload type declares exactly one kind through
//! [`Event::Kind`]: [`Singleton`] (at most one live instance, created with
//! upsert semantics) or [`Replicant`] (any number of live instances).
//! Because a type implements [`Event`] at most once, a type can never be
//! both; the index operations for each kind are bounded on
//! [`SingletonEvent`] or [`ReplicantEvent`] so misuse is a compile error.
//!
//! ```
//! use tickbus_events::{Event, Replicant, Singleton};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Damage {
//!     amount: u32,
//! }
//!
//! impl Event for Damage {
//!     type Kind = Singleton;
//! }
//!
//! #[derive(Debug, Clone, Default)]
//! struct Hit {
//!     target: u32,
//! }
//!
//! impl Event for Hit {
//!     type Kind = Replicant;
//! }
//! ```

use tickbus_store::{Payload, TypeTag};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Singleton {}
    impl Sealed for super::Replicant {}
}

/// Runtime label of an event kind, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKindTag {
    /// At most one live instance.
    Singleton,
    /// Zero or more live instances.
    Replicant,
}

impl core::fmt::Display for EventKindTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Replicant => f.write_str("replicant"),
        }
    }
}

/// Type-level event kind. Implemented only by [`Singleton`] and
/// [`Replicant`].
pub trait EventKind: sealed::Sealed + 'static {
    /// Runtime label of this kind.
    const TAG: EventKindTag;
}

/// Marker kind: at most one live instance per type.
#[derive(Debug)]
pub enum Singleton {}

/// Marker kind: zero or more live instances per type.
#[derive(Debug)]
pub enum Replicant {}

impl EventKind for Singleton {
    const TAG: EventKindTag = EventKindTag::Singleton;
}

impl EventKind for Replicant {
    const TAG: EventKindTag = EventKindTag::Replicant;
}

/// An event payload type.
///
/// Payloads are plain data: default-constructible so the store can
/// allocate them before the producer fills them in, and cloneable so
/// consumers can take by-value copies.
pub trait Event: Payload + Clone {
    /// Whether this event is a singleton or a replicant.
    type Kind: EventKind;

    /// Runtime tag of this event type.
    fn tag() -> TypeTag {
        TypeTag::of::<Self>()
    }

    /// Runtime label of this event's kind.
    fn kind() -> EventKindTag {
        Self::Kind::TAG
    }
}

/// An event with at most one live instance.
pub trait SingletonEvent: Event<Kind = Singleton> {}

impl<T: Event<Kind = Singleton>> SingletonEvent for T {}

/// An event with any number of live instances.
pub trait ReplicantEvent: Event<Kind = Replicant> {}

impl<T: Event<Kind = Replicant>> ReplicantEvent for T {}

/// Implement [`Event`] for a list of payload types.
///
/// ```
/// #[derive(Debug, Clone, Default)]
/// struct Damage {
///     amount: u32,
/// }
///
/// #[derive(Debug, Clone, Default)]
/// struct Hit {
///     target: u32,
/// }
///
/// tickbus_events::declare_events! {
///     singleton Damage,
///     replicant Hit,
/// }
///
/// use tickbus_events::{Event, EventKindTag};
/// assert_eq!(Damage::kind(), EventKindTag::Singleton);
/// assert_eq!(Hit::kind(), EventKindTag::Replicant);
/// ```
#[macro_export]
macro_rules! declare_events {
    (@one singleton $name:ty) => {
        impl $crate::Event for $name {
            type Kind = $crate::Singleton;
        }
    };
    (@one replicant $name:ty) => {
        impl $crate::Event for $name {
            type Kind = $crate::Replicant;
        }
    };
    ($($kind:ident $name:ty),* $(,)?) => {
        $( $crate::declare_events!(@one $kind $name); )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Damage;

    #[derive(Debug, Clone, Default)]
    struct Hit;

    crate::declare_events! {
        singleton Damage,
        replicant Hit,
    }

    fn assert_singleton<T: SingletonEvent>() {}
    fn assert_replicant<T: ReplicantEvent>() {}

    #[test]
    fn kinds_are_resolved_at_compile_time() {
        assert_singleton::<Damage>();
        assert_replicant::<Hit>();
        assert_eq!(Damage::kind(), EventKindTag::Singleton);
        assert_eq!(Hit::kind(), EventKindTag::Replicant);
    }

    #[test]
    fn tag_matches_store_tag() {
        assert_eq!(Damage::tag(), TypeTag::of::<Damage>());
        assert_ne!(Damage::tag(), Hit::tag());
    }

    #[test]
    fn kind_display() {
        assert_eq!(EventKindTag::Singleton.to_string(), "singleton");
        assert_eq!(EventKindTag::Replicant.to_string(), "replicant");
    }
}
