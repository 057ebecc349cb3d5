//! Per-tick destruction of transient events.
//!
//! A [`DestroyEventsSystem`] is an ordered list of "destroy every event of
//! type `T`" actions, built once and run at the end of every tick after
//! consumers have had their chance to observe the tick's events. Actions
//! run in registration order; that order is the author's statement of
//! which cleanups depend on which.

use tickbus_store::{RecordStore, TypeTag};
use tracing::{debug, warn};

use crate::error::EventError;
use crate::event::{ReplicantEvent, SingletonEvent};
use crate::index::EventIndex;

/// One registered cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestroyAction {
    /// Destroy the live singleton of the tagged type.
    Singleton(TypeTag),
    /// Destroy every live replicant of the tagged type.
    Replicant(TypeTag),
}

impl DestroyAction {
    /// Return the event type this action destroys.
    pub const fn tag(self) -> TypeTag {
        match self {
            Self::Singleton(tag) | Self::Replicant(tag) => tag,
        }
    }

    /// Apply this action to `events`.
    fn apply<S: RecordStore>(self, events: &mut EventIndex<S>) -> Result<(), EventError> {
        match self {
            Self::Singleton(tag) => events.destroy_singleton_tagged(tag),
            Self::Replicant(tag) => events.destroy_replicants_tagged(tag),
        }
    }
}

/// Ordered list of event cleanups, run once per tick.
///
/// ```
/// use tickbus_events::{DestroyEventsSystem, EventIndex};
///
/// #[derive(Debug, Clone, Default)]
/// struct Hit {
///     target: u32,
/// }
///
/// tickbus_events::declare_events! {
///     replicant Hit,
/// }
///
/// # fn main() -> Result<(), tickbus_events::EventError> {
/// let mut events = EventIndex::new();
/// let cleanup = events.destroy_events_system().register_replicant::<Hit>();
///
/// events.create_replicant::<Hit>()?.target = 1;
/// cleanup.run(&mut events)?;
/// assert!(!events.has_replicants::<Hit>());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestroyEventsSystem {
    actions: Vec<DestroyAction>,
}

impl DestroyEventsSystem {
    /// Create an empty system.
    pub const fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Create an empty system with room for `capacity` actions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actions: Vec::with_capacity(capacity),
        }
    }

    /// Append "destroy the singleton of `T`".
    #[must_use]
    pub fn register_singleton<T: SingletonEvent>(mut self) -> Self {
        self.actions.push(DestroyAction::Singleton(T::tag()));
        self
    }

    /// Append "destroy every replicant of `T`".
    #[must_use]
    pub fn register_replicant<T: ReplicantEvent>(mut self) -> Self {
        self.actions.push(DestroyAction::Replicant(T::tag()));
        self
    }

    /// Registered actions, in execution order.
    pub fn actions(&self) -> &[DestroyAction] {
        &self.actions
    }

    /// Number of registered actions.
    pub const fn len(&self) -> usize {
        self.actions.len()
    }

    /// Return whether no action is registered.
    pub const fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Register the queries of every replicant action with `events` ahead
    /// of the first run, so the first tick does not pay for them.
    pub fn prepare<S: RecordStore>(&self, events: &mut EventIndex<S>) {
        for action in &self.actions {
            if let DestroyAction::Replicant(tag) = action {
                events.query_for(*tag);
            }
        }
    }

    /// Run every action against `events`, in registration order.
    ///
    /// Actions whose events are absent are no-ops. An action failing with
    /// a store error does not stop the remaining actions.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by an action, after every action
    /// has run.
    pub fn run<S: RecordStore>(&self, events: &mut EventIndex<S>) -> Result<(), EventError> {
        let mut first_error = None;
        for action in &self.actions {
            if let Err(err) = action.apply(events) {
                warn!(event = %action.tag(), error = %err, "Destroy action failed");
                first_error.get_or_insert(err);
            }
        }
        debug!(actions = self.actions.len(), "Destroy events system ran");
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tickbus_store::{RecordId, StoreError, World};

    #[derive(Debug, Clone, Default)]
    struct Damage {
        amount: u32,
    }

    #[derive(Debug, Clone, Default)]
    struct Hit {
        target: u32,
    }

    #[derive(Debug, Clone, Default)]
    struct Defeated;

    #[derive(Debug, Clone, Default)]
    struct Pause;

    crate::declare_events! {
        singleton Damage,
        singleton Pause,
        replicant Hit,
        replicant Defeated,
    }

    #[test]
    fn actions_keep_registration_order() {
        let system = DestroyEventsSystem::new()
            .register_replicant::<Hit>()
            .register_singleton::<Damage>()
            .register_replicant::<Defeated>();

        assert_eq!(
            system.actions(),
            &[
                DestroyAction::Replicant(TypeTag::of::<Hit>()),
                DestroyAction::Singleton(TypeTag::of::<Damage>()),
                DestroyAction::Replicant(TypeTag::of::<Defeated>()),
            ]
        );
        assert_eq!(system.len(), 3);
    }

    #[test]
    fn run_destroys_every_registered_type() {
        let mut events = EventIndex::new();
        events.create_singleton::<Damage>().unwrap().amount = 4;
        events.create_replicant::<Hit>().unwrap().target = 1;
        events.create_replicant::<Hit>().unwrap().target = 2;
        events.create_replicant::<Defeated>().unwrap();

        let system = events
            .destroy_events_system()
            .register_singleton::<Damage>()
            .register_replicant::<Hit>();
        system.run(&mut events).unwrap();

        assert!(!events.has_singleton::<Damage>());
        assert!(!events.has_replicants::<Hit>());
        // Not registered, so it survives.
        assert!(events.has_replicants::<Defeated>());
    }

    #[test]
    fn run_without_events_is_a_no_op() {
        let mut events = EventIndex::new();
        let system = DestroyEventsSystem::new()
            .register_singleton::<Damage>()
            .register_replicant::<Hit>();

        assert!(system.run(&mut events).is_ok());
        assert!(system.run(&mut events).is_ok());
        assert_eq!(events.store().live_records(), 0);
    }

    #[test]
    fn run_can_repeat_across_ticks() {
        let mut events = EventIndex::new();
        let system = DestroyEventsSystem::new().register_replicant::<Hit>();

        for tick in 0..3 {
            events.create_replicant::<Hit>().unwrap().target = tick;
            assert_eq!(events.replicant_count::<Hit>(), 1);
            system.run(&mut events).unwrap();
            assert_eq!(events.replicant_count::<Hit>(), 0);
        }
        assert_eq!(events.cached_query_count(), 1);
    }

    #[test]
    fn prepare_registers_replicant_queries_only() {
        let mut events = EventIndex::new();
        let system = DestroyEventsSystem::new()
            .register_singleton::<Damage>()
            .register_replicant::<Hit>();

        system.prepare(&mut events);
        assert!(events.cached_query::<Hit>().is_some());
        assert_eq!(events.cached_query_count(), 1);
    }

    #[test]
    fn failing_action_does_not_stop_later_actions() {
        let mut events = EventIndex::new();
        events.create_singleton::<Damage>().unwrap();
        events.create_replicant::<Hit>().unwrap();
        let id = events.singleton_id::<Damage>().unwrap();
        events.store_mut().release_record(id).unwrap();

        let system = DestroyEventsSystem::new()
            .register_singleton::<Damage>()
            .register_replicant::<Hit>();

        assert!(matches!(
            system.run(&mut events),
            Err(EventError::Store { .. })
        ));
        assert!(!events.has_replicants::<Hit>());
    }

    #[test]
    fn run_executes_actions_in_registration_order() {
        // Two singletons released behind the index's back: whichever action
        // runs first reports its stale record as the returned error.
        fn stale_setup() -> (EventIndex, RecordId, RecordId) {
            let mut events = EventIndex::new();
            events.create_singleton::<Damage>().unwrap();
            events.create_singleton::<Pause>().unwrap();
            events.create_replicant::<Hit>().unwrap();
            let damage = events.singleton_id::<Damage>().unwrap();
            let pause = events.singleton_id::<Pause>().unwrap();
            events.store_mut().release_record(damage).unwrap();
            events.store_mut().release_record(pause).unwrap();
            (events, damage, pause)
        }

        let (mut events, damage, _) = stale_setup();
        let err = DestroyEventsSystem::new()
            .register_singleton::<Damage>()
            .register_replicant::<Hit>()
            .register_singleton::<Pause>()
            .run(&mut events)
            .unwrap_err();
        assert_eq!(err, EventError::from(StoreError::StaleRecord(damage)));
        assert!(!events.has_replicants::<Hit>());

        let (mut events, _, pause) = stale_setup();
        let err = DestroyEventsSystem::new()
            .register_singleton::<Pause>()
            .register_replicant::<Hit>()
            .register_singleton::<Damage>()
            .run(&mut events)
            .unwrap_err();
        assert_eq!(err, EventError::from(StoreError::StaleRecord(pause)));
        assert!(!events.has_replicants::<Hit>());
    }

    #[test]
    fn run_against_borrowed_world() {
        let mut world = World::new();
        let mut events = EventIndex::with_store(&mut world);
        events.create_replicant::<Hit>().unwrap();

        DestroyEventsSystem::new()
            .register_replicant::<Hit>()
            .run(&mut events)
            .unwrap();
        drop(events);
        assert_eq!(world.live_records(), 0);
    }
}
