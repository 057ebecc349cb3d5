//! Arena combat: the tick systems that produce and consume events.
//!
//! Every tick runs the same pipeline against one [`EventIndex`]:
//!
//! 1. [`AttackSystem`] -- every fighter still standing hits a random
//!    opponent, publishing one [`Hit`] replicant per attack and upserting
//!    the tick's [`DamageDealt`] singleton.
//! 2. [`HealthSystem`] -- applies every [`Hit`] to the arena and publishes
//!    a [`Defeated`] replicant for each fighter that drops to zero.
//! 3. [`ChronicleSystem`] -- folds the tick's events into [`CombatStats`].
//! 4. [`DestroyEventsSystem`] -- destroys every event type above so the
//!    next tick starts clean.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tickbus_events::{DestroyEventsSystem, EventIndex, declare_events};
use tickbus_store::World;
use tracing::{debug, info, trace};

use crate::config::ArenaConfig;
use crate::error::EngineError;

// -----------------------------------------------------------------------
// Events
// -----------------------------------------------------------------------

/// One fighter's attack on another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hit {
    /// Fighter dealing the hit.
    pub attacker: usize,
    /// Fighter receiving the hit.
    pub target: usize,
    /// Health removed from the target.
    pub amount: u32,
}

/// Damage dealt across the whole tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamageDealt {
    /// Sum of every hit's amount.
    pub total: u32,
    /// Number of hits.
    pub hits: u32,
}

/// A fighter's health reached zero this tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defeated {
    /// The fallen fighter.
    pub fighter: usize,
}

declare_events! {
    replicant Hit,
    singleton DamageDealt,
    replicant Defeated,
}

/// Build the end-of-tick cleanup for every combat event type, sized from
/// the index's configuration.
pub fn cleanup_system(events: &EventIndex<World>) -> DestroyEventsSystem {
    events
        .destroy_events_system()
        .register_replicant::<Hit>()
        .register_singleton::<DamageDealt>()
        .register_replicant::<Defeated>()
}

// -----------------------------------------------------------------------
// Arena state
// -----------------------------------------------------------------------

/// Running totals across the whole simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatStats {
    /// Hits landed.
    pub hits: u64,
    /// Damage dealt.
    pub total_damage: u64,
    /// `(tick, fighter)` for every defeat, in the order observed.
    pub defeated: Vec<(u64, usize)>,
}

/// Fighters and their remaining health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    health: Vec<u32>,
    stats: CombatStats,
}

impl Arena {
    /// Create an arena with every fighter at full health.
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            health: vec![config.max_health; config.fighters],
            stats: CombatStats::default(),
        }
    }

    /// Fighters with health left, in ascending order.
    pub fn alive(&self) -> Vec<usize> {
        self.health
            .iter()
            .enumerate()
            .filter(|(_, health)| **health > 0)
            .map(|(fighter, _)| fighter)
            .collect()
    }

    /// Number of fighters with health left.
    pub fn alive_count(&self) -> usize {
        self.health.iter().filter(|health| **health > 0).count()
    }

    /// Remaining health of `fighter`, if it exists.
    pub fn health(&self, fighter: usize) -> Option<u32> {
        self.health.get(fighter).copied()
    }

    /// Running totals.
    pub const fn stats(&self) -> &CombatStats {
        &self.stats
    }

    /// Remove `amount` health from `fighter`.
    ///
    /// Returns `Some(true)` when this hit defeated the fighter,
    /// `Some(false)` otherwise, and `None` for an unknown fighter.
    pub fn apply_damage(&mut self, fighter: usize, amount: u32) -> Option<bool> {
        let health = self.health.get_mut(fighter)?;
        if *health == 0 {
            return Some(false);
        }
        *health = health.saturating_sub(amount);
        Some(*health == 0)
    }
}

// -----------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------

/// One stage of the tick pipeline.
pub trait TickSystem {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Run this stage for `tick`.
    fn run(
        &mut self,
        tick: u64,
        arena: &mut Arena,
        events: &mut EventIndex<World>,
    ) -> Result<(), EngineError>;
}

/// Producer: every standing fighter attacks a random standing opponent.
#[derive(Debug)]
pub struct AttackSystem {
    rng: StdRng,
    max_hit: u32,
}

impl AttackSystem {
    /// Create a producer with a deterministic roll sequence.
    pub fn new(seed: u64, max_hit: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_hit: max_hit.max(1),
        }
    }
}

impl TickSystem for AttackSystem {
    fn name(&self) -> &'static str {
        "attack"
    }

    fn run(
        &mut self,
        tick: u64,
        arena: &mut Arena,
        events: &mut EventIndex<World>,
    ) -> Result<(), EngineError> {
        let alive = arena.alive();
        for &attacker in &alive {
            let opponents: Vec<usize> = alive
                .iter()
                .copied()
                .filter(|fighter| *fighter != attacker)
                .collect();
            if opponents.is_empty() {
                break;
            }
            let pick = self.rng.random_range(0..opponents.len());
            let Some(&target) = opponents.get(pick) else {
                continue;
            };
            let amount = self.rng.random_range(1..=self.max_hit);

            *events.create_replicant::<Hit>()? = Hit {
                attacker,
                target,
                amount,
            };
            let dealt = events.create_singleton::<DamageDealt>()?;
            dealt.total = dealt.total.saturating_add(amount);
            dealt.hits = dealt.hits.saturating_add(1);
            trace!(
                tick,
                attacker,
                target,
                amount,
                target_health = ?arena.health(target),
                "Hit"
            );
        }
        Ok(())
    }
}

/// Consumer: applies the tick's hits and announces defeats.
#[derive(Debug, Default)]
pub struct HealthSystem;

impl TickSystem for HealthSystem {
    fn name(&self) -> &'static str {
        "health"
    }

    fn run(
        &mut self,
        tick: u64,
        arena: &mut Arena,
        events: &mut EventIndex<World>,
    ) -> Result<(), EngineError> {
        let mut fallen = Vec::new();
        let (query, hits) = events.query_replicants::<Hit>();
        for (_, hit) in hits.iter(query) {
            match arena.apply_damage(hit.target, hit.amount) {
                Some(true) => fallen.push(hit.target),
                Some(false) => {}
                None => {
                    return Err(EngineError::System {
                        system: self.name(),
                        tick,
                        message: format!("hit targets unknown fighter {}", hit.target),
                    });
                }
            }
        }

        for fighter in fallen {
            events.create_replicant::<Defeated>()?.fighter = fighter;
            info!(tick, fighter, "Fighter defeated");
        }
        Ok(())
    }
}

/// Consumer: folds the tick's damage and defeats into [`CombatStats`].
#[derive(Debug, Default)]
pub struct ChronicleSystem;

impl TickSystem for ChronicleSystem {
    fn name(&self) -> &'static str {
        "chronicle"
    }

    fn run(
        &mut self,
        tick: u64,
        arena: &mut Arena,
        events: &mut EventIndex<World>,
    ) -> Result<(), EngineError> {
        let stats = &mut arena.stats;
        if let Some(dealt) = events.try_get_singleton::<DamageDealt>() {
            stats.hits = stats.hits.saturating_add(u64::from(dealt.hits));
            stats.total_damage = stats.total_damage.saturating_add(u64::from(dealt.total));
            debug!(tick, hits = dealt.hits, total = dealt.total, "Damage dealt");
        }

        let (query, defeated) = events.query_replicants::<Defeated>();
        stats
            .defeated
            .extend(defeated.iter(query).map(|(_, event)| (tick, event.fighter)));
        Ok(())
    }
}

impl TickSystem for DestroyEventsSystem {
    fn name(&self) -> &'static str {
        "destroy_events"
    }

    fn run(
        &mut self,
        tick: u64,
        _arena: &mut Arena,
        events: &mut EventIndex<World>,
    ) -> Result<(), EngineError> {
        Self::run(self, events)?;
        trace!(tick, "Tick events destroyed");
        Ok(())
    }
}
