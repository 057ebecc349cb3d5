//! Bounded tick loop.
//!
//! [`run_simulation`] drives a [`Simulation`] tick by tick until either
//! the tick limit is hit or at most one fighter is left standing. Every
//! tick runs the full system pipeline, ending with the event cleanup, so
//! no event outlives the tick that produced it.

use tickbus_events::EventIndex;
use tickbus_store::World;
use tracing::{info, warn};

use crate::combat::{
    self, Arena, AttackSystem, ChronicleSystem, CombatStats, HealthSystem, TickSystem,
};
use crate::config::{EngineConfig, TickConfig};
use crate::error::EngineError;

/// Why the tick loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured tick limit was reached.
    MaxTicksReached,
    /// At most one fighter is left standing.
    ArenaSettled,
}

/// What happened in a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Fighters still standing after the tick.
    pub alive: usize,
    /// Records left in the store after cleanup.
    pub live_records: usize,
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Why the loop stopped.
    pub end_reason: EndReason,
    /// Number of ticks executed.
    pub total_ticks: u64,
    /// Fighters still standing.
    pub survivors: Vec<usize>,
    /// Totals gathered across the run.
    pub stats: CombatStats,
}

/// Arena, event index and the ordered system pipeline.
pub struct Simulation {
    arena: Arena,
    events: EventIndex<World>,
    systems: Vec<Box<dyn TickSystem>>,
}

impl Simulation {
    /// Assemble the arena and pipeline from `config`.
    ///
    /// The cleanup system's queries are registered up front so the first
    /// tick does not create them.
    pub fn new(config: &EngineConfig) -> Self {
        let mut events = EventIndex::from_config(&config.events);
        let cleanup = combat::cleanup_system(&events);
        cleanup.prepare(&mut events);

        let systems: Vec<Box<dyn TickSystem>> = vec![
            Box::new(AttackSystem::new(config.ticks.seed, config.arena.max_hit)),
            Box::new(HealthSystem),
            Box::new(ChronicleSystem),
            Box::new(cleanup),
        ];

        Self {
            arena: Arena::new(config.arena),
            events,
            systems,
        }
    }

    /// The arena.
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The event index shared by every system.
    pub const fn events(&self) -> &EventIndex<World> {
        &self.events
    }

    /// Run every system once, in pipeline order.
    ///
    /// # Errors
    ///
    /// Returns the first system error; later systems do not run.
    pub fn run_tick(&mut self, tick: u64) -> Result<TickSummary, EngineError> {
        for system in &mut self.systems {
            system.run(tick, &mut self.arena, &mut self.events)?;
        }
        let summary = TickSummary {
            tick,
            alive: self.arena.alive_count(),
            live_records: self.events.store().live_records(),
        };
        if summary.live_records > 0 {
            warn!(
                tick,
                live_records = summary.live_records,
                "Records survived the end of the tick"
            );
        }
        Ok(summary)
    }

    fn finish(&self, end_reason: EndReason, total_ticks: u64) -> RunSummary {
        RunSummary {
            end_reason,
            total_ticks,
            survivors: self.arena.alive(),
            stats: self.arena.stats().clone(),
        }
    }
}

/// Run the tick loop until a termination condition is met.
///
/// A `max_ticks` of zero means no tick limit. The loop sleeps for
/// `tick_interval_ms` between ticks when it is non-zero.
///
/// # Errors
///
/// Returns [`EngineError`] if a tick system fails.
pub async fn run_simulation(
    sim: &mut Simulation,
    ticks: TickConfig,
) -> Result<RunSummary, EngineError> {
    info!(
        max_ticks = ticks.max_ticks,
        tick_interval_ms = ticks.tick_interval_ms,
        fighters = sim.arena.alive_count(),
        "Simulation starting"
    );

    if sim.arena.alive_count() <= 1 {
        return Ok(sim.finish(EndReason::ArenaSettled, 0));
    }

    let mut total_ticks: u64 = 0;
    loop {
        let tick = total_ticks.saturating_add(1);
        let summary = sim.run_tick(tick)?;
        total_ticks = tick;

        if summary.alive <= 1 {
            info!(tick = summary.tick, alive = summary.alive, "Arena settled");
            return Ok(sim.finish(EndReason::ArenaSettled, total_ticks));
        }

        if ticks.max_ticks > 0 && total_ticks >= ticks.max_ticks {
            info!(
                tick = summary.tick,
                max_ticks = ticks.max_ticks,
                "Tick limit reached"
            );
            return Ok(sim.finish(EndReason::MaxTicksReached, total_ticks));
        }

        if ticks.tick_interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(ticks.tick_interval_ms)).await;
        }
    }
}

/// Log the end of a run.
pub fn log_run_end(summary: &RunSummary) {
    info!(
        reason = ?summary.end_reason,
        total_ticks = summary.total_ticks,
        survivors = ?summary.survivors,
        hits = summary.stats.hits,
        total_damage = summary.stats.total_damage,
        defeated = summary.stats.defeated.len(),
        "Simulation ended"
    );
    if summary.total_ticks == 0 {
        warn!("Simulation ended with no ticks executed");
    }
}
