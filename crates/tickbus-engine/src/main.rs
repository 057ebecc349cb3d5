//! Tick driver binary for the tickbus event layer.
//!
//! Runs a small arena combat simulation on top of [`tickbus_events`]:
//! producer systems publish events during a tick, consumer systems read
//! them later in the same tick, and a destroy events system clears them
//! at the end of every tick.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `tickbus-config.yaml` (or `TICKBUS_CONFIG`)
//! 3. Assemble the arena, event index and system pipeline
//! 4. Run the tick loop
//! 5. Log the result

mod combat;
mod config;
mod error;
mod runner;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::runner::Simulation;

/// Application entry point for the tick driver.
///
/// # Errors
///
/// Returns an error if configuration loading or a tick system fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("tickbus-engine starting");

    // 2. Load configuration.
    let path = config::config_path();
    let config = config::load_from(&path).map_err(EngineError::from)?;
    info!(
        path = %path.display(),
        capacity_events = config.events.capacity_events,
        capacity_singletons = config.events.capacity_singletons,
        max_ticks = config.ticks.max_ticks,
        tick_interval_ms = config.ticks.tick_interval_ms,
        seed = config.ticks.seed,
        "Configuration loaded"
    );

    // 3. Assemble the simulation.
    let mut sim = Simulation::new(&config);
    info!(
        fighters = sim.arena().alive_count(),
        max_health = config.arena.max_health,
        cached_queries = sim.events().cached_query_count(),
        "Arena assembled, entering tick loop"
    );

    // 4. Run the tick loop.
    let summary = runner::run_simulation(&mut sim, config.ticks).await?;

    // 5. Log results.
    runner::log_run_end(&summary);
    info!(
        end_reason = ?summary.end_reason,
        total_ticks = summary.total_ticks,
        "tickbus-engine shutdown complete"
    );

    Ok(())
}
