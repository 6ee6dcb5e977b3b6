//! # table_client
//!
//! The tabletop game client binary. Wires the demo world (renderer, stage,
//! model, event queue) over the ECS core and drives it with the fixed-
//! timestep tick loop.
//!
//! ## Configuration
//!
//! - `TABLE_TICK_RATE` — target ticks per second (default 60).
//! - `TABLE_MAX_TICKS` — stop after this many ticks (default: run forever).
//! - `RUST_LOG` — tracing filter, e.g. `table_client=debug`.

mod components;
mod systems;
mod world;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ecs_system::{TickConfig, TickLoop};

use crate::systems::input::LoggingBackend;
use crate::world::ClientWorld;

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("table_client=info".parse()?))
        .init();

    info!("table client starting");

    let mut config = TickConfig::default();
    if let Ok(rate) = std::env::var("TABLE_TICK_RATE") {
        config = config.with_tick_rate(rate.parse()?);
    }
    if let Ok(max) = std::env::var("TABLE_MAX_TICKS") {
        config = config.with_max_ticks(max.parse()?);
    }

    let ClientWorld {
        registry,
        scheduler,
        ..
    } = world::build(Box::new(LoggingBackend))?;

    let mut tick_loop = TickLoop::new(config, registry, scheduler);
    tick_loop.run();

    info!("table client shut down");
    Ok(())
}
