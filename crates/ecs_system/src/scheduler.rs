//! System scheduler — fixed registration order, one pass per tick.
//!
//! Systems register once, before the first tick, and run strictly in
//! registration order. Order is part of the contract: the event-processing
//! system registers **last**, so events enqueued by earlier systems are
//! applied at the end of the same tick, while events enqueued during the
//! drain itself wait for the next tick.

use anyhow::Context;
use tracing::debug;

use ecs_registry::EntityRegistry;

use crate::system::SharedSystem;

/// The ordered system list.
#[derive(Default)]
pub struct Scheduler {
    systems: Vec<SharedSystem>,
    tick_id: u64,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            tick_id: 0,
        }
    }

    /// Register a system. Registration order is execution order.
    pub fn add_system(&mut self, system: SharedSystem) {
        self.systems.push(system);
    }

    /// The number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// The current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Run one tick: invoke every system in registration order.
    ///
    /// # Errors
    ///
    /// The first system fault propagates immediately; the remaining systems
    /// this tick are skipped. State already mutated stays mutated — callers
    /// contain the fault at the tick boundary.
    pub fn tick(&mut self, registry: &mut EntityRegistry, dt: f32) -> anyhow::Result<()> {
        self.tick_id += 1;
        debug!(
            tick_id = self.tick_id,
            dt,
            systems = self.systems.len(),
            "tick start"
        );

        for system in &self.systems {
            let mut system = system
                .try_borrow_mut()
                .context("system already borrowed at tick start")?;
            let name = system.name().to_string();
            system
                .update(registry, dt)
                .with_context(|| format!("system '{name}' faulted on tick {}", self.tick_id))?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("systems", &self.systems.len())
            .field("tick_id", &self.tick_id)
            .finish()
    }
}
