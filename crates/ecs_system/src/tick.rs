//! Fixed-timestep tick loop.
//!
//! The tick loop drives the scheduler:
//!
//! 1. Invoke every system in registration order.
//! 2. Contain any system fault at the tick boundary — log it, discard the
//!    rest of the faulted tick, continue with the next tick. A bad frame
//!    must not take the client down.
//! 3. Sleep off the remaining tick budget, warning on overruns.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use ecs_registry::EntityRegistry;

use crate::scheduler::Scheduler;

/// Configuration for the tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl TickConfig {
    /// Override the tick rate.
    #[must_use]
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Override the tick limit.
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

/// The tick loop state: world, scheduler, and timing configuration.
#[derive(Debug)]
pub struct TickLoop {
    config: TickConfig,
    registry: EntityRegistry,
    scheduler: Scheduler,
}

impl TickLoop {
    /// Create a tick loop over a wired world and scheduler.
    #[must_use]
    pub fn new(config: TickConfig, registry: EntityRegistry, scheduler: Scheduler) -> Self {
        Self {
            config,
            registry,
            scheduler,
        }
    }

    /// The current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.scheduler.tick_id()
    }

    /// Read access to the world.
    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Mutable access to the world (wiring, tests).
    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    /// Run one tick, containing any system fault at the tick boundary.
    ///
    /// Returns `true` if the tick completed without a fault. On a fault the
    /// remaining systems of that tick were skipped; whatever state earlier
    /// systems already mutated stays mutated.
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.scheduler.tick(&mut self.registry, dt) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    tick_id = self.scheduler.tick_id(),
                    error = %format!("{err:#}"),
                    "system fault contained at tick boundary"
                );
                false
            }
        }
    }

    /// Run the tick loop for the configured number of ticks, or indefinitely.
    pub fn run(&mut self) {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            systems = self.scheduler.system_count(),
            "starting tick loop"
        );

        loop {
            let start = Instant::now();

            self.tick(tick_duration.as_secs_f64() as f32);

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "tick loop complete");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.scheduler.tick_id(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ecs_component::Signature;

    use crate::system::System;

    use super::*;

    struct Counter {
        signature: Signature,
        ticks: Rc<RefCell<u64>>,
        fail: bool,
    }

    impl System for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn signature(&self) -> &Signature {
            &self.signature
        }

        fn update(&mut self, _registry: &mut EntityRegistry, _dt: f32) -> anyhow::Result<()> {
            *self.ticks.borrow_mut() += 1;
            if self.fail {
                anyhow::bail!("counter fault");
            }
            Ok(())
        }
    }

    fn counter_loop(fail: bool, max_ticks: u64) -> (TickLoop, Rc<RefCell<u64>>) {
        let ticks = Rc::new(RefCell::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Rc::new(RefCell::new(Counter {
            signature: Signature::new(),
            ticks: Rc::clone(&ticks),
            fail,
        })));
        let config = TickConfig::default()
            .with_tick_rate(1000.0) // fast for testing
            .with_max_ticks(max_ticks);
        (
            TickLoop::new(config, EntityRegistry::new(), scheduler),
            ticks,
        )
    }

    #[test]
    fn test_run_limited_ticks() {
        let (mut tick_loop, ticks) = counter_loop(false, 5);
        tick_loop.run();
        assert_eq!(tick_loop.tick_id(), 5);
        assert_eq!(*ticks.borrow(), 5);
    }

    #[test]
    fn test_loop_survives_faulting_system() {
        // The system faults every tick; the loop keeps going regardless.
        let (mut tick_loop, ticks) = counter_loop(true, 3);
        tick_loop.run();
        assert_eq!(tick_loop.tick_id(), 3);
        assert_eq!(*ticks.borrow(), 3);
    }

    #[test]
    fn test_tick_reports_fault() {
        let (mut tick_loop, _ticks) = counter_loop(true, 1);
        assert!(!tick_loop.tick(1.0 / 60.0));
    }
}
