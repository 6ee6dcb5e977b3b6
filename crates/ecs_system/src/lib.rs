//! # ecs_system
//!
//! System runtime for the tabletop client ECS.
//!
//! This crate provides:
//!
//! - [`System`] — the per-tick logic trait every system implements.
//! - [`Scheduler`] — the fixed, ordered system list invoked once per tick.
//! - [`TickLoop`] and [`TickConfig`] — the fixed-timestep driver with
//!   tick-boundary fault containment.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use ecs_component::Signature;
//! use ecs_registry::EntityRegistry;
//! use ecs_system::{Scheduler, System, TickConfig, TickLoop};
//!
//! struct Heartbeat {
//!     signature: Signature,
//! }
//!
//! impl System for Heartbeat {
//!     fn name(&self) -> &str { "heartbeat" }
//!     fn signature(&self) -> &Signature { &self.signature }
//!     fn update(&mut self, _registry: &mut EntityRegistry, _dt: f32) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.add_system(Rc::new(RefCell::new(Heartbeat { signature: Signature::new() })));
//! let mut tick_loop = TickLoop::new(TickConfig::default(), EntityRegistry::new(), scheduler);
//! tick_loop.run();
//! ```

pub mod scheduler;
pub mod system;
pub mod tick;

pub use scheduler::Scheduler;
pub use system::{SharedSystem, System};
pub use tick::{TickConfig, TickLoop};
