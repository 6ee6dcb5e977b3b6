//! The per-tick [`System`] trait.

use std::cell::RefCell;
use std::rc::Rc;

use ecs_component::Signature;
use ecs_registry::EntityRegistry;

/// A unit of per-tick logic.
///
/// Systems are stateless between ticks with respect to the world: they
/// re-query the registry for their signature on every update rather than
/// caching entity lists, so attach/detach performed by earlier systems in
/// the same tick is always visible.
///
/// Systems communicate two ways: direct component mutation (visible to later
/// systems the same tick) and the event queue (applied when the event system
/// runs).
///
/// An error returned from [`System::update`] is not caught by the scheduler;
/// it propagates and halts the remainder of the tick. The tick loop contains
/// it at the tick boundary.
pub trait System {
    /// Human-readable system name, used in logs and fault reports.
    fn name(&self) -> &str;

    /// The component kinds an entity must hold for this system to act on it.
    fn signature(&self) -> &Signature;

    /// Run this system's logic for one tick.
    ///
    /// # Errors
    ///
    /// Any error propagates to the scheduler, which skips the remaining
    /// systems this tick.
    fn update(&mut self, registry: &mut EntityRegistry, dt: f32) -> anyhow::Result<()>;
}

/// Shared handle to a system.
///
/// `Rc<RefCell<_>>` so the same object can also be registered as an entity
/// listener on the registry — the render system is both.
pub type SharedSystem = Rc<RefCell<dyn System>>;
