//! Listener bridge — membership-change notifications.
//!
//! A listener declares an interest (a [`Signature`]) and is notified when an
//! entity's component set starts or stops matching it. The render system is
//! the archetypal consumer: it rebuilds its draw list when an entity gains or
//! loses its renderable component pair, instead of re-scanning the world.
//!
//! Notifications fire **synchronously inside** `attach`/`detach`/`destroy`,
//! before the call returns. The registry is not in a quiescent state during
//! the callback; any registry call made from inside one fails with
//! [`RegistryError::Reentrancy`](crate::RegistryError::Reentrancy).

use std::cell::RefCell;
use std::rc::Rc;

use ecs_component::{Entity, Signature};

use crate::registry::EntityRegistry;

/// Callback seam for component-membership changes.
///
/// One listener object may be registered under several interests; each
/// registration is an independent (signature, listener) pair and fires
/// independently.
pub trait EntityListener {
    /// The entity's component set now matches the interest it was registered
    /// under.
    fn on_entity_added(&mut self, entity: Entity, registry: &mut EntityRegistry);

    /// The entity's component set no longer matches the interest it was
    /// registered under (including via `destroy`).
    fn on_entity_removed(&mut self, entity: Entity, registry: &mut EntityRegistry);
}

/// Shared handle to a listener.
///
/// `Rc<RefCell<_>>` so the same object can also be registered as a system in
/// the scheduler (single-threaded world, no `Send` requirement on listeners).
pub type SharedListener = Rc<RefCell<dyn EntityListener>>;

/// A registered (signature, listener) pair.
pub(crate) struct Interest {
    pub(crate) signature: Signature,
    pub(crate) listener: SharedListener,
}

impl std::fmt::Debug for Interest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interest")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
