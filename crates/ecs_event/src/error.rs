//! Event-layer error types.
//!
//! Per-event faults are isolated: one bad event is logged and skipped, and
//! the drain continues with the next event.

use ecs_component::{ComponentKind, Entity};
use ecs_registry::RegistryError;

/// Errors raised while applying a single event.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// A component-change event's target was already detached (or its entity
    /// destroyed) by the time the event was processed.
    #[error("stale event target: kind {kind} on {entity}")]
    StaleTarget { entity: Entity, kind: ComponentKind },

    /// The target component exists but its value is not of the type the
    /// mutator expects. Only possible for hand-built events; the typed
    /// [`Event::change`](crate::Event::change) constructor cannot produce it.
    #[error("event target type mismatch: kind {kind} on {entity}")]
    KindMismatch { entity: Entity, kind: ComponentKind },

    /// A component-add event could not be attached.
    #[error("component-add failed: kind {kind} on {entity}")]
    Add {
        entity: Entity,
        kind: ComponentKind,
        #[source]
        source: RegistryError,
    },
}
