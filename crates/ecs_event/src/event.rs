//! The [`Event`] type — a small, kind-tagged deferred mutation request.
//!
//! Events are owned by the queue from enqueue until processed, then
//! discarded: at-most-once execution. The mutator is a boxed `FnOnce` so it
//! can move captured state into the component it targets.

use std::any::Any;

use ecs_component::{BoxedComponent, Component, ComponentKind, Entity};

/// A deferred mutation applied to a live component value.
///
/// Returns `true` if the target downcast succeeded and the mutation ran.
pub type Mutator = Box<dyn FnOnce(&mut (dyn Any + Send)) -> bool + Send>;

/// A deferred mutation request.
///
/// Events target components by (entity, kind) rather than holding a
/// reference to the value — by the time an event is processed its target may
/// have been detached, and that must degrade to a logged skip, not a dangling
/// pointer.
pub enum Event {
    /// Invoke a mutator on the current value of the target component.
    ComponentChange {
        entity: Entity,
        kind: ComponentKind,
        mutator: Mutator,
    },
    /// Attach the carried component to the target entity
    /// (replace-on-conflict, like a direct `attach`).
    ComponentAdd {
        entity: Entity,
        kind: ComponentKind,
        component: BoxedComponent,
    },
}

impl Event {
    /// Build a component-change event with a typed mutator.
    ///
    /// The mutator is invoked with the live component value when the event
    /// is processed; it may inspect and replace any sub-state it owns.
    pub fn change<T, F>(entity: Entity, mutate: F) -> Self
    where
        T: Component,
        F: FnOnce(&mut T) + Send + 'static,
    {
        Self::ComponentChange {
            entity,
            kind: T::kind(),
            mutator: Box::new(move |value| match value.downcast_mut::<T>() {
                Some(value) => {
                    mutate(value);
                    true
                }
                None => false,
            }),
        }
    }

    /// Build a component-add event carrying a new component value.
    pub fn add<T: Component>(entity: Entity, component: T) -> Self {
        Self::ComponentAdd {
            entity,
            kind: T::kind(),
            component: Box::new(component),
        }
    }

    /// The entity this event targets.
    #[must_use]
    pub fn entity(&self) -> Entity {
        match self {
            Self::ComponentChange { entity, .. } | Self::ComponentAdd { entity, .. } => *entity,
        }
    }

    /// The component kind this event targets.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::ComponentChange { kind, .. } | Self::ComponentAdd { kind, .. } => *kind,
        }
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ComponentChange { entity, kind, .. } => f
                .debug_struct("ComponentChange")
                .field("entity", entity)
                .field("kind", kind)
                .finish_non_exhaustive(),
            Self::ComponentAdd { entity, kind, .. } => f
                .debug_struct("ComponentAdd")
                .field("entity", entity)
                .field("kind", kind)
                .finish_non_exhaustive(),
        }
    }
}
