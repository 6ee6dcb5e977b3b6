//! Registry-layer error types.

use ecs_component::Entity;

/// Errors that can occur during registry operations.
///
/// Note what is *not* here: attaching a component of a kind the entity
/// already holds is a silent replace (observable through notification
/// semantics), and querying for a kind no entity holds returns an empty
/// result. Neither is an error.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The entity was never created, or has already been destroyed.
    #[error("entity {0} not found")]
    EntityNotFound(Entity),

    /// A registry call was made from inside a listener notification.
    ///
    /// The registry is mid-mutation while notifications fire, so both
    /// mutation and iteration are forbidden there. Defer the work to the
    /// event queue instead.
    #[error("registry accessed from inside a listener notification (entity {0})")]
    Reentrancy(Entity),
}
