//! # ecs_registry
//!
//! The entity registry — owns entity identities and their component sets,
//! and notifies listeners when an entity's component membership changes.
//!
//! This crate provides:
//!
//! - [`EntityRegistry`] — create/destroy entities, attach/detach components,
//!   signature queries in deterministic insertion order.
//! - [`EntityListener`] — the observer seam fired synchronously inside
//!   `attach`/`detach` when an entity starts or stops matching an interest.
//! - [`RegistryError`] — the registry's failure taxonomy.

pub mod error;
pub mod listener;
pub mod registry;

pub use error::RegistryError;
pub use listener::{EntityListener, SharedListener};
pub use registry::EntityRegistry;
