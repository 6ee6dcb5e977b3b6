//! # ecs_component
//!
//! The "E" and "C" of the ECS — defines what an entity and a component are
//! and how components are stored.
//!
//! This crate provides:
//!
//! - [`Entity`] — lightweight `u64` entity identifiers.
//! - [`EntityAllocator`] — monotonically increasing ID allocator.
//! - [`Component`] trait and [`ComponentKind`] — the contract all ECS data
//!   must satisfy, with a stable name-derived kind tag.
//! - [`ComponentStore`] — per-entity kind-to-value storage.
//! - [`Signature`] — the set of component kinds a system or listener requires.

pub mod component;
pub mod entity;
pub mod signature;
pub mod store;

pub use component::{BoxedComponent, Component, ComponentKind};
pub use entity::{Entity, EntityAllocator};
pub use signature::Signature;
pub use store::{ComponentSet, ComponentStore};
