//! # ecs_event
//!
//! Deferred mutation for the tabletop client ECS.
//!
//! Systems that want to mutate components owned by other systems do not
//! reach in directly — they enqueue an [`Event`] on the world's designated
//! event-queue entity and the [`EventSystem`] applies it when it runs. This
//! keeps producers decoupled from the components they poke (the UI button
//! that cycles the post-processor chain never touches the renderer's state
//! directly).
//!
//! This crate provides:
//!
//! - [`Event`] — a component-change request carrying a mutator closure, or a
//!   component-add request carrying a boxed value and its kind.
//! - [`EventQueue`] — the FIFO queue component, attached to exactly one
//!   designated entity.
//! - [`EventSystem`] — drains the queue once per tick and applies each event
//!   in order, isolating per-event faults.

pub mod error;
pub mod event;
pub mod process;
pub mod queue;

pub use error::EventError;
pub use event::{Event, Mutator};
pub use process::EventSystem;
pub use queue::EventQueue;
