//! Collaborator systems riding on the ECS core.
//!
//! Each of these is a thin stand-in for a presentation subsystem: it owns no
//! game rules and consumes the registry through the same query/event
//! primitives a full renderer or UI toolkit would.

pub mod input;
pub mod render;
pub mod ui;

pub use input::{InputBackend, InputSystem};
pub use render::RenderSystem;
pub use ui::UiSystem;
