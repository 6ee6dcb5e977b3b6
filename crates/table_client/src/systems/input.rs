//! The input system.
//!
//! Each tick, re-registers every [`InputProcessor`] with the external input
//! backend, ordered by priority ascending. The backend dispatches to the
//! last-registered handler first, so the highest priority wins.

use tracing::trace;

use ecs_component::Signature;
use ecs_registry::EntityRegistry;
use ecs_system::System;

use crate::components::InputProcessor;

/// Seam to the external input backend.
///
/// The real backend owns the OS event loop; the core only tells it which
/// handlers exist and in what order.
pub trait InputBackend {
    /// Drop all registered handlers.
    fn clear(&mut self);

    /// Register a handler. Later registrations win dispatch.
    fn register(&mut self, handler: &str);
}

/// A backend that only logs registrations; used when running headless.
#[derive(Debug, Default)]
pub struct LoggingBackend;

impl InputBackend for LoggingBackend {
    fn clear(&mut self) {}

    fn register(&mut self, handler: &str) {
        trace!(handler, "input handler registered");
    }
}

/// Keeps the backend's handler registrations in sync with the world.
pub struct InputSystem {
    signature: Signature,
    backend: Box<dyn InputBackend>,
}

impl InputSystem {
    #[must_use]
    pub fn new(backend: Box<dyn InputBackend>) -> Self {
        Self {
            signature: Signature::new().with::<InputProcessor>(),
            backend,
        }
    }
}

impl System for InputSystem {
    fn name(&self) -> &str {
        "input"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn update(&mut self, registry: &mut EntityRegistry, _dt: f32) -> anyhow::Result<()> {
        let mut processors: Vec<(i32, String)> = Vec::new();
        for entity in registry.query(&self.signature)? {
            if let Some(p) = registry.get::<InputProcessor>(entity) {
                processors.push((p.priority, p.handler.clone()));
            }
        }

        // Ascending priority; stable, so equal priorities keep query order.
        processors.sort_by_key(|(priority, _)| *priority);

        self.backend.clear();
        for (_, handler) in &processors {
            self.backend.register(handler);
        }
        Ok(())
    }
}
