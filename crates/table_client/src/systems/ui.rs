//! The UI system.
//!
//! Drives every stage's own update clock, independent of where the render
//! system sits in the schedule.

use tracing::trace;

use ecs_component::Signature;
use ecs_registry::EntityRegistry;
use ecs_system::System;

use crate::components::Stage;

/// Advances stage widget trees once per tick.
pub struct UiSystem {
    signature: Signature,
}

impl UiSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            signature: Signature::new().with::<Stage>(),
        }
    }
}

impl Default for UiSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for UiSystem {
    fn name(&self) -> &str {
        "ui"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn update(&mut self, registry: &mut EntityRegistry, dt: f32) -> anyhow::Result<()> {
        for entity in registry.query(&self.signature)? {
            if let Some(stage) = registry.get_mut::<Stage>(entity) {
                stage.elapsed += dt;
                trace!(%entity, elapsed = stage.elapsed, actors = stage.actors.len(), "stage acted");
            }
        }
        Ok(())
    }
}
