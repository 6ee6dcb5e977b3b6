//! The render system.
//!
//! Reads the renderer entity's camera, batch, frame buffer, and
//! post-processor chain each tick and walks its draw list. It never mutates
//! registry membership during render.
//!
//! The draw list is *not* re-queried per tick: the system doubles as an
//! entity listener on `{Position, ModelInstance}` and rebuilds the list only
//! when an entity gains or loses that pair — the canonical listener-bridge
//! consumer.

use tracing::debug;

use ecs_component::{Entity, Signature};
use ecs_registry::{EntityListener, EntityRegistry};
use ecs_system::System;

use crate::components::{Camera, FrameBuffer, ModelBatch, ModelInstance, Position, PostProcessors};

/// Draws the scene for every renderer entity.
pub struct RenderSystem {
    signature: Signature,
    renderable_interest: Signature,
    draw_list: Vec<Entity>,
    frames: u64,
}

impl RenderSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            signature: Signature::new()
                .with::<Camera>()
                .with::<ModelBatch>()
                .with::<FrameBuffer>()
                .with::<PostProcessors>(),
            renderable_interest: Signature::new().with::<Position>().with::<ModelInstance>(),
            draw_list: Vec::new(),
            frames: 0,
        }
    }

    /// The interest to register this system under as a listener.
    #[must_use]
    pub fn renderable_interest(&self) -> Signature {
        self.renderable_interest.clone()
    }

    /// Entities currently in the draw list, in notification order.
    #[must_use]
    pub fn draw_list(&self) -> &[Entity] {
        &self.draw_list
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for RenderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RenderSystem {
    fn name(&self) -> &str {
        "render"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn update(&mut self, registry: &mut EntityRegistry, _dt: f32) -> anyhow::Result<()> {
        for renderer in registry.query(&self.signature)? {
            // Reads only — the backend would consume these to draw the frame.
            let camera = registry
                .get::<Camera>(renderer)
                .ok_or_else(|| anyhow::anyhow!("renderer {renderer} lost its camera"))?;
            let chain = registry
                .get::<PostProcessors>(renderer)
                .ok_or_else(|| anyhow::anyhow!("renderer {renderer} lost its post-processors"))?;

            let effects: Vec<&str> = chain.processors.iter().map(|p| p.name()).collect();
            debug!(
                %renderer,
                eye = ?camera.position,
                draws = self.draw_list.len(),
                ?effects,
                "frame rendered"
            );
        }
        self.frames += 1;
        Ok(())
    }
}

impl EntityListener for RenderSystem {
    fn on_entity_added(&mut self, entity: Entity, _registry: &mut EntityRegistry) {
        self.draw_list.push(entity);
        debug!(%entity, draws = self.draw_list.len(), "renderable added to draw list");
    }

    fn on_entity_removed(&mut self, entity: Entity, _registry: &mut EntityRegistry) {
        self.draw_list.retain(|e| *e != entity);
        debug!(%entity, draws = self.draw_list.len(), "renderable removed from draw list");
    }
}
