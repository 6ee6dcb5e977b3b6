//! Client world wiring.
//!
//! Builds the entity/system layout the client runs with:
//!
//! - a designated event-queue entity;
//! - a renderer entity carrying the camera, batch, frame buffer,
//!   post-processor chain, and a high-priority camera input processor;
//! - a stage entity with the UI widget tree and a low-priority input
//!   processor;
//! - a model entity on the table.
//!
//! System order is fixed here and is part of the contract: render, UI,
//! input, the next-button affordance, and the event system **last** — so
//! events enqueued anywhere in a tick are applied at the end of that same
//! tick, and events enqueued during the drain wait one tick.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use tracing::debug;

use ecs_component::{Entity, Signature};
use ecs_event::{Event, EventQueue, EventSystem};
use ecs_registry::EntityRegistry;
use ecs_system::{Scheduler, System};

use crate::components::{
    Camera, FrameBuffer, InputProcessor, ModelBatch, ModelInstance, Position, PostProcess,
    PostProcessors, Stage,
};
use crate::systems::{InputBackend, InputSystem, RenderSystem, UiSystem};

/// How often the demo affordance presses "NEXT", in ticks.
const NEXT_INTERVAL_TICKS: u64 = 60;

/// A fully wired world ready for the tick loop.
pub struct ClientWorld {
    pub registry: EntityRegistry,
    pub scheduler: Scheduler,
    /// The designated event-queue entity.
    pub queue_entity: Entity,
    /// The renderer entity owning the post-processor chain.
    pub renderer: Entity,
    /// Shared handle to the render system (also registered as a listener).
    pub render_system: Rc<RefCell<RenderSystem>>,
}

/// The "NEXT" button's deferred mutation: advance the post-processor chain
/// one step through {} → {palette} → {palette, dither} →
/// {palette, dither, pixelize} → {}.
#[must_use]
pub fn cycle_post_processors(renderer: Entity) -> Event {
    Event::change::<PostProcessors, _>(renderer, |chain| match chain.processors.len() {
        0 => chain.processors.push(PostProcess::Palette {
            name: "AAP-64".into(),
        }),
        1 => chain.processors.push(PostProcess::Dither { levels: 5 }),
        2 => chain.processors.push(PostProcess::Pixelize { factor: 5 }),
        _ => chain.processors.clear(),
    })
}

/// Stand-in for the UI's "NEXT" button: enqueues a cycle event at a fixed
/// tick interval instead of on click.
struct NextButton {
    signature: Signature,
    renderer: Entity,
    interval: u64,
    ticks: u64,
}

impl NextButton {
    fn new(renderer: Entity, interval: u64) -> Self {
        Self {
            signature: Signature::new().with::<EventQueue>(),
            renderer,
            interval,
            ticks: 0,
        }
    }
}

impl System for NextButton {
    fn name(&self) -> &str {
        "next_button"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn update(&mut self, registry: &mut EntityRegistry, _dt: f32) -> anyhow::Result<()> {
        self.ticks += 1;
        if self.ticks % self.interval != 0 {
            return Ok(());
        }

        let renderer = self.renderer;
        if let Some(&owner) = registry.query(&self.signature)?.first()
            && let Some(queue) = registry.get_mut::<EventQueue>(owner)
        {
            queue.enqueue(cycle_post_processors(renderer));
            debug!(tick = self.ticks, "next pressed, cycle event enqueued");
        }
        Ok(())
    }
}

/// Build the client world over the given input backend.
pub fn build(backend: Box<dyn InputBackend>) -> anyhow::Result<ClientWorld> {
    let mut registry = EntityRegistry::new();

    // Designated event-queue entity.
    let queue_entity = registry.create()?;
    registry.attach(queue_entity, EventQueue::new())?;

    // The render system listens for renderables gaining/losing their pair.
    let render_system = Rc::new(RefCell::new(RenderSystem::new()));
    let interest = render_system.borrow().renderable_interest();
    registry.add_listener(interest, render_system.clone())?;

    // Renderer entity.
    let renderer = registry.create()?;
    registry.attach(renderer, Camera::default())?;
    registry.attach(
        renderer,
        ModelBatch {
            label: "scene".into(),
        },
    )?;
    registry.attach(
        renderer,
        FrameBuffer {
            width: 1280,
            height: 720,
        },
    )?;
    registry.attach(renderer, PostProcessors::default())?;
    registry.attach(
        renderer,
        InputProcessor {
            priority: 2,
            handler: "camera".into(),
        },
    )?;

    // Stage entity with the UI tree.
    let stage = registry.create()?;
    registry.attach(
        stage,
        Stage {
            actors: vec!["next-button".into()],
            elapsed: 0.0,
        },
    )?;
    registry.attach(
        stage,
        InputProcessor {
            priority: 0,
            handler: "stage".into(),
        },
    )?;

    // A model on the table.
    let model = registry.create()?;
    registry.attach(
        model,
        Position {
            position: Vec3::ZERO,
        },
    )?;
    registry.attach(
        model,
        ModelInstance {
            model: "untitled.obj".into(),
        },
    )?;

    // Fixed system order; the event system goes last.
    let mut scheduler = Scheduler::new();
    scheduler.add_system(render_system.clone());
    scheduler.add_system(Rc::new(RefCell::new(UiSystem::new())));
    scheduler.add_system(Rc::new(RefCell::new(InputSystem::new(backend))));
    scheduler.add_system(Rc::new(RefCell::new(NextButton::new(
        renderer,
        NEXT_INTERVAL_TICKS,
    ))));
    scheduler.add_system(Rc::new(RefCell::new(EventSystem::new())));

    Ok(ClientWorld {
        registry,
        scheduler,
        queue_entity,
        renderer,
        render_system,
    })
}
