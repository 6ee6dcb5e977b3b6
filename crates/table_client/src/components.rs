//! Presentation-layer components.
//!
//! These are the data the rendering/UI/input collaborators hang on entities.
//! They carry plain values only — the actual GPU objects, widget trees, and
//! input devices live in the excluded presentation backend; the core only
//! schedules and routes around them.

use ecs_component::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Scene camera parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Camera {
    /// World-space eye position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(100.0, 100.0, 400.0),
            target: Vec3::ZERO,
            near: 1.0,
            far: 1000.0,
        }
    }
}

impl Component for Camera {
    fn type_name() -> &'static str {
        "Camera"
    }
}

/// Handle to the batch renderer owned by the presentation backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelBatch {
    /// Backend batch identifier.
    pub label: String,
}

impl Component for ModelBatch {
    fn type_name() -> &'static str {
        "ModelBatch"
    }
}

/// Offscreen render target dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
}

impl Component for FrameBuffer {
    fn type_name() -> &'static str {
        "FrameBuffer"
    }
}

/// One named post-processing effect in the chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PostProcess {
    /// Quantise colours to a named palette.
    Palette { name: String },
    /// Ordered dithering with the given level count.
    Dither { levels: u32 },
    /// Downsample by the given factor.
    Pixelize { factor: u32 },
}

impl PostProcess {
    /// Short effect name for logs and assertions.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Palette { .. } => "palette",
            Self::Dither { .. } => "dither",
            Self::Pixelize { .. } => "pixelize",
        }
    }
}

/// The ordered post-processing chain applied after the scene render.
///
/// UI affordances never mutate this directly — they enqueue component-change
/// events, and the event system applies them between frames.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostProcessors {
    pub processors: Vec<PostProcess>,
}

impl Component for PostProcessors {
    fn type_name() -> &'static str {
        "PostProcessors"
    }
}

/// World-space position.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub position: Vec3,
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

/// Handle to a loaded model asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInstance {
    /// Asset path the backend resolved this instance from.
    pub model: String,
}

impl Component for ModelInstance {
    fn type_name() -> &'static str {
        "ModelInstance"
    }
}

/// A UI scene graph driven by the UI system.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Stage {
    /// Widget labels, root-first.
    pub actors: Vec<String>,
    /// Total time this stage has acted, in seconds.
    pub elapsed: f32,
}

impl Component for Stage {
    fn type_name() -> &'static str {
        "Stage"
    }
}

/// An input handler registration request.
///
/// The input system re-registers handlers with the backend every tick,
/// ordered by `priority` ascending, so the highest priority is registered
/// last and wins under the backend's last-registered-wins dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputProcessor {
    /// Dispatch priority; higher wins.
    pub priority: i32,
    /// Backend handler identifier.
    pub handler: String,
}

impl Component for InputProcessor {
    fn type_name() -> &'static str {
        "InputProcessor"
    }
}
