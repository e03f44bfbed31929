//! Rendering Adapter: renderer-agnostic interface and the first-person camera.
//!
//! # Invariants
//! - Renderer cannot mutate the scene.
//! - Render output derives from scene state and view only.
//!
//! The GPU backend lives outside this workspace. [`DebugTextRenderer`]
//! implements the same trait and is what the CLI and tests consume.

mod camera;
mod renderer;

pub use camera::FlyCamera;
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
