//! Rendering module
//!
//! `scene` turns simulation state into draw commands; `shapes` turns the
//! rectangle and circle commands into triangles for the WebGPU pipeline.
//! Text commands are left to the platform HUD.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCommand, TextSlot, build_scene};
