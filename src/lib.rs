//! Block Dodge - A dodge-the-falling-blocks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, behaviors, collisions, abilities)
//! - `renderer`: Scene building and WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input mapping)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Gap between the player's bottom edge and the field bottom at spawn
    pub const PLAYER_START_MARGIN: f32 = 20.0;

    /// Projectile drawing radius
    pub const PROJECTILE_RADIUS: f32 = 3.0;
}

/// Unit heading from `from` toward `to`.
///
/// Uses the atan2 angle rather than normalizing so that coincident points
/// still produce a defined (rightward) heading.
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos(), angle.sin())
}
