//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// `0xRRGGBB` to an opaque RGBA color
    pub const fn hex(rgb: u32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        ]
    }

    pub const PLAYER: [f32; 4] = hex(0x4caf50);
    pub const HAZARD_NORMAL: [f32; 4] = hex(0xf44336); // Red
    pub const HAZARD_CHASER: [f32; 4] = hex(0x00ffff); // Cyan
    pub const HAZARD_RANDOM_WALK: [f32; 4] = hex(0xff9800); // Orange
    pub const HAZARD_UNDODGEABLE: [f32; 4] = hex(0x800080); // Purple
    pub const PICKUP_SHIELD: [f32; 4] = hex(0xffd700); // Gold
    pub const PICKUP_SPEED: [f32; 4] = hex(0x00ff00);
    pub const PICKUP_GUN: [f32; 4] = hex(0xffffff);
    pub const PROJECTILE: [f32; 4] = hex(0xffffff);
    pub const TEXT: [f32; 4] = hex(0xffffff);
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
