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

/// Colors for game elements (written as-is to a non-sRGB surface)
pub mod colors {
    /// #0095dd
    const BLUE: [f32; 4] = [0.0, 149.0 / 255.0, 221.0 / 255.0, 1.0];

    pub const BALL: [f32; 4] = BLUE;
    pub const PADDLE: [f32; 4] = BLUE;
    pub const BRICK: [f32; 4] = BLUE;
    /// #f0f0f0
    pub const BACKGROUND: [f32; 4] = [240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0, 1.0];
}
