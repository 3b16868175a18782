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
    /// #303952
    pub const BACKGROUND: [f32; 4] = [0.188, 0.224, 0.322, 1.0];
    pub const ROAD_MARKING: [f32; 4] = [1.0, 1.0, 1.0, 0.7];
    pub const PLAYER_BODY: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
    pub const PLAYER_CABIN: [f32; 4] = [0.1, 0.3, 0.55, 1.0];
    pub const ONCOMING_BODY: [f32; 4] = [0.95, 0.3, 0.25, 1.0];
    pub const ONCOMING_CABIN: [f32; 4] = [0.55, 0.12, 0.1, 1.0];
    pub const WHEEL: [f32; 4] = [0.08, 0.08, 0.1, 1.0];
}
