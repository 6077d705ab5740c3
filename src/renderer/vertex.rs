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
    pub const WATER_TOP: [f32; 4] = [0.05, 0.35, 0.55, 1.0];
    pub const WATER_BOTTOM: [f32; 4] = [0.02, 0.12, 0.25, 1.0];
    pub const SAND: [f32; 4] = [0.76, 0.66, 0.45, 1.0];
    pub const AXOLOTL: [f32; 4] = [1.0, 0.6, 0.8, 1.0];
    pub const AXOLOTL_GILLS: [f32; 4] = [0.95, 0.3, 0.55, 1.0];
    pub const EYE: [f32; 4] = [0.05, 0.05, 0.08, 1.0];
    pub const MOUTH: [f32; 4] = [0.5, 0.1, 0.25, 1.0];
    pub const SHRIMP: [f32; 4] = [1.0, 0.5, 0.35, 1.0];
    pub const FISH: [f32; 4] = [0.45, 0.7, 1.0, 1.0];
    pub const TOXIN: [f32; 4] = [0.4, 0.9, 0.2, 1.0];
    pub const TOXIN_CORE: [f32; 4] = [0.15, 0.35, 0.05, 1.0];
    pub const GAME_OVER_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.12, 0.25, 1.0];
}
