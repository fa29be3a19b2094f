//! Vertex types for the block pipeline

use bytemuck::{Pod, Zeroable};

/// Pre-projected vertex: clip-space position and shaded color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 4], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Scene colors (linear RGB)
pub mod colors {
    /// Sky blue background (#87CEEB)
    pub const SKY: [f64; 4] = [0.242, 0.617, 0.831, 1.0];
    /// Ambient light contribution
    pub const AMBIENT: f32 = 0.25;
    /// Directional light strength
    pub const SUN: f32 = 1.0;
}
