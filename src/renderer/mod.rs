//! WebGPU rendering module
//!
//! Blocks are projected and shaded on the CPU; the GPU pipeline rasterizes
//! them against a depth buffer.

pub mod mesh;
pub mod pipeline;
pub mod vertex;

pub use mesh::{Cuboid, build_vertices};
pub use pipeline::BlockRenderer;
pub use vertex::Vertex;
