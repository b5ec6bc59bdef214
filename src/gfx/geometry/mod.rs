//! # Procedural Geometry Generation
//!
//! Bodies share a single unit UV sphere that the host uploads once. This
//! module produces its vertex data, both indexed and expanded into a flat
//! triangle list for backends that draw without an index buffer.
//!
//! ## Usage
//!
//! ```rust
//! use orrery::gfx::geometry::{generate_sphere, DEFAULT_SECTORS, DEFAULT_STACKS};
//!
//! let sphere = generate_sphere(DEFAULT_SECTORS, DEFAULT_STACKS);
//! let vertices = sphere.expanded();
//! assert_eq!(vertices.len(), sphere.triangle_count() * 3);
//! ```

pub mod primitives;

pub use primitives::*;

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex layout for upload: position, normal, uv
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaved vertex for index `i`. Missing attributes read as zero.
    pub fn vertex(&self, i: usize) -> MeshVertex {
        MeshVertex {
            position: self.vertices[i],
            normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            uv: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
        }
    }

    /// Resolve the index buffer into a flat triangle list
    pub fn expanded(&self) -> Vec<MeshVertex> {
        self.indices
            .iter()
            .map(|&index| self.vertex(index as usize))
            .collect()
    }

    /// Expanded vertices as raw bytes for buffer upload
    pub fn expanded_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.expanded()).to_vec()
    }
}
