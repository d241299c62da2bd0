//! Mesh containers
//!
//! [`SurfaceMesh`] is the validated input; [`ShellStack`] and [`FinStrip`]
//! are the owned outputs of the shell and fin builders.

use crate::error::{FurError, FurResult};
use crate::vertex::Vertex;

/// Validated triangle mesh at layer 0
///
/// Vertex and index data are only reachable through read-only accessors, so
/// builders and the graftal merger can share one mesh without being able to
/// mutate it.
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Create a mesh, checking that it is non-empty and every triangle is in range
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> FurResult<Self> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(FurError::EmptyMesh);
        }
        if indices.len() % 3 != 0 {
            return Err(FurError::IndexCountNotTriangles(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(FurError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        Ok(Self { vertices, indices })
    }

    /// Base vertices
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangle indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Iterate triangles as vertex index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Extruded multi-layer mesh, drawn as one indexed triangle list
#[derive(Debug, Clone, Default)]
pub struct ShellStack {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Number of layers, including the base surface
    pub layers: u32,
}

impl ShellStack {
    /// Vertices per layer
    pub fn layer_vertex_count(&self) -> usize {
        if self.layers == 0 {
            0
        } else {
            self.vertices.len() / self.layers as usize
        }
    }

    /// Vertex slice of one layer
    ///
    /// # Panics
    /// Panics if `layer >= self.layers`.
    pub fn layer(&self, layer: u32) -> &[Vertex] {
        assert!(layer < self.layers, "layer {layer} out of range");
        let n = self.layer_vertex_count();
        let start = layer as usize * n;
        &self.vertices[start..start + n]
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Fin quads as an unindexed triangle list (6 vertices per quad)
#[derive(Debug, Clone, Default)]
pub struct FinStrip {
    pub vertices: Vec<Vertex>,
}

impl FinStrip {
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
