//! Vertex layouts shared with the rendering side

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Surface vertex (36 bytes)
///
/// `layer` is the normalized shell index: 0 on the base surface, 1 on the
/// outermost shell. Loaders produce layer-0 vertices; every other layer is
/// derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub layer: f32,
}

const _: () = assert!(std::mem::size_of::<Vertex>() == 36);

impl Vertex {
    /// Create a base-surface vertex (layer 0)
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            uv,
            layer: 0.0,
        }
    }

    /// Copy of this vertex pushed `distance` along its normal
    #[inline]
    pub(crate) fn offset(&self, distance: f32, layer: f32) -> Self {
        Self {
            position: self.position + self.normal * distance,
            layer,
            ..*self
        }
    }
}

/// Graftal point for point-sprite strands (40 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GraftalPoint {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    /// Strand length in `[0, max_length]`
    pub length: f32,
    /// Strand opacity in `[0, 1]`
    pub opacity: f32,
}

const _: () = assert!(std::mem::size_of::<GraftalPoint>() == 40);

impl GraftalPoint {
    /// Graftal point inheriting position, normal and UV from a surface vertex
    pub fn from_vertex(vertex: &Vertex, length: f32, opacity: f32) -> Self {
        Self {
            position: vertex.position,
            normal: vertex.normal,
            uv: vertex.uv,
            length,
            opacity,
        }
    }
}
