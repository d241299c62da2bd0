//! Fin quads between consecutive shells
//!
//! For every triangle edge and every layer pair `(i-1, i)` a quad is
//! stretched from the edge on shell `i-1` to the same edge on shell `i`,
//! using the same spacing curve as the shell stack. Fin UVs are fixed to the
//! unit square so the fin-height map can be sampled as a cross-section
//! gradient regardless of the mesh's own UV layout.

use std::collections::HashSet;

use glam::Vec2;

use crate::layers::layer_fraction;
use crate::mesh::{FinStrip, SurfaceMesh};
use crate::params::{FinEdges, FinParams};
use crate::vertex::Vertex;

/// Build fin quads for `base`
///
/// Output is an unindexed triangle list, triangle-major then layer then
/// edge. With [`FinEdges::PerTriangle`] the strip holds
/// `(layers - 1) * triangles * 3 * 6` vertices; edges shared by two
/// triangles get two overlapping fins.
///
/// # Panics
/// Panics if `params.layers` is 0 or `params.max_length` is negative.
pub fn build_fins(base: &SurfaceMesh, params: &FinParams) -> FinStrip {
    assert!(params.layers >= 1, "fins need at least one layer");
    assert!(
        params.max_length >= 0.0,
        "negative max length {}",
        params.max_length
    );

    let layers = params.layers;
    if layers == 1 {
        return FinStrip::default();
    }

    let edges = fin_edges(base, params.edges);
    let verts = base.vertices();
    let mut vertices = Vec::with_capacity(edges.len() * (layers as usize - 1) * 6);

    for tri_edges in &edges {
        for layer in 1..layers {
            let inner = layer_fraction(layer - 1, layers);
            let outer = layer_fraction(layer, layers);
            for &(a, b) in tri_edges.iter().flatten() {
                push_quad(
                    &mut vertices,
                    &verts[a as usize],
                    &verts[b as usize],
                    params.max_length,
                    inner,
                    outer,
                );
            }
        }
    }

    tracing::debug!(
        "Built fins: {} quads over {} layer gaps",
        vertices.len() / 6,
        layers - 1
    );

    FinStrip { vertices }
}

type TriangleEdges = [Option<(u32, u32)>; 3];

/// Edges to extrude, grouped per triangle
fn fin_edges(base: &SurfaceMesh, mode: FinEdges) -> Vec<TriangleEdges> {
    let mut seen = HashSet::new();

    base.triangles()
        .map(|[v0, v1, v2]| {
            [(v0, v1), (v1, v2), (v2, v0)].map(|(a, b)| match mode {
                FinEdges::PerTriangle => Some((a, b)),
                FinEdges::Shared => seen.insert((a.min(b), a.max(b))).then_some((a, b)),
            })
        })
        .collect()
}

/// Append the two triangles of one fin quad
fn push_quad(out: &mut Vec<Vertex>, a: &Vertex, b: &Vertex, max_length: f32, inner: f32, outer: f32) {
    let corner = |v: &Vertex, fraction: f32, uv: Vec2| Vertex {
        uv,
        ..v.offset(max_length * fraction, fraction)
    };

    let a0 = corner(a, inner, Vec2::new(0.0, 0.0));
    let b0 = corner(b, inner, Vec2::new(1.0, 0.0));
    let b1 = corner(b, outer, Vec2::new(1.0, 1.0));
    let a1 = corner(a, outer, Vec2::new(0.0, 1.0));

    out.extend_from_slice(&[a0, b0, b1, a0, b1, a1]);
}
