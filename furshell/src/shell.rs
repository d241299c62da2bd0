//! Shell stack extrusion
//!
//! Replicates the base surface once per layer, pushing each copy along the
//! vertex normals by `max_length * f(i)` (see [`layer_fraction`]). Every
//! layer is an independent closed mesh sharing topology with layer 0.

use crate::layers::layer_fraction;
use crate::mesh::{ShellStack, SurfaceMesh};
use crate::params::ShellParams;
use crate::vertex::Vertex;

/// Build the shell stack for `base`
///
/// With one layer the result is the input surface unchanged. In slice mode
/// only vertices with a non-zero normal y component are extruded; triangles
/// touching a dropped vertex are removed from every layer so indices stay in
/// range.
///
/// # Panics
/// Panics if `params.layers` is 0 or `params.max_length` is negative.
///
/// # Example
/// ```no_run
/// use furshell::*;
/// # fn load() -> SurfaceMesh { unimplemented!() }
/// let mesh = load();
/// let stack = build_shells(&mesh, &ShellParams::new(20, 0.03));
/// assert_eq!(stack.vertices.len(), 20 * mesh.vertex_count());
/// ```
pub fn build_shells(base: &SurfaceMesh, params: &ShellParams) -> ShellStack {
    assert!(params.layers >= 1, "shell stack needs at least one layer");
    assert!(
        params.max_length >= 0.0,
        "negative max length {}",
        params.max_length
    );

    let layers = params.layers;
    if layers == 1 {
        return ShellStack {
            vertices: base.vertices().to_vec(),
            indices: base.indices().to_vec(),
            layers,
        };
    }

    let (layer_vertices, layer_indices) = if params.slice {
        slice_base(base)
    } else {
        (base.vertices().to_vec(), base.indices().to_vec())
    };

    let per_layer = layer_vertices.len();
    let mut vertices = Vec::with_capacity(per_layer * layers as usize);
    let mut indices = Vec::with_capacity(layer_indices.len() * layers as usize);

    for layer in 0..layers {
        let fraction = layer_fraction(layer, layers);
        let distance = params.max_length * fraction;
        vertices.extend(layer_vertices.iter().map(|v| v.offset(distance, fraction)));

        let index_offset = layer * per_layer as u32;
        indices.extend(layer_indices.iter().map(|&i| i + index_offset));
    }

    tracing::debug!(
        "Built shell stack: {} layers, {} vertices, {} indices",
        layers,
        vertices.len(),
        indices.len()
    );

    ShellStack {
        vertices,
        indices,
        layers,
    }
}

/// Keep vertices with a vertical normal component and remap the triangles
fn slice_base(base: &SurfaceMesh) -> (Vec<Vertex>, Vec<u32>) {
    let mut remap = vec![None; base.vertex_count()];
    let mut vertices = Vec::new();

    for (i, v) in base.vertices().iter().enumerate() {
        if v.normal.y != 0.0 {
            remap[i] = Some(vertices.len() as u32);
            vertices.push(*v);
        }
    }

    let mut indices = Vec::with_capacity(base.indices().len());
    let mut dropped = 0usize;
    for tri in base.triangles() {
        match (
            remap[tri[0] as usize],
            remap[tri[1] as usize],
            remap[tri[2] as usize],
        ) {
            (Some(a), Some(b), Some(c)) => indices.extend_from_slice(&[a, b, c]),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(
            "Slice mode dropped {} of {} vertices and {} triangles",
            base.vertex_count() - vertices.len(),
            base.vertex_count(),
            dropped
        );
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn up_triangle() -> SurfaceMesh {
        SurfaceMesh::new(
            vec![
                Vertex::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Y, Vec2::new(0.0, 0.0)),
                Vertex::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Y, Vec2::new(1.0, 0.0)),
                Vertex::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Y, Vec2::new(0.0, 1.0)),
            ],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    /// Unit quad on the ground plus one wall triangle facing +X
    fn ground_and_wall() -> SurfaceMesh {
        SurfaceMesh::new(
            vec![
                Vertex::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Y, Vec2::ZERO),
                Vertex::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Y, Vec2::ZERO),
                Vertex::new(Vec3::new(1.0, 0.0, 1.0), Vec3::Y, Vec2::ZERO),
                Vertex::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Y, Vec2::ZERO),
                Vertex::new(Vec3::new(2.0, 0.0, 0.0), Vec3::X, Vec2::ZERO),
                Vertex::new(Vec3::new(2.0, 1.0, 0.0), Vec3::X, Vec2::ZERO),
                Vertex::new(Vec3::new(2.0, 0.0, 1.0), Vec3::X, Vec2::ZERO),
            ],
            vec![0, 1, 2, 0, 2, 3, 4, 5, 6],
        )
        .unwrap()
    }

    #[test]
    fn test_single_layer_is_identity() {
        let mesh = up_triangle();
        let stack = build_shells(&mesh, &ShellParams::new(1, 0.5));
        assert_eq!(stack.vertices, mesh.vertices());
        assert_eq!(stack.indices, mesh.indices());
        assert_eq!(stack.layers, 1);
    }

    #[test]
    fn test_three_layer_triangle() {
        let mesh = up_triangle();
        let stack = build_shells(&mesh, &ShellParams::new(3, 0.3));

        assert_eq!(stack.vertices.len(), 9);
        assert_eq!(stack.indices.len(), 9);

        for (base, shell) in mesh.vertices().iter().zip(stack.layer(0)) {
            assert_eq!(shell.position, base.position);
            assert_eq!(shell.layer, 0.0);
        }
        for (base, shell) in mesh.vertices().iter().zip(stack.layer(2)) {
            assert!((shell.position - (base.position + Vec3::Y * 0.3)).length() < 1e-6);
            assert_eq!(shell.layer, 1.0);
        }
        let mid = stack.layer(1)[0];
        assert!((mid.layer - 0.5f32.powf(0.2)).abs() < 1e-6);
    }

    #[test]
    fn test_index_replication() {
        let mesh = ground_and_wall();
        let layers = 4;
        let stack = build_shells(&mesh, &ShellParams::new(layers, 0.1));

        assert_eq!(stack.vertices.len(), layers as usize * mesh.vertex_count());
        assert_eq!(stack.indices.len(), layers as usize * mesh.indices().len());

        let n = mesh.indices().len();
        let d = mesh.vertex_count() as u32;
        for layer in 0..layers as usize {
            for j in 0..n {
                assert_eq!(stack.indices[layer * n + j], mesh.indices()[j] + layer as u32 * d);
            }
        }
    }

    #[test]
    fn test_displacement_monotonic() {
        let mesh = up_triangle();
        let stack = build_shells(&mesh, &ShellParams::new(12, 1.0));
        let heights: Vec<f32> = (0..12).map(|l| stack.layer(l)[0].position.y).collect();
        for pair in heights.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_slice_mode_filters_and_remaps() {
        let mesh = ground_and_wall();
        let stack = build_shells(&mesh, &ShellParams::new(3, 0.1).with_slice(true));

        // Wall normals are horizontal, so the wall triangle goes
        assert_eq!(stack.layer_vertex_count(), 4);
        assert_eq!(stack.vertices.len(), 12);
        assert_eq!(stack.indices.len(), 3 * 6);
        assert!(stack.indices.iter().all(|&i| (i as usize) < stack.vertices.len()));
        assert_eq!(&stack.indices[6..12], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_slice_mode_keeps_everything_when_all_vertical() {
        let mesh = up_triangle();
        let plain = build_shells(&mesh, &ShellParams::new(5, 0.2));
        let sliced = build_shells(&mesh, &ShellParams::new(5, 0.2).with_slice(true));
        assert_eq!(plain.vertices, sliced.vertices);
        assert_eq!(plain.indices, sliced.indices);
    }

    #[test]
    #[should_panic(expected = "at least one layer")]
    fn test_zero_layers_panics() {
        build_shells(&up_triangle(), &ShellParams::new(0, 0.1));
    }
}
