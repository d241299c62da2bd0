//! Fur shell synthesis for real-time fur and grass rendering
//!
//! Turns a triangulated surface mesh into the buffers a shell-based fur
//! renderer needs:
//!
//! - a stack of offset mesh copies ("shells") with non-linear layer spacing,
//! - silhouette-filling fin quads along every triangle edge,
//! - two strand-density maps (fur intensity and fin height),
//! - a deduplicated graftal point cloud for point-sprite strands.
//!
//! Everything here is a pure batch transform. Nothing talks to a graphics
//! device; finished buffers are handed to a [`model::RenderSink`].
//!
//! # Example
//! ```no_run
//! use furshell::*;
//!
//! let mesh = SurfaceMesh::new(
//!     vec![
//!         Vertex::new([0.0, 0.0, 0.0].into(), glam::Vec3::Y, [0.0, 0.0].into()),
//!         Vertex::new([1.0, 0.0, 0.0].into(), glam::Vec3::Y, [1.0, 0.0].into()),
//!         Vertex::new([0.0, 0.0, 1.0].into(), glam::Vec3::Y, [0.0, 1.0].into()),
//!     ],
//!     vec![0, 1, 2],
//! )?;
//!
//! let shells = build_shells(&mesh, &ShellParams::new(20, 0.03));
//! let fins = build_fins(&mesh, &FinParams::new(20, 0.03));
//!
//! let mut rng = seeded_rng(7);
//! let maps = synthesize_strands(&StrandParams::default(), &mut rng);
//! write_png(&maps.fur, "fur.png".as_ref())?;
//! # Ok::<(), furshell::FurError>(())
//! ```

mod error;

pub mod export;
pub mod fin;
pub mod graftal;
pub mod layers;
pub mod mesh;
pub mod model;
pub mod params;
pub mod shell;
pub mod texture;
pub mod vertex;

pub use error::{FurError, FurResult};
pub use fin::build_fins;
pub use graftal::{build_graftals, merge_points, MergeWeighting, MERGE_EPSILON};
pub use layers::layer_fraction;
pub use mesh::{FinStrip, ShellStack, SurfaceMesh};
pub use model::{DrawCall, Drawable, FurModel, GraftalModel, RenderSink};
pub use params::{FinEdges, FinParams, FurParams, GraftalParams, ShellParams, StrandParams};
pub use shell::build_shells;
pub use texture::{StrandMaps, TextureBuffer, synthesize_strands, synthesize_strands_default, write_png};
pub use vertex::{GraftalPoint, Vertex};

use rand::SeedableRng;

/// Deterministic generator used when a build is given an explicit seed
pub type FurRng = rand_pcg::Pcg64;

/// Create a seeded [`FurRng`]
pub fn seeded_rng(seed: u64) -> FurRng {
    FurRng::seed_from_u64(seed)
}

/// Create a [`FurRng`] seeded from the thread-local generator
pub fn fresh_rng() -> FurRng {
    FurRng::from_rng(&mut rand::rng())
}
