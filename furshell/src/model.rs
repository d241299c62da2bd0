//! Fur-enabled models and the rendering seam
//!
//! Models own their generated geometry and know which draw calls they need;
//! the actual graphics device lives behind [`RenderSink`].

use rand::Rng;

use crate::fin::build_fins;
use crate::graftal::build_graftals;
use crate::mesh::{FinStrip, ShellStack, SurfaceMesh};
use crate::params::{FurParams, GraftalParams};
use crate::shell::build_shells;
use crate::texture::StrandMaps;
use crate::vertex::{GraftalPoint, Vertex};

/// One batch of geometry for the renderer
#[derive(Debug, Clone, Copy)]
pub enum DrawCall<'a> {
    /// Indexed shell triangles, shaded with the fur map
    Shells {
        vertices: &'a [Vertex],
        indices: &'a [u32],
        maps: &'a StrandMaps,
    },
    /// Unindexed fin triangles, shaded with the fin map
    Fins {
        vertices: &'a [Vertex],
        maps: &'a StrandMaps,
    },
    /// Graftal point sprites
    Points { points: &'a [GraftalPoint] },
    /// Base surface without fur
    Surface {
        vertices: &'a [Vertex],
        indices: &'a [u32],
    },
}

/// Receives draw calls from models
pub trait RenderSink {
    fn submit(&mut self, call: DrawCall<'_>);
}

/// Anything that can emit draw calls
pub trait Drawable {
    fn draw(&self, sink: &mut dyn RenderSink, maps: &StrandMaps);
}

/// Fur geometry generated for one source mesh
#[derive(Debug, Clone)]
pub struct FurPart {
    pub surface: SurfaceMesh,
    pub shells: ShellStack,
    pub fins: Option<FinStrip>,
}

/// Model drawn as shells plus optional fins
#[derive(Debug, Clone)]
pub struct FurModel {
    parts: Vec<FurPart>,
    fur: bool,
}

impl FurModel {
    /// Generate shells (and fins, if enabled) for every mesh
    ///
    /// # Panics
    /// Panics if `params` fail [`FurParams::validate`].
    pub fn build<'a>(meshes: impl IntoIterator<Item = &'a SurfaceMesh>, params: &FurParams) -> Self {
        let fin_params = params.fin_params();
        let parts: Vec<FurPart> = meshes
            .into_iter()
            .map(|mesh| FurPart {
                surface: mesh.clone(),
                shells: build_shells(mesh, &params.shells),
                fins: fin_params.as_ref().map(|fp| build_fins(mesh, fp)),
            })
            .collect();

        tracing::debug!("Built fur model from {} meshes", parts.len());

        Self { parts, fur: true }
    }

    /// Switch between fur and plain surface drawing
    pub fn set_fur(&mut self, enabled: bool) {
        self.fur = enabled;
    }

    pub fn fur_enabled(&self) -> bool {
        self.fur
    }

    pub fn parts(&self) -> &[FurPart] {
        &self.parts
    }
}

impl Drawable for FurModel {
    fn draw(&self, sink: &mut dyn RenderSink, maps: &StrandMaps) {
        for part in &self.parts {
            if !self.fur {
                sink.submit(DrawCall::Surface {
                    vertices: part.surface.vertices(),
                    indices: part.surface.indices(),
                });
                continue;
            }

            sink.submit(DrawCall::Shells {
                vertices: &part.shells.vertices,
                indices: &part.shells.indices,
                maps,
            });
            if let Some(fins) = part.fins.as_ref().filter(|f| !f.is_empty()) {
                sink.submit(DrawCall::Fins {
                    vertices: &fins.vertices,
                    maps,
                });
            }
        }
    }
}

/// Model drawn as a merged graftal point cloud
#[derive(Debug, Clone)]
pub struct GraftalModel {
    points: Vec<GraftalPoint>,
}

impl GraftalModel {
    pub fn build<'a, R: Rng>(
        meshes: impl IntoIterator<Item = &'a SurfaceMesh>,
        params: &GraftalParams,
        rng: &mut R,
    ) -> Self {
        Self {
            points: build_graftals(meshes, params.max_length, params.weighting, rng),
        }
    }

    pub fn points(&self) -> &[GraftalPoint] {
        &self.points
    }
}

impl Drawable for GraftalModel {
    fn draw(&self, sink: &mut dyn RenderSink, _maps: &StrandMaps) {
        if !self.points.is_empty() {
            sink.submit(DrawCall::Points {
                points: &self.points,
            });
        }
    }
}
