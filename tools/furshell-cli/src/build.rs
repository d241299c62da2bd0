//! Build orchestration
//!
//! Loads the input mesh, generates every enabled buffer and writes them into
//! the output directory through an exporting [`RenderSink`].

use anyhow::{Context, Result};
use furshell::export::{write_file, write_fins_obj, write_graftals_obj, write_raw, write_triangles_obj};
use furshell::{
    DrawCall, Drawable, FurModel, FurRng, GraftalModel, RenderSink, StrandMaps, StrandParams,
    fresh_rng, seeded_rng, synthesize_strands, write_png,
};
use std::path::{Path, PathBuf};

use crate::manifest::{self, Manifest};
use crate::obj::load_obj;

/// Writes each draw call it receives to disk
///
/// The first failure is kept and later calls are ignored.
struct ExportSink<'a> {
    dir: &'a Path,
    raw: bool,
    written: Vec<PathBuf>,
    error: Option<anyhow::Error>,
}

impl<'a> ExportSink<'a> {
    fn new(dir: &'a Path, raw: bool) -> Self {
        Self {
            dir,
            raw,
            written: Vec::new(),
            error: None,
        }
    }

    fn write(&mut self, call: DrawCall<'_>) -> Result<()> {
        match call {
            DrawCall::Shells {
                vertices, indices, ..
            } => {
                self.obj("shells.obj", |w| write_triangles_obj(w, vertices, indices))?;
                if self.raw {
                    self.raw_file("shells.vtx", vertices)?;
                    self.raw_file("shells.idx", indices)?;
                }
            }
            DrawCall::Fins { vertices, .. } => {
                self.obj("fins.obj", |w| write_fins_obj(w, vertices))?;
                if self.raw {
                    self.raw_file("fins.vtx", vertices)?;
                }
            }
            DrawCall::Points { points } => {
                self.obj("graftals.obj", |w| write_graftals_obj(w, points))?;
                if self.raw {
                    self.raw_file("graftals.vtx", points)?;
                }
            }
            DrawCall::Surface { vertices, indices } => {
                self.obj("surface.obj", |w| write_triangles_obj(w, vertices, indices))?;
            }
        }
        Ok(())
    }

    fn obj<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut std::io::BufWriter<std::fs::File>) -> std::io::Result<()>,
    {
        let path = self.dir.join(name);
        write_file(&path, f).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!("Wrote {:?}", path);
        self.written.push(path);
        Ok(())
    }

    fn raw_file<T: bytemuck::Pod>(&mut self, name: &str, data: &[T]) -> Result<()> {
        let path = self.dir.join(name);
        write_raw(&path, data).with_context(|| format!("Failed to write {:?}", path))?;
        self.written.push(path);
        Ok(())
    }

    fn finish(self) -> Result<Vec<PathBuf>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.written),
        }
    }
}

impl RenderSink for ExportSink<'_> {
    fn submit(&mut self, call: DrawCall<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write(call) {
            self.error = Some(err);
        }
    }
}

fn build_rng(seed: Option<u64>) -> FurRng {
    match seed {
        Some(seed) => seeded_rng(seed),
        None => fresh_rng(),
    }
}

/// Write the fur and fin maps into `dir`
pub fn write_strand_maps(maps: &StrandMaps, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (name, texture) in [("fur.png", &maps.fur), ("fin.png", &maps.fin)] {
        let path = dir.join(name);
        write_png(texture, &path).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!("Wrote {:?}", path);
        written.push(path);
    }
    Ok(written)
}

/// Generate strand maps only
pub fn build_strands(params: &StrandParams, seed: Option<u64>, dir: &Path) -> Result<Vec<PathBuf>> {
    params.validate().context("Invalid strand parameters")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    let maps = synthesize_strands(params, &mut build_rng(seed));
    write_strand_maps(&maps, dir)
}

/// Build everything a manifest enables
///
/// Returns the paths of all files written.
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<Vec<PathBuf>> {
    manifest::validate(manifest)?;

    let output_dir = output_override.unwrap_or(&manifest.output);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let mesh = load_obj(&manifest.input)?;
    tracing::info!(
        "Loaded {:?}: {} vertices, {} triangles",
        manifest.input,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    let mut rng = build_rng(manifest.seed);
    let maps = synthesize_strands(&manifest.strand_params(), &mut rng);

    let mut sink = ExportSink::new(output_dir, manifest.raw);

    let fur = FurModel::build([&mesh], &manifest.fur_params());
    fur.draw(&mut sink, &maps);

    if let Some(params) = manifest.graftal_params() {
        let graftals = GraftalModel::build([&mesh], &params, &mut rng);
        tracing::info!("Graftals: {} points", graftals.points().len());
        graftals.draw(&mut sink, &maps);
    }

    let mut written = sink.finish()?;
    written.extend(write_strand_maps(&maps, output_dir)?);
    Ok(written)
}
