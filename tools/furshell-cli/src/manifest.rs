//! Manifest parsing
//!
//! Parses furshell.toml. Relative paths are resolved against the manifest's
//! directory.

use anyhow::{Context, Result};
use furshell::params::{DEFAULT_DENSITY, DEFAULT_LAYERS, DEFAULT_MAP_SIZE, DEFAULT_MAX_LENGTH};
use furshell::{FinEdges, FurParams, GraftalParams, MergeWeighting, ShellParams, StrandParams};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Source OBJ mesh
    pub input: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output: PathBuf,
    /// Fixed RNG seed; omitted means a fresh process RNG per build
    #[serde(default)]
    pub seed: Option<u64>,
    /// Also write raw vertex/index buffers
    #[serde(default)]
    pub raw: bool,
    #[serde(default)]
    pub shells: ShellsConfig,
    #[serde(default)]
    pub strands: StrandsConfig,
    #[serde(default)]
    pub graftals: GraftalsConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ShellsConfig {
    pub layers: u32,
    pub max_length: f32,
    pub slice: bool,
    pub fins: bool,
    pub fin_edges: FinEdges,
}

impl Default for ShellsConfig {
    fn default() -> Self {
        Self {
            layers: DEFAULT_LAYERS,
            max_length: DEFAULT_MAX_LENGTH,
            slice: false,
            fins: true,
            fin_edges: FinEdges::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StrandsConfig {
    pub width: u32,
    pub height: u32,
    /// Defaults to `shells.layers`
    pub layers: Option<u32>,
    pub density: f32,
}

impl Default for StrandsConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_SIZE,
            height: DEFAULT_MAP_SIZE,
            layers: None,
            density: DEFAULT_DENSITY,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GraftalsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub max_length: Option<f32>,
    #[serde(default)]
    pub weighting: MergeWeighting,
}

impl Default for GraftalsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_length: None,
            weighting: MergeWeighting::default(),
        }
    }
}

impl Manifest {
    pub fn fur_params(&self) -> FurParams {
        let s = &self.shells;
        FurParams {
            shells: ShellParams::new(s.layers, s.max_length).with_slice(s.slice),
            fins: s.fins.then_some(s.fin_edges),
        }
    }

    pub fn strand_params(&self) -> StrandParams {
        let s = &self.strands;
        StrandParams::new(
            s.width,
            s.height,
            s.layers.unwrap_or(self.shells.layers),
            s.density,
        )
    }

    /// Graftal parameters, or `None` when graftals are disabled
    ///
    /// `max_length` falls back to the shell length.
    pub fn graftal_params(&self) -> Option<GraftalParams> {
        let g = &self.graftals;
        g.enabled.then(|| GraftalParams {
            max_length: g.max_length.unwrap_or(self.shells.max_length),
            weighting: g.weighting,
        })
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.input.is_relative() {
            self.input = base.join(&self.input);
        }
        if self.output.is_relative() {
            self.output = base.join(&self.output);
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let mut manifest = parse_manifest(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    if let Some(base) = path.parent() {
        manifest.resolve_paths(base);
    }
    Ok(manifest)
}

pub fn parse_manifest(content: &str) -> Result<Manifest> {
    Ok(toml::from_str(content)?)
}

/// Validate parameters and the input path without building
pub fn validate(manifest: &Manifest) -> Result<()> {
    if !manifest.input.exists() {
        anyhow::bail!("Input mesh not found: {:?}", manifest.input);
    }
    manifest.fur_params().validate().context("Invalid [shells] section")?;
    manifest
        .strand_params()
        .validate()
        .context("Invalid [strands] section")?;
    if let Some(graftals) = manifest.graftal_params() {
        graftals.validate().context("Invalid [graftals] section")?;
    }
    Ok(())
}
