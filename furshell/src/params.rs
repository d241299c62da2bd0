//! Build parameters
//!
//! All parameter structs deserialize from TOML/JSON with defaults taken from
//! the reference fur setup (20 layers, 0.03 strand length, 512x512 maps at
//! 0.8 density). Call `validate` on anything that came from user input;
//! builders assume valid parameters.

use crate::error::{FurError, FurResult};
use crate::graftal::MergeWeighting;
use serde::Deserialize;

pub const DEFAULT_LAYERS: u32 = 20;
pub const DEFAULT_MAX_LENGTH: f32 = 0.03;
pub const DEFAULT_MAP_SIZE: u32 = 512;
pub const DEFAULT_DENSITY: f32 = 0.8;

fn validate_layers(layers: u32) -> FurResult<()> {
    if layers == 0 {
        return Err(FurError::InvalidLayerCount(layers));
    }
    Ok(())
}

fn validate_length(length: f32) -> FurResult<()> {
    if !length.is_finite() || length < 0.0 {
        return Err(FurError::NegativeLength(length));
    }
    Ok(())
}

/// Shell stack extrusion parameters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShellParams {
    /// Number of layers including the base surface
    pub layers: u32,
    /// Offset of the outermost shell along the vertex normal
    pub max_length: f32,
    /// Only extrude vertices whose normal has a vertical component
    pub slice: bool,
}

impl Default for ShellParams {
    fn default() -> Self {
        Self {
            layers: DEFAULT_LAYERS,
            max_length: DEFAULT_MAX_LENGTH,
            slice: false,
        }
    }
}

impl ShellParams {
    pub fn new(layers: u32, max_length: f32) -> Self {
        Self {
            layers,
            max_length,
            slice: false,
        }
    }

    /// Enable or disable slice mode
    pub fn with_slice(mut self, slice: bool) -> Self {
        self.slice = slice;
        self
    }

    pub fn validate(&self) -> FurResult<()> {
        validate_layers(self.layers)?;
        validate_length(self.max_length)
    }
}

/// Which triangle edges receive fin quads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinEdges {
    /// Every edge of every triangle; shared edges get two overlapping fins
    #[default]
    PerTriangle,
    /// Each undirected edge once, keyed by its vertex indices
    Shared,
}

/// Fin quad parameters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FinParams {
    pub layers: u32,
    pub max_length: f32,
    pub edges: FinEdges,
}

impl Default for FinParams {
    fn default() -> Self {
        Self::new(DEFAULT_LAYERS, DEFAULT_MAX_LENGTH)
    }
}

impl FinParams {
    pub fn new(layers: u32, max_length: f32) -> Self {
        Self {
            layers,
            max_length,
            edges: FinEdges::PerTriangle,
        }
    }

    pub fn with_edges(mut self, edges: FinEdges) -> Self {
        self.edges = edges;
        self
    }

    pub fn validate(&self) -> FurResult<()> {
        validate_layers(self.layers)?;
        validate_length(self.max_length)
    }
}

/// Strand density map parameters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StrandParams {
    pub width: u32,
    pub height: u32,
    pub layers: u32,
    /// Fraction of pixels that receive a strand
    pub density: f32,
}

impl Default for StrandParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_SIZE,
            height: DEFAULT_MAP_SIZE,
            layers: DEFAULT_LAYERS,
            density: DEFAULT_DENSITY,
        }
    }
}

impl StrandParams {
    pub fn new(width: u32, height: u32, layers: u32, density: f32) -> Self {
        Self {
            width,
            height,
            layers,
            density,
        }
    }

    /// Total strand count, `round(density * width * height)`
    pub fn strand_count(&self) -> u32 {
        (self.density as f64 * self.width as f64 * self.height as f64).round() as u32
    }

    pub fn validate(&self) -> FurResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FurError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        validate_layers(self.layers)?;
        if !(0.0..=1.0).contains(&self.density) {
            return Err(FurError::InvalidDensity(self.density));
        }
        Ok(())
    }
}

/// Graftal point cloud parameters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraftalParams {
    pub max_length: f32,
    pub weighting: MergeWeighting,
}

impl Default for GraftalParams {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            weighting: MergeWeighting::Pairwise,
        }
    }
}

impl GraftalParams {
    pub fn validate(&self) -> FurResult<()> {
        validate_length(self.max_length)
    }
}

/// Parameters of a complete fur model: shells plus optional fins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FurParams {
    pub shells: ShellParams,
    /// `None` disables fin generation
    pub fins: Option<FinEdges>,
}

impl Default for FurParams {
    fn default() -> Self {
        Self {
            shells: ShellParams::default(),
            fins: None,
        }
    }
}

impl FurParams {
    /// Fin parameters matching the shell spacing, if fins are enabled
    pub fn fin_params(&self) -> Option<FinParams> {
        self.fins.map(|edges| {
            FinParams::new(self.shells.layers, self.shells.max_length).with_edges(edges)
        })
    }

    pub fn validate(&self) -> FurResult<()> {
        self.shells.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(ShellParams::default().validate().is_ok());
        assert!(FinParams::default().validate().is_ok());
        assert!(StrandParams::default().validate().is_ok());
        assert!(GraftalParams::default().validate().is_ok());
    }

    #[test]
    fn test_shell_validation() {
        assert!(matches!(
            ShellParams::new(0, 0.1).validate(),
            Err(FurError::InvalidLayerCount(0))
        ));
        assert!(matches!(
            ShellParams::new(4, -0.1).validate(),
            Err(FurError::NegativeLength(_))
        ));
        assert!(ShellParams::new(1, 0.0).validate().is_ok());
    }

    #[test]
    fn test_strand_validation() {
        assert!(matches!(
            StrandParams::new(0, 4, 1, 0.5).validate(),
            Err(FurError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(matches!(
            StrandParams::new(4, 4, 1, 1.5).validate(),
            Err(FurError::InvalidDensity(_))
        ));
        assert!(StrandParams::new(4, 4, 1, 0.0).validate().is_ok());
    }

    #[test]
    fn test_strand_count_rounds() {
        assert_eq!(StrandParams::new(4, 4, 1, 1.0).strand_count(), 16);
        assert_eq!(StrandParams::new(10, 10, 1, 0.125).strand_count(), 13);
        assert_eq!(StrandParams::new(10, 10, 1, 0.0).strand_count(), 0);
    }

    #[test]
    fn test_fin_params_follow_shells() {
        let params = FurParams {
            shells: ShellParams::new(8, 0.5),
            fins: Some(FinEdges::Shared),
        };
        let fins = params.fin_params().unwrap();
        assert_eq!(fins.layers, 8);
        assert_eq!(fins.max_length, 0.5);
        assert_eq!(fins.edges, FinEdges::Shared);
        assert!(FurParams::default().fin_params().is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let shells: ShellParams = toml::from_str("layers = 8\nslice = true").unwrap();
        assert_eq!(shells.layers, 8);
        assert!(shells.slice);
        assert_eq!(shells.max_length, DEFAULT_MAX_LENGTH);

        let fins: FinParams = toml::from_str("edges = \"shared\"").unwrap();
        assert_eq!(fins.edges, FinEdges::Shared);

        let graftals: GraftalParams = toml::from_str("weighting = \"running-mean\"").unwrap();
        assert_eq!(graftals.weighting, MergeWeighting::RunningMean);
    }
}
