//! Randomized strand placement

use super::TextureBuffer;
use crate::params::StrandParams;
use rand::Rng;

/// Exponent of the strand height curve
const STRAND_HEIGHT_EXPONENT: f32 = 0.7;

/// Fur intensity and fin height maps
///
/// One instance is shared by every fur-enabled model; the renderer owns it
/// and passes it by reference into each draw.
#[derive(Clone, Debug)]
pub struct StrandMaps {
    pub fur: TextureBuffer,
    pub fin: TextureBuffer,
}

/// Rows `(min_y, max_y)` bounding the fin cross-section band, `3H/8..5H/8`
pub fn fin_band(height: u32) -> (u32, u32) {
    (height * 3 / 8, height * 5 / 8)
}

/// Red value of strand `strand` in the fur map
///
/// Strands are handed out to layers in order, `strands_per_layer` at a time,
/// so intensity is `(layer / layers)^0.7` and never decreases with `strand`.
pub(crate) fn strand_intensity(strand: u32, strands_per_layer: u32, layers: u32) -> u8 {
    let layer = strand / strands_per_layer.max(1);
    let intensity = (layer as f32 / layers as f32)
        .powf(STRAND_HEIGHT_EXPONENT)
        .clamp(0.0, 1.0);
    (intensity * 255.0) as u8
}

/// Red value of the fin stripe for a strand landing on row `y`
///
/// Only rows strictly inside the band produce a stripe.
pub(crate) fn fin_gradient(y: u32, (min_y, max_y): (u32, u32)) -> Option<u8> {
    if y <= min_y || y >= max_y {
        return None;
    }
    Some(((y - min_y) * 255 / (max_y - min_y)) as u8)
}

/// Generate the fur and fin maps
///
/// Places `round(density * width * height)` strands at independently drawn
/// pixels; later strands overwrite earlier ones on collision.
///
/// # Panics
/// Panics on zero width, height or layer count.
pub fn synthesize_strands<R: Rng>(params: &StrandParams, rng: &mut R) -> StrandMaps {
    let StrandParams {
        width,
        height,
        layers,
        ..
    } = *params;
    assert!(width > 0 && height > 0, "empty strand map {width}x{height}");
    assert!(layers >= 1, "strand maps need at least one layer");

    let mut fur = TextureBuffer::new(width, height);
    let mut fin = TextureBuffer::new(width, height);

    let strands = params.strand_count();
    if strands == 0 {
        tracing::warn!("Strand density {} produced no strands", params.density);
        return StrandMaps { fur, fin };
    }

    let strands_per_layer = strands / layers;
    let band = fin_band(height);
    let mut stripes = 0u32;

    for strand in 0..strands {
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);

        let red = strand_intensity(strand, strands_per_layer, layers);
        fur.set_pixel(x, y, [red, 0, 0, 255]);

        if let Some(red) = fin_gradient(y, band) {
            fin.fill_column(x, [red, 0, 0, 255]);
            stripes += 1;
        }
    }

    tracing::debug!(
        "Synthesized {}x{} strand maps: {} strands over {} layers, {} fin stripes",
        width,
        height,
        strands,
        layers,
        stripes
    );

    StrandMaps { fur, fin }
}

/// [`synthesize_strands`] using the thread-local generator
pub fn synthesize_strands_default(params: &StrandParams) -> StrandMaps {
    synthesize_strands(params, &mut rand::rng())
}
