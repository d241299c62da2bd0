//! Layer spacing shared by shells and fins

/// Exponent of the spacing curve; below 1 packs layers toward the base
pub const LAYER_SPACING_EXPONENT: f32 = 0.2;

/// Normalized offset of shell `layer` in a stack of `layers`
///
/// `f(i) = i^0.2 / (L-1)^0.2`, so `f(0) = 0`, `f(L-1) = 1` and the curve is
/// strictly increasing. A single-layer stack maps to 0.
pub fn layer_fraction(layer: u32, layers: u32) -> f32 {
    debug_assert!(layer < layers.max(1), "layer {layer} out of range for {layers} layers");

    if layer == 0 || layers <= 1 {
        return 0.0;
    }
    let last = layers - 1;
    if layer >= last {
        return 1.0;
    }
    (layer as f32).powf(LAYER_SPACING_EXPONENT) / (last as f32).powf(LAYER_SPACING_EXPONENT)
}
