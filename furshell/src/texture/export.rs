//! PNG export for texture buffers

use super::TextureBuffer;
use crate::error::FurResult;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a TextureBuffer to an RGBA8 PNG file
pub fn write_png(texture: &TextureBuffer, path: &Path) -> FurResult<()> {
    let file = File::create(path)?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, texture.width, texture.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&texture.pixels)?;

    Ok(())
}
