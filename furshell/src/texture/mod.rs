//! Strand density maps
//!
//! Two RGBA8 rasters drive the fur shading: the fur map marks, per texel,
//! the highest shell a strand reaches; the fin map holds vertical stripes
//! whose red channel is the cross-section gradient sampled by fin quads.
//! Both are meant for nearest-neighbor sampling.
//!
//! # Example
//! ```no_run
//! use furshell::texture::*;
//! use furshell::params::StrandParams;
//!
//! let mut rng = furshell::seeded_rng(42);
//! let maps = synthesize_strands(&StrandParams::new(256, 256, 16, 0.6), &mut rng);
//! write_png(&maps.fur, std::path::Path::new("fur.png")).unwrap();
//! write_png(&maps.fin, std::path::Path::new("fin.png")).unwrap();
//! ```

mod export;
mod strands;

pub use self::buffer::TextureBuffer;
pub use export::write_png;
pub use strands::{StrandMaps, fin_band, synthesize_strands, synthesize_strands_default};

mod buffer {
    /// RGBA texture buffer
    #[derive(Clone, Debug, PartialEq)]
    pub struct TextureBuffer {
        /// Width in pixels
        pub width: u32,
        /// Height in pixels
        pub height: u32,
        /// RGBA pixel data (4 bytes per pixel, row-major order)
        pub pixels: Vec<u8>,
    }

    impl TextureBuffer {
        /// Create a new texture buffer initialized to transparent black
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                pixels: vec![0u8; (width as usize) * (height as usize) * 4],
            }
        }

        /// Get pixel at (x, y)
        #[inline]
        pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
            let idx = self.offset(x, y);
            [
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            ]
        }

        /// Set pixel at (x, y)
        #[inline]
        pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
            let idx = self.offset(x, y);
            self.pixels[idx..idx + 4].copy_from_slice(&color);
        }

        /// Fill column `x` top to bottom with one color
        pub fn fill_column(&mut self, x: u32, color: [u8; 4]) {
            for y in 0..self.height {
                self.set_pixel(x, y, color);
            }
        }

        /// Number of pixels with non-zero alpha
        pub fn opaque_count(&self) -> usize {
            self.pixels.chunks_exact(4).filter(|p| p[3] != 0).count()
        }

        #[inline]
        fn offset(&self, x: u32, y: u32) -> usize {
            debug_assert!(x < self.width && y < self.height);
            (y as usize * self.width as usize + x as usize) * 4
        }
    }
}
