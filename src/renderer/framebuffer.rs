//! Off-screen RGBA raster

use bytemuck::{Pod, Zeroable};

use crate::sim::{Rgb, Viewport};

/// One RGBA8 pixel
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Largest raster we allocate (8192 x 8192)
pub const MAX_PIXELS: usize = 1 << 26;

/// Row-major pixel buffer sized to a viewport. Zero-sized buffers are valid.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    /// Allocate a `width` x `height` buffer, or `None` above [`MAX_PIXELS`]
    pub fn try_new(width: u32, height: u32) -> Option<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&len| len <= MAX_PIXELS)?;
        Some(Self {
            width,
            height,
            pixels: vec![Rgba::zeroed(); len],
        })
    }

    /// Like [`FrameBuffer::try_new`], falling back to an empty buffer when too large
    pub fn new(width: u32, height: u32) -> Self {
        Self::try_new(width, height).unwrap_or_else(|| {
            log::warn!("{width}x{height} frame buffer exceeds {MAX_PIXELS} pixels, using empty buffer");
            Self {
                width: 0,
                height: 0,
                pixels: Vec::new(),
            }
        })
    }

    pub fn for_viewport(viewport: Viewport) -> Self {
        Self::new(viewport.width, viewport.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA bytes, ready for upload to a texture or surface
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color.into());
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x as i64, y as i64).map(|i| self.pixels[i])
    }

    /// Write a pixel; coordinates outside the buffer are ignored
    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}
