//! In-memory pixel buffer

use shared::Color;

use crate::error::FramebufferError;
use crate::sink::PixelSink;

/// A row-major RGB565 buffer borrowed from the caller.
///
/// Pixels outside the buffer are discarded. Runs are clipped and filled
/// directly instead of going through the rasterizer.
pub struct Framebuffer<'a> {
    pixels: &'a mut [Color],
    width: i16,
    height: i16,
    inverted: bool,
}

impl<'a> Framebuffer<'a> {
    /// Wrap `pixels`, which must hold exactly `width * height` entries
    pub fn new(pixels: &'a mut [Color], width: i16, height: i16) -> Result<Self, FramebufferError> {
        if width <= 0 || height <= 0 {
            return Err(FramebufferError::InvalidSize { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(FramebufferError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            pixels,
            width,
            height,
            inverted: false,
        })
    }

    pub const fn width(&self) -> i16 {
        self.width
    }

    pub const fn height(&self) -> i16 {
        self.height
    }

    /// Whether the panel would currently show inverted colors
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn pixels(&self) -> &[Color] {
        self.pixels
    }

    /// Stored color at `(x, y)`, `None` outside the buffer
    pub fn get(&self, x: i16, y: i16) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Fill the whole buffer
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    // Clip the span [start, start + len) to [0, limit).
    fn clip(start: i16, len: i16, limit: i16) -> Option<(i16, i16)> {
        let end = (i32::from(start) + i32::from(len)).min(i32::from(limit));
        let start = i32::from(start).max(0);
        (start < end).then(|| (start as i16, end as i16))
    }
}

impl PixelSink for Framebuffer<'_> {
    fn plot(&mut self, x: i16, y: i16, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn hrun(&mut self, x: i16, y: i16, len: i16, color: Color) {
        if y < 0 || y >= self.height {
            return;
        }
        if let Some((start, end)) = Self::clip(x, len, self.width) {
            let row = y as usize * self.width as usize;
            self.pixels[row + start as usize..row + end as usize].fill(color);
        }
    }

    fn vrun(&mut self, x: i16, y: i16, len: i16, color: Color) {
        if x < 0 || x >= self.width {
            return;
        }
        if let Some((start, end)) = Self::clip(y, len, self.height) {
            let stride = self.width as usize;
            for row in start..end {
                self.pixels[row as usize * stride + x as usize] = color;
            }
        }
    }

    fn invert(&mut self, inverted: bool) {
        self.inverted = inverted;
    }
}
