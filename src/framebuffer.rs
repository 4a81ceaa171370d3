//! In-memory RGB565 framebuffer.

use crate::sink::{DisplaySink, Rect};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameBufferError {
    /// Window extends past the buffer.
    OutOfBounds,
    /// Pixel count does not match the window size.
    LengthMismatch,
}

/// RGB565 framebuffer, row-major. Accepts rasterizer writes like a panel
/// would, which makes it the sink of choice for host-side previews.
#[derive(Clone)]
pub struct FrameBuffer<const WIDTH: usize, const HEIGHT: usize> {
    pixels: [[u16; WIDTH]; HEIGHT],
}

impl<const WIDTH: usize, const HEIGHT: usize> Default for FrameBuffer<WIDTH, HEIGHT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> FrameBuffer<WIDTH, HEIGHT> {
    /// Creates a buffer filled with `0x0000`.
    pub const fn new() -> Self {
        Self {
            pixels: [[0u16; WIDTH]; HEIGHT],
        }
    }

    pub fn clear(&mut self, color: u16) {
        for row in &mut self.pixels {
            row.fill(color);
        }
    }

    /// Sets one pixel.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u16) -> bool {
        match self.pixels.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(px) => {
                *px = color;
                true
            }
            None => false,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u16> {
        self.pixels.get(y)?.get(x).copied()
    }

    pub fn row(&self, y: usize) -> Option<&[u16; WIDTH]> {
        self.pixels.get(y)
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> DisplaySink for FrameBuffer<WIDTH, HEIGHT> {
    type Error = FrameBufferError;

    fn write(&mut self, area: Rect, pixels: &[u16]) -> Result<(), Self::Error> {
        let (x0, y0) = (area.x0 as usize, area.y0 as usize);
        let (x1, y1) = (area.x1 as usize, area.y1 as usize);
        if x0 > x1 || y0 > y1 || x1 >= WIDTH || y1 >= HEIGHT {
            return Err(FrameBufferError::OutOfBounds);
        }
        if pixels.len() != area.pixel_count() {
            return Err(FrameBufferError::LengthMismatch);
        }

        let width = x1 - x0 + 1;
        for (row, src) in self.pixels[y0..=y1].iter_mut().zip(pixels.chunks_exact(width)) {
            row[x0..=x1].copy_from_slice(src);
        }

        Ok(())
    }
}
