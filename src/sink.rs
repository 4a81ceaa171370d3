//! Display-facing side of the pipeline.

/// Inclusive pixel window, the way display controllers address column and
/// page ranges.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rect {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Rect {
    /// Window of `width x height` pixels with its top-left corner at
    /// `(x, y)`. Returns `None` for an empty window or one that does not fit
    /// the `u16` coordinate space.
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        Some(Self {
            x0: x,
            y0: y,
            x1: x.checked_add(width - 1)?,
            y1: y.checked_add(height - 1)?,
        })
    }

    pub fn width(&self) -> u32 {
        (self.x1 as u32 + 1).saturating_sub(self.x0 as u32)
    }

    pub fn height(&self) -> u32 {
        (self.y1 as u32 + 1).saturating_sub(self.y0 as u32)
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// Pixel transport the rasterizer streams glyphs into.
///
/// `pixels` holds `area.pixel_count()` RGB565 values in row-major order.
/// The call is expected to complete the transfer before returning.
pub trait DisplaySink {
    type Error;

    fn write(&mut self, area: Rect, pixels: &[u16]) -> Result<(), Self::Error>;
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    type Error = S::Error;

    fn write(&mut self, area: Rect, pixels: &[u16]) -> Result<(), Self::Error> {
        (**self).write(area, pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_bounds_are_inclusive() {
        let r = Rect::new(10, 20, 8, 16).unwrap();
        assert_eq!(r, Rect { x0: 10, y0: 20, x1: 17, y1: 35 });
        assert_eq!(r.width(), 8);
        assert_eq!(r.height(), 16);
        assert_eq!(r.pixel_count(), 128);
    }

    #[test]
    fn empty_or_overflowing_rect_is_rejected() {
        assert_eq!(Rect::new(0, 0, 0, 16), None);
        assert_eq!(Rect::new(u16::MAX, 0, 2, 1), None);
        assert!(Rect::new(u16::MAX, u16::MAX, 1, 1).is_some());
    }
}
