use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{IntoStorage, Rgb565, raw::RawU16},
    primitives::Rectangle,
};

use crate::{
    FrameBuffer,
    sink::{DisplaySink, Rect},
};

/// Feeds rasterizer output to any RGB565 `embedded-graphics` draw target.
#[derive(Debug)]
pub struct DrawTargetSink<D> {
    target: D,
}

impl<D> DrawTargetSink<D> {
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn release(self) -> D {
        self.target
    }
}

impl<D> DisplaySink for DrawTargetSink<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn write(&mut self, area: Rect, pixels: &[u16]) -> Result<(), Self::Error> {
        let window = Rectangle::new(
            Point::new(area.x0 as i32, area.y0 as i32),
            Size::new(area.width(), area.height()),
        );
        let colors = pixels.iter().map(|&raw| Rgb565::from(RawU16::new(raw)));
        self.target.fill_contiguous(&window, colors)
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> DrawTarget for FrameBuffer<WIDTH, HEIGHT> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }

            let _ = self.set_pixel(point.x as usize, point.y as usize, color.into_storage());
        }

        Ok(())
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> OriginDimensions for FrameBuffer<WIDTH, HEIGHT> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_reach_the_draw_target() {
        let mut sink = DrawTargetSink::new(FrameBuffer::<4, 2>::new());
        let area = Rect::new(1, 0, 2, 2).unwrap();

        sink.write(area, &[0xF800, 0x07E0, 0x001F, 0xFFFF]).unwrap();

        let fb = sink.release();
        assert_eq!(fb.row(0).unwrap(), &[0, 0xF800, 0x07E0, 0]);
        assert_eq!(fb.row(1).unwrap(), &[0, 0x001F, 0xFFFF, 0]);
    }
}
