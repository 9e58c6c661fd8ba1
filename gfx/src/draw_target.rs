//! [`PixelSink`] adapter for `embedded-graphics` draw targets

use core::fmt::Debug;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{Point, Size};
use embedded_graphics_core::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics_core::primitives::Rectangle;
use embedded_graphics_core::Pixel;
use log::warn;
use shared::Color;

use crate::sink::PixelSink;

/// Drives any [`DrawTarget`] through a color conversion.
///
/// Target errors cannot propagate through [`PixelSink`], so they are
/// logged and the pixel is dropped. Clipping is left to the target.
pub struct DrawTargetSink<D: DrawTarget> {
    target: D,
    map: fn(Color) -> D::Color,
}

impl<D: DrawTarget> DrawTargetSink<D> {
    pub fn new(target: D, map: fn(Color) -> D::Color) -> Self {
        Self { target, map }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> DrawTargetSink<D>
where
    D: DrawTarget,
    D::Error: Debug,
{
    fn fill(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let area = Rectangle::new(
            Point::new(i32::from(x), i32::from(y)),
            Size::new(w as u32, h as u32),
        );
        if let Err(e) = self.target.fill_solid(&area, (self.map)(color)) {
            warn!("draw target rejected run: {:?}", e);
        }
    }
}

impl<D: DrawTarget<Color = Rgb565>> DrawTargetSink<D> {
    /// Color targets take the value unchanged
    pub fn rgb565(target: D) -> Self {
        Self::new(target, to_rgb565)
    }
}

impl<D: DrawTarget<Color = BinaryColor>> DrawTargetSink<D> {
    /// Monochrome targets light every non-black pixel
    pub fn binary(target: D) -> Self {
        Self::new(target, to_binary)
    }
}

fn to_rgb565(color: Color) -> Rgb565 {
    let raw = color.raw();
    Rgb565::new((raw >> 11) as u8, ((raw >> 5) & 0x3F) as u8, (raw & 0x1F) as u8)
}

fn to_binary(color: Color) -> BinaryColor {
    if color.is_on() {
        BinaryColor::On
    } else {
        BinaryColor::Off
    }
}

impl<D> PixelSink for DrawTargetSink<D>
where
    D: DrawTarget,
    D::Error: Debug,
{
    fn plot(&mut self, x: i16, y: i16, color: Color) {
        let pixel = Pixel(Point::new(i32::from(x), i32::from(y)), (self.map)(color));
        if let Err(e) = self.target.draw_iter(core::iter::once(pixel)) {
            warn!("draw target rejected pixel: {:?}", e);
        }
    }

    fn hrun(&mut self, x: i16, y: i16, len: i16, color: Color) {
        self.fill(x, y, len, 1, color);
    }

    fn vrun(&mut self, x: i16, y: i16, len: i16, color: Color) {
        self.fill(x, y, 1, len, color);
    }
}
