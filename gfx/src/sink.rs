//! The pixel-plotting capability a display driver provides

use shared::Color;

use crate::raster;

/// Destination for every pixel the drawing routines produce.
///
/// Only [`plot`](PixelSink::plot) is required. The run methods default to
/// rasterized lines and may be overridden with a direct fill; an override
/// must light exactly the pixels the default would. Coordinates are never
/// clipped before they reach the sink, so implementations reject or clamp
/// anything outside their surface.
pub trait PixelSink {
    /// Set one pixel
    fn plot(&mut self, x: i16, y: i16, color: Color);

    /// `len` pixels from `(x, y)` to the right; `len <= 0` draws nothing.
    ///
    /// A run reaching past `i16::MAX` stops there.
    fn hrun(&mut self, x: i16, y: i16, len: i16, color: Color) {
        if len > 0 {
            raster::line(self, x, y, x.saturating_add(len - 1), y, color);
        }
    }

    /// `len` pixels from `(x, y)` downwards; `len <= 0` draws nothing
    fn vrun(&mut self, x: i16, y: i16, len: i16, color: Color) {
        if len > 0 {
            raster::line(self, x, y, x, y.saturating_add(len - 1), color);
        }
    }

    /// Panel-level color inversion, for controllers that support it
    fn invert(&mut self, _inverted: bool) {}
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn plot(&mut self, x: i16, y: i16, color: Color) {
        (**self).plot(x, y, color);
    }

    fn hrun(&mut self, x: i16, y: i16, len: i16, color: Color) {
        (**self).hrun(x, y, len, color);
    }

    fn vrun(&mut self, x: i16, y: i16, len: i16, color: Color) {
        (**self).vrun(x, y, len, color);
    }

    fn invert(&mut self, inverted: bool) {
        (**self).invert(inverted);
    }
}
