//! High-level display interface
//!
//! [`Display`] ties a [`PixelSink`] to a rotated [`Canvas`] and a
//! [`TextEngine`], and exposes every drawing operation in logical
//! (post-rotation) coordinates.

use core::fmt::{self, Debug};

use log::{debug, warn};
use shared::{Color, Rotation};

use crate::bitmap::{self, Bitmap, Strip};
use crate::canvas::Canvas;
use crate::config::DisplayConfig;
use crate::error::{Progress, StreamError};
use crate::raster;
use crate::sink::PixelSink;
use crate::stream::{self, Addressing, ByteStore, RemoteBitmap};
use crate::text::{GlyphRenderer, RemoteFont, TextEngine};

/// Main drawing context.
///
/// The glyph strategy `G` is fixed when the display is built:
/// [`LocalFont`](crate::text::LocalFont) or [`RemoteFont`].
pub struct Display<S, G> {
    sink: S,
    canvas: Canvas,
    text: TextEngine<G>,
    block_size: u8,
    addressing: Addressing,
}

impl<S: PixelSink, G: GlyphRenderer> Display<S, G> {
    pub fn new(sink: S, glyphs: G, config: DisplayConfig) -> Self {
        let canvas = Canvas::new(config.width, config.height).with_rotation(config.rotation);
        debug!(
            "display {}x{} ({:?}), font {}",
            canvas.width(),
            canvas.height(),
            canvas.rotation(),
            core::any::type_name::<G>()
        );
        Self {
            sink,
            canvas,
            text: TextEngine::with_cursor(glyphs, config.cursor()),
            block_size: config.block_size,
            addressing: config.addressing,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn width(&self) -> i16 {
        self.canvas.width()
    }

    pub fn height(&self) -> i16 {
        self.canvas.height()
    }

    pub fn rotation(&self) -> Rotation {
        self.canvas.rotation()
    }

    /// Quarter turns, masked to `0..=3`
    pub fn set_rotation(&mut self, quarter_turns: u8) {
        self.canvas.set_rotation(quarter_turns);
    }

    pub fn invert_display(&mut self, inverted: bool) {
        self.sink.invert(inverted);
    }

    // Shapes

    pub fn draw_pixel(&mut self, x: i16, y: i16, color: Color) {
        self.sink.plot(x, y, color);
    }

    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        raster::line(&mut self.sink, x0, y0, x1, y1, color);
    }

    pub fn draw_hline(&mut self, x: i16, y: i16, len: i16, color: Color) {
        self.sink.hrun(x, y, len, color);
    }

    pub fn draw_vline(&mut self, x: i16, y: i16, len: i16, color: Color) {
        self.sink.vrun(x, y, len, color);
    }

    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        raster::rect(&mut self.sink, x, y, w, h, color);
    }

    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        raster::fill_rect(&mut self.sink, x, y, w, h, color);
    }

    /// Fill the whole rotated canvas
    pub fn fill_screen(&mut self, color: Color) {
        let (w, h) = (self.width(), self.height());
        raster::fill_rect(&mut self.sink, 0, 0, w, h, color);
    }

    pub fn draw_circle(&mut self, cx: i16, cy: i16, r: i16, color: Color) {
        raster::circle(&mut self.sink, cx, cy, r, color);
    }

    pub fn fill_circle(&mut self, cx: i16, cy: i16, r: i16, color: Color) {
        raster::fill_circle(&mut self.sink, cx, cy, r, color);
    }

    pub fn draw_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: Color) {
        raster::round_rect(&mut self.sink, x, y, w, h, r, color);
    }

    pub fn fill_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: Color) {
        raster::fill_round_rect(&mut self.sink, x, y, w, h, r, color);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Color,
    ) {
        raster::triangle(&mut self.sink, x0, y0, x1, y1, x2, y2, color);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn fill_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Color,
    ) {
        raster::fill_triangle(&mut self.sink, x0, y0, x1, y1, x2, y2, color);
    }

    // Bitmaps

    /// Packed MSB-first image; `bg = None` leaves clear bits untouched
    pub fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        image: &Bitmap<'_>,
        fg: Color,
        bg: Option<Color>,
    ) {
        bitmap::draw_bitmap(&mut self.sink, x, y, image, fg, bg);
    }

    /// Packed LSB-first image, as exported in `.xbm` files
    pub fn draw_xbitmap(
        &mut self,
        x: i16,
        y: i16,
        image: &Bitmap<'_>,
        fg: Color,
        bg: Option<Color>,
    ) {
        bitmap::draw_xbitmap(&mut self.sink, x, y, image, fg, bg);
    }

    pub fn draw_byte(
        &mut self,
        x: i16,
        y: i16,
        byte: u8,
        strip: Strip,
        fg: Color,
        bg: Option<Color>,
    ) {
        bitmap::draw_byte(&mut self.sink, x, y, byte, strip, fg, bg);
    }

    /// Stream a `w`x`h` image stored at `address` on `store`.
    ///
    /// Uses the configured addressing discipline; blocks never exceed the
    /// configured block size or the store's own limit.
    #[allow(clippy::too_many_arguments)]
    pub fn stream_bitmap<B: ByteStore + ?Sized>(
        &mut self,
        store: &mut B,
        x: i16,
        y: i16,
        address: u16,
        w: i16,
        h: i16,
        fg: Color,
        bg: Option<Color>,
    ) -> Result<Progress, StreamError<B::Error>> {
        let image = RemoteBitmap::new(address, w, h).with_addressing(self.addressing);
        let mut store = BlockLimit {
            store,
            block: self.block_size,
        };
        stream::stream_bitmap(&mut self.sink, &mut store, x, y, &image, fg, bg)
            .inspect_err(|e| warn!("streamed bitmap at {:#06x} aborted: {}", address, e))
    }

    // Text

    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.text.cursor_mut().set_cursor(x, y);
    }

    pub fn cursor(&self) -> (i16, i16) {
        self.text.cursor().position()
    }

    pub fn set_text_size(&mut self, size: u8) {
        self.text.cursor_mut().set_text_size(size);
    }

    /// Transparent text in `color`
    pub fn set_text_color(&mut self, color: Color) {
        self.text.cursor_mut().set_text_color(color);
    }

    pub fn set_text_colors(&mut self, fg: Color, bg: Color) {
        self.text.cursor_mut().set_text_colors(fg, bg);
    }

    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.text.cursor_mut().set_wrap(wrap);
    }

    pub fn text(&self) -> &TextEngine<G> {
        &self.text
    }

    /// Output one character at the cursor
    pub fn write_byte(&mut self, c: u8) -> Result<(), G::Error> {
        self.text.write_byte(&mut self.sink, &self.canvas, c)
    }

    /// Output `text` at the cursor
    pub fn print(&mut self, text: &str) -> Result<(), G::Error> {
        self.text.write_str(&mut self.sink, &self.canvas, text)
    }
}

impl<'t, S, B> Display<S, RemoteFont<'t, B>>
where
    S: PixelSink,
    B: ByteStore,
{
    /// Stream an image from the store that also holds the font
    #[allow(clippy::too_many_arguments)]
    pub fn stream_stored_bitmap(
        &mut self,
        x: i16,
        y: i16,
        address: u16,
        w: i16,
        h: i16,
        fg: Color,
        bg: Option<Color>,
    ) -> Result<Progress, StreamError<B::Error>> {
        let image = RemoteBitmap::new(address, w, h).with_addressing(self.addressing);
        let mut store = BlockLimit {
            store: self.text.glyphs_mut().store_mut(),
            block: self.block_size,
        };
        stream::stream_bitmap(&mut self.sink, &mut store, x, y, &image, fg, bg)
            .inspect_err(|e| warn!("streamed bitmap at {:#06x} aborted: {}", address, e))
    }
}

impl<S, G> fmt::Write for Display<S, G>
where
    S: PixelSink,
    G: GlyphRenderer,
    G::Error: Debug,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map_err(|e| {
            warn!("text output dropped: {:?}", e);
            fmt::Error
        })
    }
}

// Caps the block size of a store at the configured transfer limit.
struct BlockLimit<'b, B: ?Sized> {
    store: &'b mut B,
    block: u8,
}

impl<B: ByteStore + ?Sized> ByteStore for BlockLimit<'_, B> {
    type Error = B::Error;

    fn block_size(&self) -> u8 {
        self.store.block_size().min(self.block)
    }

    fn seek(&mut self, address: u16) -> Result<(), Self::Error> {
        self.store.seek(address)
    }

    fn request_block(&mut self, count: u8) -> Result<(), Self::Error> {
        self.store.request_block(count)
    }

    fn read_next(&mut self) -> Option<u8> {
        self.store.read_next()
    }
}
