//! Cursor-driven text output.
//!
//! [`TextEngine`] owns the cursor and handles newlines and wrapping; the
//! actual glyph drawing is delegated to a [`GlyphRenderer`] chosen when
//! the display is built: [`LocalFont`] for the compiled-in 5x7 font or
//! [`RemoteFont`] for a variable-width font streamed from a byte store.

use core::convert::Infallible;
use core::fmt::Debug;

use font::classic::{self, CELL_HEIGHT, CELL_WIDTH};
use font::FontTable;
use shared::Color;

use crate::canvas::Canvas;
use crate::error::TextError;
use crate::raster;
use crate::sink::PixelSink;
use crate::stream::{stream_glyph, ByteStore};

/// Substituted for characters that do not fit in a byte
pub const REPLACEMENT_CHAR: u8 = b'?';

/// Text position, scale, colors and wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    x: i16,
    y: i16,
    text_size: u8,
    wrap: bool,
    fg: Color,
    bg: Color,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            text_size: 1,
            wrap: true,
            fg: Color::WHITE,
            bg: Color::WHITE,
        }
    }
}

impl CursorState {
    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.x = x;
        self.y = y;
    }

    pub const fn position(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    /// Scale factor of the local font; 0 is treated as 1
    pub fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    pub const fn text_size(&self) -> u8 {
        self.text_size
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub const fn wrap(&self) -> bool {
        self.wrap
    }

    /// Foreground only; the background becomes transparent
    pub fn set_text_color(&mut self, color: Color) {
        self.fg = color;
        self.bg = color;
    }

    pub fn set_text_colors(&mut self, fg: Color, bg: Color) {
        self.fg = fg;
        self.bg = bg;
    }

    pub const fn foreground(&self) -> Color {
        self.fg
    }

    /// `None` when the background is transparent (equal to the foreground)
    pub fn background(&self) -> Option<Color> {
        (self.bg != self.fg).then_some(self.bg)
    }

    fn newline(&mut self, line_height: i16) {
        self.y = self.y.wrapping_add(line_height);
        self.x = 0;
    }
}

/// One way of putting a character on the display
pub trait GlyphRenderer {
    type Error;

    /// Vertical distance between text lines
    fn line_height(&self, cursor: &CursorState) -> i16;

    /// Draw `c` with its top-left corner at the cursor and return the
    /// horizontal advance, spacing included. Cells entirely outside the
    /// canvas are skipped but still advance.
    fn draw_glyph<S: PixelSink + ?Sized>(
        &mut self,
        sink: &mut S,
        canvas: &Canvas,
        cursor: &CursorState,
        c: u8,
    ) -> Result<i16, Self::Error>;
}

fn cell_visible(canvas: &Canvas, x: i16, y: i16, width: i32, height: i32) -> bool {
    let (x, y) = (i32::from(x), i32::from(y));
    x < i32::from(canvas.width())
        && y < i32::from(canvas.height())
        && x + width - 1 >= 0
        && y + height - 1 >= 0
}

/// The compiled-in classic font, 6x8 cells scaled by the text size
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFont;

impl GlyphRenderer for LocalFont {
    type Error = Infallible;

    fn line_height(&self, cursor: &CursorState) -> i16 {
        i16::from(cursor.text_size()) * CELL_HEIGHT
    }

    fn draw_glyph<S: PixelSink + ?Sized>(
        &mut self,
        sink: &mut S,
        canvas: &Canvas,
        cursor: &CursorState,
        c: u8,
    ) -> Result<i16, Infallible> {
        let size = i16::from(cursor.text_size());
        let advance = size * CELL_WIDTH;
        let (x, y) = cursor.position();
        if !cell_visible(canvas, x, y, i32::from(advance), i32::from(size * CELL_HEIGHT)) {
            return Ok(advance);
        }

        let glyph = classic::glyph(c);
        let fg = cursor.foreground();
        let bg = cursor.background();

        for i in 0..CELL_WIDTH {
            let mut column = glyph.get(i as usize).copied().unwrap_or(0);
            for j in 0..CELL_HEIGHT {
                let color = if column & 1 != 0 { Some(fg) } else { bg };
                if let Some(color) = color {
                    if size == 1 {
                        sink.plot(x.wrapping_add(i), y.wrapping_add(j), color);
                    } else {
                        raster::fill_rect(
                            sink,
                            x.wrapping_add(i * size),
                            y.wrapping_add(j * size),
                            size,
                            size,
                            color,
                        );
                    }
                }
                column >>= 1;
            }
        }
        Ok(advance)
    }
}

/// Variable-width font whose glyphs are streamed from `store`
#[derive(Debug)]
pub struct RemoteFont<'t, B> {
    table: FontTable<'t>,
    store: B,
}

impl<'t, B: ByteStore> RemoteFont<'t, B> {
    pub fn new(table: FontTable<'t>, store: B) -> Self {
        Self { table, store }
    }

    pub fn table(&self) -> &FontTable<'t> {
        &self.table
    }

    pub fn store_mut(&mut self) -> &mut B {
        &mut self.store
    }

    pub fn into_store(self) -> B {
        self.store
    }
}

impl<'t, B> GlyphRenderer for RemoteFont<'t, B>
where
    B: ByteStore,
    B::Error: Debug,
{
    type Error = TextError<B::Error>;

    fn line_height(&self, _cursor: &CursorState) -> i16 {
        self.table.line_height()
    }

    fn draw_glyph<S: PixelSink + ?Sized>(
        &mut self,
        sink: &mut S,
        canvas: &Canvas,
        cursor: &CursorState,
        c: u8,
    ) -> Result<i16, Self::Error> {
        let glyph = self.table.glyph(c)?;
        let advance = i16::from(glyph.width) + 1;
        let (x, y) = cursor.position();
        let height = i32::from(self.table.line_height());
        if cell_visible(canvas, x, y, i32::from(glyph.width), height) {
            stream_glyph(
                sink,
                &mut self.store,
                x,
                y,
                &glyph,
                cursor.foreground(),
                cursor.background(),
            )?;
        }
        Ok(advance)
    }
}

/// Cursor state machine feeding characters to a [`GlyphRenderer`]
#[derive(Debug)]
pub struct TextEngine<G> {
    glyphs: G,
    cursor: CursorState,
}

impl<G: GlyphRenderer> TextEngine<G> {
    pub fn new(glyphs: G) -> Self {
        Self {
            glyphs,
            cursor: CursorState::default(),
        }
    }

    pub fn with_cursor(glyphs: G, cursor: CursorState) -> Self {
        Self { glyphs, cursor }
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut CursorState {
        &mut self.cursor
    }

    pub fn glyphs(&self) -> &G {
        &self.glyphs
    }

    pub fn glyphs_mut(&mut self) -> &mut G {
        &mut self.glyphs
    }

    /// Output one character.
    ///
    /// `\n` moves to the start of the next line, `\r` is ignored, anything
    /// else is drawn at the cursor which then advances, wrapping first if
    /// the next cell would not fit.
    pub fn write_byte<S: PixelSink + ?Sized>(
        &mut self,
        sink: &mut S,
        canvas: &Canvas,
        c: u8,
    ) -> Result<(), G::Error> {
        match c {
            b'\n' => {
                let line_height = self.glyphs.line_height(&self.cursor);
                self.cursor.newline(line_height);
            }
            b'\r' => {}
            _ => {
                let advance = self.glyphs.draw_glyph(sink, canvas, &self.cursor, c)?;
                self.cursor.x = self.cursor.x.wrapping_add(advance);
                if self.cursor.wrap && self.cursor.x > canvas.width() - advance {
                    let line_height = self.glyphs.line_height(&self.cursor);
                    self.cursor.newline(line_height);
                }
            }
        }
        Ok(())
    }

    /// Output every character of `text`; characters above U+00FF are
    /// drawn as [`REPLACEMENT_CHAR`]
    pub fn write_str<S: PixelSink + ?Sized>(
        &mut self,
        sink: &mut S,
        canvas: &Canvas,
        text: &str,
    ) -> Result<(), G::Error> {
        for ch in text.chars() {
            let c = u8::try_from(ch).unwrap_or(REPLACEMENT_CHAR);
            self.write_byte(sink, canvas, c)?;
        }
        Ok(())
    }
}
