//! 1-bit packed bitmaps held in local memory.
//!
//! Rows are stored top to bottom, each padded to whole bytes
//! (`ceil(width / 8)` bytes per row). Standard bitmaps put the leftmost
//! pixel in the most significant bit; XBM exports put it in the least
//! significant bit. The two orders are separate entry points and are never
//! guessed from the data.
//!
//! RAM buffers and `'static` tables linked into flash are both plain
//! slices here, so one code path serves both sources.

use shared::Color;

use crate::error::BitmapError;
use crate::sink::PixelSink;

/// Bit order of the pixels inside a packed byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Bit 7 is the leftmost pixel
    MsbFirst,
    /// Bit 0 is the leftmost pixel (XBM)
    LsbFirst,
}

impl BitOrder {
    const fn mask(self, i: usize) -> u8 {
        match self {
            BitOrder::MsbFirst => 0x80 >> (i & 7),
            BitOrder::LsbFirst => 1 << (i & 7),
        }
    }
}

/// Packed 1-bit image with its dimensions
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    data: &'a [u8],
    width: i16,
    height: i16,
}

impl<'a> Bitmap<'a> {
    /// Wrap `data` as a `width x height` bitmap.
    ///
    /// Fails if `data` holds fewer than `row_bytes(width) * height` bytes.
    /// Non-positive dimensions are accepted and draw nothing.
    pub fn new(data: &'a [u8], width: i16, height: i16) -> Result<Self, BitmapError> {
        let expected = Self::row_bytes(width) * usize::try_from(height).unwrap_or(0);
        if data.len() < expected {
            return Err(BitmapError::TooShort {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Bytes per padded row for a given pixel width
    pub fn row_bytes(width: i16) -> usize {
        usize::try_from(width).map_or(0, |w| w.div_ceil(8))
    }

    pub const fn width(&self) -> i16 {
        self.width
    }

    pub const fn height(&self) -> i16 {
        self.height
    }

    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Whether pixel `(i, j)` is set under `order`
    pub fn is_set(&self, i: usize, j: usize, order: BitOrder) -> bool {
        let index = j * Self::row_bytes(self.width) + i / 8;
        self.data
            .get(index)
            .is_some_and(|byte| byte & order.mask(i) != 0)
    }
}

/// Draw a most-significant-bit-first bitmap with its top-left at `(x, y)`.
///
/// Set bits are plotted in `fg`; clear bits in `bg`, or skipped when `bg`
/// is `None`.
pub fn draw_bitmap<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i16,
    y: i16,
    bitmap: &Bitmap<'_>,
    fg: Color,
    bg: Option<Color>,
) {
    blit(sink, x, y, bitmap, BitOrder::MsbFirst, fg, bg);
}

/// Draw an XBM (least-significant-bit-first) bitmap at `(x, y)`
pub fn draw_xbitmap<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i16,
    y: i16,
    bitmap: &Bitmap<'_>,
    fg: Color,
    bg: Option<Color>,
) {
    blit(sink, x, y, bitmap, BitOrder::LsbFirst, fg, bg);
}

fn blit<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i16,
    y: i16,
    bitmap: &Bitmap<'_>,
    order: BitOrder,
    fg: Color,
    bg: Option<Color>,
) {
    let width = usize::try_from(bitmap.width).unwrap_or(0);
    let height = usize::try_from(bitmap.height).unwrap_or(0);

    for j in 0..height {
        let py = y.wrapping_add(j as i16);
        for i in 0..width {
            let px = x.wrapping_add(i as i16);
            if bitmap.is_set(i, j, order) {
                sink.plot(px, py, fg);
            } else if let Some(bg) = bg {
                sink.plot(px, py, bg);
            }
        }
    }
}

/// Direction in which a single packed byte is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strip {
    /// Eight pixels left to right, bit 7 first
    Horizontal,
    /// Eight pixels top to bottom, bit 0 first
    Vertical,
}

/// Draw one packed byte as an 8-pixel strip starting at `(x, y)`
pub fn draw_byte<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i16,
    y: i16,
    byte: u8,
    strip: Strip,
    fg: Color,
    bg: Option<Color>,
) {
    draw_bits(sink, x, y, byte, 8, strip, fg, bg);
}

/// Like [`draw_byte`] but stops after the first `count` pixels of the
/// strip; used to drop the padding bits at the end of a bitmap row.
pub(crate) fn draw_bits<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i16,
    y: i16,
    byte: u8,
    count: usize,
    strip: Strip,
    fg: Color,
    bg: Option<Color>,
) {
    for bit in 0..count.min(8) {
        let (px, py, set) = match strip {
            Strip::Horizontal => (x.wrapping_add(bit as i16), y, byte & (0x80 >> bit) != 0),
            Strip::Vertical => (x, y.wrapping_add(bit as i16), byte & (1 << bit) != 0),
        };
        if set {
            sink.plot(px, py, fg);
        } else if let Some(bg) = bg {
            sink.plot(px, py, bg);
        }
    }
}
