//! Bitmaps and glyphs streamed from a paged remote byte store.
//!
//! The store is read sequentially in blocks of at most `B` bytes (the
//! transfer limit of the bus). A [`StreamCursor`] walks the payload,
//! re-requesting a block whenever the previous one is used up, and the
//! decoders turn each byte into pixels as soon as it arrives, so nothing
//! beyond the byte in hand is buffered locally.
//!
//! Two addressing disciplines are supported:
//!
//! - [`Addressing::Aligned`]: the start address must be a multiple of `B`
//!   and every request is a whole block.
//! - [`Addressing::Unaligned`]: the first request only reaches the next
//!   block boundary (`B - address % B` bytes); later requests are whole
//!   blocks. With an aligned address both behave the same.

use core::fmt::Debug;

use font::RemoteGlyph;
use log::{debug, trace, warn};
use shared::Color;

use crate::bitmap::{draw_bits, draw_byte, Bitmap, Strip};
use crate::error::{Progress, StreamError};
use crate::sink::PixelSink;

/// Transfer block of the on-board EEPROM bus
pub const DEFAULT_BLOCK_SIZE: u8 = 16;

/// A byte-addressable remote memory read in blocks.
///
/// `seek` sets the read address; `request_block` asks the device for up
/// to `count` sequential bytes, which `read_next` then hands out one at a
/// time. `read_next` blocks until a byte is available and returns `None`
/// only when the requested data will never arrive.
pub trait ByteStore {
    type Error: Debug;

    /// Largest number of bytes one request may return
    fn block_size(&self) -> u8 {
        DEFAULT_BLOCK_SIZE
    }

    fn seek(&mut self, address: u16) -> Result<(), Self::Error>;

    fn request_block(&mut self, count: u8) -> Result<(), Self::Error>;

    fn read_next(&mut self) -> Option<u8>;
}

impl<B: ByteStore + ?Sized> ByteStore for &mut B {
    type Error = B::Error;

    fn block_size(&self) -> u8 {
        (**self).block_size()
    }

    fn seek(&mut self, address: u16) -> Result<(), Self::Error> {
        (**self).seek(address)
    }

    fn request_block(&mut self, count: u8) -> Result<(), Self::Error> {
        (**self).request_block(count)
    }

    fn read_next(&mut self) -> Option<u8> {
        (**self).read_next()
    }
}

/// Where the first read of a stream may start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Addressing {
    /// Start address must sit on a block boundary
    Aligned,
    /// Any start address; the first request stops at the next boundary
    #[default]
    Unaligned,
}

/// Size of the requests after the first one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSizing {
    /// Always a whole block, even if fewer bytes are still needed
    Full,
    /// `min(block, bytes still needed)`
    Trimmed,
}

/// Lifecycle of a [`StreamCursor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPhase {
    NotStarted,
    /// Bytes of the current block are still pending
    Streaming,
    /// Current block exhausted, payload not finished
    RequestingBlock,
    /// Whole payload consumed
    Done,
}

/// Read position within one streamed payload
#[derive(Debug, Clone)]
pub struct StreamCursor {
    address: u16,
    expected: u16,
    remaining: u16,
    block_remaining: u8,
    block_size: u8,
    addressing: Addressing,
    sizing: BlockSizing,
    started: bool,
}

impl StreamCursor {
    pub fn new(
        address: u16,
        len: u16,
        block_size: u8,
        addressing: Addressing,
        sizing: BlockSizing,
    ) -> Self {
        Self {
            address,
            expected: len,
            remaining: len,
            block_remaining: 0,
            block_size,
            addressing,
            sizing,
            started: false,
        }
    }

    pub fn phase(&self) -> CursorPhase {
        if !self.started {
            CursorPhase::NotStarted
        } else if self.remaining == 0 {
            CursorPhase::Done
        } else if self.block_remaining == 0 {
            CursorPhase::RequestingBlock
        } else {
            CursorPhase::Streaming
        }
    }

    /// Address of the next byte to be read
    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn consumed(&self) -> u16 {
        self.expected - self.remaining
    }

    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Bytes of the current block not yet read
    pub fn block_remaining(&self) -> u8 {
        self.block_remaining
    }

    /// Seek the store and issue the first block request
    pub fn start<B: ByteStore + ?Sized>(
        &mut self,
        store: &mut B,
    ) -> Result<(), StreamError<B::Error>> {
        if self.block_size == 0 {
            return Err(StreamError::ZeroBlockSize);
        }

        let offset = (self.address % u16::from(self.block_size)) as u8;
        let first = match self.addressing {
            Addressing::Aligned if offset != 0 => {
                return Err(StreamError::Misaligned {
                    address: self.address,
                    block: self.block_size,
                })
            }
            Addressing::Aligned => self.block_size,
            Addressing::Unaligned => self.block_size - offset,
        };

        debug!(
            "stream start: {} bytes at {:#06x} ({:?}, block {})",
            self.expected, self.address, self.addressing, self.block_size
        );
        store.seek(self.address).map_err(StreamError::Device)?;
        self.started = true;

        if self.remaining == 0 {
            return Ok(());
        }
        let first = match self.sizing {
            BlockSizing::Full => first,
            BlockSizing::Trimmed => self.trim(first),
        };
        self.request(store, first)
    }

    /// Next payload byte, fetching a new block when the current one is
    /// exhausted. `Ok(None)` once the payload is complete.
    pub fn next_byte<B: ByteStore + ?Sized>(
        &mut self,
        store: &mut B,
    ) -> Result<Option<u8>, StreamError<B::Error>> {
        match self.phase() {
            CursorPhase::NotStarted => {
                self.start(store)?;
                if self.remaining == 0 {
                    return Ok(None);
                }
            }
            CursorPhase::Done => return Ok(None),
            CursorPhase::RequestingBlock => {
                let count = match self.sizing {
                    BlockSizing::Full => self.block_size,
                    BlockSizing::Trimmed => self.trim(self.block_size),
                };
                self.request(store, count)?;
            }
            CursorPhase::Streaming => {}
        }

        match store.read_next() {
            Some(byte) => {
                self.remaining -= 1;
                self.block_remaining -= 1;
                self.address = self.address.wrapping_add(1);
                Ok(Some(byte))
            }
            None => {
                warn!(
                    "stream from {:#06x} ran dry after {} of {} bytes",
                    self.address,
                    self.consumed(),
                    self.expected
                );
                Err(self.incomplete())
            }
        }
    }

    fn trim(&self, count: u8) -> u8 {
        u16::from(count).min(self.remaining) as u8
    }

    fn request<B: ByteStore + ?Sized>(
        &mut self,
        store: &mut B,
        count: u8,
    ) -> Result<(), StreamError<B::Error>> {
        trace!(
            "request {} bytes at {:#06x}, {} left",
            count,
            self.address,
            self.remaining
        );
        store.request_block(count).map_err(StreamError::Device)?;
        self.block_remaining = count;
        Ok(())
    }

    fn incomplete<E: Debug>(&self) -> StreamError<E> {
        StreamError::Incomplete {
            progress: Progress {
                bytes: self.consumed(),
                rows: 0,
            },
            expected: self.expected,
        }
    }

    // Decoders know their byte count up front, so running out is a data error.
    fn pull<B: ByteStore + ?Sized>(&mut self, store: &mut B) -> Result<u8, StreamError<B::Error>> {
        match self.next_byte(store)? {
            Some(byte) => Ok(byte),
            None => Err(self.incomplete()),
        }
    }
}

/// A packed 1-bit image stored on a [`ByteStore`].
///
/// Same layout as a local [`Bitmap`]: row-major, rows padded to whole
/// bytes, most significant bit leftmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteBitmap {
    pub address: u16,
    pub width: i16,
    pub height: i16,
    pub addressing: Addressing,
}

impl RemoteBitmap {
    pub const fn new(address: u16, width: i16, height: i16) -> Self {
        Self {
            address,
            width,
            height,
            addressing: Addressing::Unaligned,
        }
    }

    pub const fn with_addressing(mut self, addressing: Addressing) -> Self {
        self.addressing = addressing;
        self
    }

    /// Total payload size in bytes
    pub fn byte_len(&self) -> u32 {
        let height = u32::try_from(self.height).unwrap_or(0);
        Bitmap::row_bytes(self.width) as u32 * height
    }
}

/// Stream `bitmap` from `store` and draw it with its top-left at `(x, y)`.
///
/// Set bits are plotted in `fg`, clear bits in `bg` or skipped when `bg`
/// is `None`. On success returns the bytes consumed and rows drawn. If the
/// store runs dry the draw stops with [`StreamError::Incomplete`] carrying
/// the same counts; rows already drawn stay visible.
pub fn stream_bitmap<S, B>(
    sink: &mut S,
    store: &mut B,
    x: i16,
    y: i16,
    bitmap: &RemoteBitmap,
    fg: Color,
    bg: Option<Color>,
) -> Result<Progress, StreamError<B::Error>>
where
    S: PixelSink + ?Sized,
    B: ByteStore + ?Sized,
{
    let len = u16::try_from(bitmap.byte_len()).map_err(|_| StreamError::Oversized {
        bytes: bitmap.byte_len(),
    })?;
    let width = usize::try_from(bitmap.width).unwrap_or(0);
    let height = u16::try_from(bitmap.height).unwrap_or(0);
    let row_bytes = Bitmap::row_bytes(bitmap.width);

    let mut cursor = StreamCursor::new(
        bitmap.address,
        len,
        store.block_size(),
        bitmap.addressing,
        BlockSizing::Full,
    );
    cursor.start(store)?;

    let mut rows = 0;
    while rows < height {
        let py = y.wrapping_add(rows as i16);
        for index in 0..row_bytes {
            let byte = cursor.pull(store).map_err(|e| e.with_rows(rows))?;
            let col = index * 8;
            draw_bits(
                sink,
                x.wrapping_add(col as i16),
                py,
                byte,
                width - col,
                Strip::Horizontal,
                fg,
                bg,
            );
        }
        rows += 1;
    }

    Ok(Progress {
        bytes: cursor.consumed(),
        rows,
    })
}

/// Stream one glyph of a device-resident font and draw its cell at `(x, y)`.
///
/// Glyph bytes are columns of 8-row bands: `glyph.width` bytes per band,
/// bit 0 at the top, bands stacked downwards. Requests never exceed the
/// bytes the glyph still needs. Returns bytes consumed and bands drawn.
pub fn stream_glyph<S, B>(
    sink: &mut S,
    store: &mut B,
    x: i16,
    y: i16,
    glyph: &RemoteGlyph,
    fg: Color,
    bg: Option<Color>,
) -> Result<Progress, StreamError<B::Error>>
where
    S: PixelSink + ?Sized,
    B: ByteStore + ?Sized,
{
    if glyph.width == 0 {
        return Ok(Progress::default());
    }
    let bands = glyph.byte_len / u16::from(glyph.width);

    let mut cursor = StreamCursor::new(
        glyph.address,
        glyph.byte_len,
        store.block_size(),
        Addressing::Unaligned,
        BlockSizing::Trimmed,
    );
    cursor.start(store)?;

    let mut rows = 0;
    while rows < bands {
        let py = y.wrapping_add((rows * 8) as i16);
        for col in 0..glyph.width {
            let byte = cursor.pull(store).map_err(|e| e.with_rows(rows))?;
            draw_byte(
                sink,
                x.wrapping_add(i16::from(col)),
                py,
                byte,
                Strip::Vertical,
                fg,
                bg,
            );
        }
        rows += 1;
    }

    Ok(Progress {
        bytes: cursor.consumed(),
        rows,
    })
}
