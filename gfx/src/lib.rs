// gfx/src/lib.rs

//! Drawing core for small raster displays.
//!
//! Shapes, packed 1-bit bitmaps and text are turned into pixel and run
//! calls on a [`PixelSink`] supplied by the display driver. Images and
//! glyphs can also be streamed block by block from a remote
//! [`ByteStore`] such as a serial EEPROM, without buffering them locally.

#![cfg_attr(not(test), no_std)]

pub mod bitmap;
pub mod canvas;
pub mod config;
pub mod display;
#[cfg(feature = "graphics")]
pub mod draw_target;
pub mod eeprom;
pub mod error;
pub mod framebuffer;
pub mod raster;
pub mod sink;
pub mod stream;
pub mod text;

#[cfg(test)]
mod testing;

pub use bitmap::{draw_bitmap, draw_byte, draw_xbitmap, BitOrder, Bitmap, Strip};
pub use canvas::Canvas;
pub use config::DisplayConfig;
pub use display::Display;
#[cfg(feature = "graphics")]
pub use draw_target::DrawTargetSink;
pub use eeprom::I2cEeprom;
pub use error::{BitmapError, FramebufferError, Progress, StreamError, TextError};
pub use framebuffer::Framebuffer;
pub use raster::{Corners, Sides};
pub use sink::PixelSink;
pub use stream::{
    stream_bitmap, stream_glyph, Addressing, BlockSizing, ByteStore, CursorPhase, RemoteBitmap,
    StreamCursor,
};
pub use text::{CursorState, GlyphRenderer, LocalFont, RemoteFont, TextEngine};

pub use font::{FontError, FontTable, RemoteGlyph};
pub use shared::{Color, Rotation};
