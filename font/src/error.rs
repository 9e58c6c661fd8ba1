// font/src/error.rs

use thiserror::Error;

pub type Result<T> = core::result::Result<T, FontError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FontError {
    #[error("no glyph for character {0:#04x}")]
    MissingGlyph(u8),

    #[error("font table has {widths} widths but {offsets} offsets")]
    TableMismatch { widths: usize, offsets: usize },

    #[error("glyph byte height must be at least 1")]
    ZeroByteHeight,
}
