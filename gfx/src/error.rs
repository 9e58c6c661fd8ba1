// Error types for drawing operations

use core::fmt::Debug;

use font::FontError;
use thiserror::Error;

/// A packed bitmap buffer that cannot hold the declared image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitmapError {
    #[error("bitmap needs {expected} bytes but buffer holds {actual}")]
    TooShort { expected: usize, actual: usize },
}

/// How far a streamed draw got before it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Bytes consumed from the store
    pub bytes: u16,
    /// Complete pixel rows (images) or 8-row bands (glyphs) drawn
    pub rows: u16,
}

/// Failures of a streamed draw from a [`ByteStore`](crate::stream::ByteStore).
///
/// Pixels emitted before the failure stay on the display.
#[derive(Debug, Error)]
pub enum StreamError<E: Debug> {
    #[error("stream ended after {} of {expected} bytes", .progress.bytes)]
    Incomplete { progress: Progress, expected: u16 },

    #[error("address {address:#06x} is not aligned to {block}-byte blocks")]
    Misaligned { address: u16, block: u8 },

    #[error("block size must be non-zero")]
    ZeroBlockSize,

    #[error("payload of {bytes} bytes exceeds the 16-bit address space")]
    Oversized { bytes: u32 },

    #[error("byte store error: {0:?}")]
    Device(E),
}

impl<E: Debug> StreamError<E> {
    /// Record completed rows on an early-termination error
    pub(crate) fn with_rows(self, rows: u16) -> Self {
        match self {
            StreamError::Incomplete { progress, expected } => StreamError::Incomplete {
                progress: Progress { rows, ..progress },
                expected,
            },
            other => other,
        }
    }
}

/// Failures of the device-resident font strategy
#[derive(Debug, Error)]
pub enum TextError<E: Debug> {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Stream(#[from] StreamError<E>),
}

/// An in-memory pixel buffer that does not match its declared size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FramebufferError {
    #[error("framebuffer dimensions must be positive, got {width}x{height}")]
    InvalidSize { width: i16, height: i16 },

    #[error("framebuffer needs {expected} pixels but buffer holds {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}
