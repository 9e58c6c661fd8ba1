//! Display configuration

use shared::{Color, Rotation};

use crate::stream::{Addressing, DEFAULT_BLOCK_SIZE};
use crate::text::CursorState;

/// Everything a [`Display`](crate::display::Display) needs besides its
/// sink and glyph strategy.
///
/// ```
/// use gfx::{Color, DisplayConfig, Rotation};
///
/// let config = DisplayConfig::new(128, 64)
///     .rotation(Rotation::Deg90)
///     .text_size(2)
///     .text_colors(Color::WHITE, Color::BLACK);
/// assert_eq!(config.text_size, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Unrotated panel width
    pub width: i16,
    /// Unrotated panel height
    pub height: i16,
    pub rotation: Rotation,
    pub wrap: bool,
    pub text_size: u8,
    pub text_color: Color,
    /// Same as `text_color` for transparent text
    pub text_background: Color,
    /// Transfer limit of the byte store bus
    pub block_size: u8,
    /// Discipline for streamed images
    pub addressing: Addressing,
}

impl DisplayConfig {
    pub const fn new(width: i16, height: i16) -> Self {
        Self {
            width,
            height,
            rotation: Rotation::Deg0,
            wrap: true,
            text_size: 1,
            text_color: Color::WHITE,
            text_background: Color::WHITE,
            block_size: DEFAULT_BLOCK_SIZE,
            addressing: Addressing::Unaligned,
        }
    }

    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub const fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// 0 is coerced to 1
    pub const fn text_size(mut self, size: u8) -> Self {
        self.text_size = if size == 0 { 1 } else { size };
        self
    }

    /// Transparent text in `color`
    pub const fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self.text_background = color;
        self
    }

    pub const fn text_colors(mut self, fg: Color, bg: Color) -> Self {
        self.text_color = fg;
        self.text_background = bg;
        self
    }

    pub const fn block_size(mut self, block_size: u8) -> Self {
        self.block_size = block_size;
        self
    }

    pub const fn addressing(mut self, addressing: Addressing) -> Self {
        self.addressing = addressing;
        self
    }

    /// Initial text cursor at the origin
    pub fn cursor(&self) -> CursorState {
        let mut cursor = CursorState::default();
        cursor.set_wrap(self.wrap);
        cursor.set_text_size(self.text_size);
        cursor.set_text_colors(self.text_color, self.text_background);
        cursor
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(128, 64)
    }
}
