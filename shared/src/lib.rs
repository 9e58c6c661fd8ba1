#![no_std]

// Shared crate for the gfx workspace
// Color and orientation types used by every drawing crate

/// A 16-bit RGB565 color, the native pixel value of the supported panels
///
/// Monochrome panels treat any non-zero value as "on".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const CYAN: Color = Color(0x07FF);
    pub const MAGENTA: Color = Color(0xF81F);
    pub const YELLOW: Color = Color(0xFFE0);

    /// Wrap a raw RGB565 value
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw RGB565 value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Pack 8-bit RGB components, dropping the low bits of each channel
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }

    /// Expand back to 8-bit components, replicating high bits into the low ones
    pub const fn to_rgb(self) -> (u8, u8, u8) {
        let r = (self.0 >> 11) as u8 & 0x1F;
        let g = (self.0 >> 5) as u8 & 0x3F;
        let b = self.0 as u8 & 0x1F;
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    /// Whether a monochrome panel should light this pixel
    pub const fn is_on(self) -> bool {
        self.0 != 0
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Screen orientation in quarter turns
///
/// The rasterizer never sees rotation; it only changes which of the
/// panel's native dimensions is reported as width.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0 = 0,
    Deg90 = 1,
    Deg180 = 2,
    Deg270 = 3,
}

impl Rotation {
    /// Build from a quarter-turn count; only the low two bits are used
    pub const fn from_index(index: u8) -> Self {
        match index & 3 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Odd rotations swap width and height
    pub const fn is_transposed(self) -> bool {
        self.index() & 1 == 1
    }

    /// Logical `(width, height)` of a panel with native size `width x height`
    pub const fn apply(self, width: i16, height: i16) -> (i16, i16) {
        if self.is_transposed() {
            (height, width)
        } else {
            (width, height)
        }
    }
}
