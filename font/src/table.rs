// font/src/table.rs

//! Metadata of a variable-width font whose glyph bytes live on a remote
//! byte store.
//!
//! Glyphs are stored column-major in horizontal bands of 8 rows: the first
//! `width` bytes are the top band (one byte per column, bit 0 = top row),
//! the next `width` bytes the band below, and so on for `byte_height`
//! bands.

use crate::error::{FontError, Result};

/// Location and size of one glyph on the remote store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteGlyph {
    /// Columns in the glyph
    pub width: u8,
    /// Absolute address of the first glyph byte
    pub address: u16,
    /// Bytes to fetch (`width * byte_height`)
    pub byte_len: u16,
}

/// Parsed font table of a device-resident font
#[derive(Debug, Clone, Copy)]
pub struct FontTable<'a> {
    first_char: u8,
    byte_height: u8,
    data_address: u16,
    widths: &'a [u8],
    offsets: &'a [u16],
}

impl<'a> FontTable<'a> {
    /// Build a table from already-parsed metadata.
    ///
    /// `widths[i]` and `offsets[i]` describe character `first_char + i`;
    /// offsets are relative to `data_address`.
    pub fn new(
        first_char: u8,
        byte_height: u8,
        data_address: u16,
        widths: &'a [u8],
        offsets: &'a [u16],
    ) -> Result<Self> {
        if widths.len() != offsets.len() {
            return Err(FontError::TableMismatch {
                widths: widths.len(),
                offsets: offsets.len(),
            });
        }
        if byte_height == 0 {
            return Err(FontError::ZeroByteHeight);
        }

        Ok(Self {
            first_char,
            byte_height,
            data_address,
            widths,
            offsets,
        })
    }

    pub const fn first_char(&self) -> u8 {
        self.first_char
    }

    /// Number of 8-row bands per glyph
    pub const fn byte_height(&self) -> u8 {
        self.byte_height
    }

    pub const fn data_address(&self) -> u16 {
        self.data_address
    }

    /// Pixel height of a text line
    pub const fn line_height(&self) -> i16 {
        self.byte_height as i16 * 8
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    fn index(&self, c: u8) -> Result<usize> {
        let index = c
            .checked_sub(self.first_char)
            .map(usize::from)
            .filter(|&i| i < self.widths.len());
        index.ok_or(FontError::MissingGlyph(c))
    }

    /// Column count of `c`
    pub fn width(&self, c: u8) -> Result<u8> {
        Ok(self.widths[self.index(c)?])
    }

    /// Remote location of `c`
    pub fn glyph(&self, c: u8) -> Result<RemoteGlyph> {
        let index = self.index(c)?;
        let width = self.widths[index];
        Ok(RemoteGlyph {
            width,
            address: self.data_address.wrapping_add(self.offsets[index]),
            byte_len: u16::from(width) * u16::from(self.byte_height),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTHS: [u8; 3] = [3, 5, 4];
    const OFFSETS: [u16; 3] = [0, 6, 16];

    fn table() -> FontTable<'static> {
        FontTable::new(b'A', 2, 0x0100, &WIDTHS, &OFFSETS).unwrap()
    }

    #[test]
    fn test_glyph_location() {
        let glyph = table().glyph(b'B').unwrap();
        assert_eq!(glyph.width, 5);
        assert_eq!(glyph.address, 0x0106);
        assert_eq!(glyph.byte_len, 10);
    }

    #[test]
    fn test_characters_outside_table() {
        assert_eq!(table().glyph(b'@'), Err(FontError::MissingGlyph(b'@')));
        assert_eq!(table().width(b'D'), Err(FontError::MissingGlyph(b'D')));
        assert_eq!(table().width(b'C'), Ok(4));
    }

    #[test]
    fn test_line_height() {
        assert_eq!(table().line_height(), 16);
        assert_eq!(table().len(), 3);
    }

    #[test]
    fn test_mismatched_metadata_rejected() {
        let result = FontTable::new(b' ', 1, 0, &WIDTHS, &OFFSETS[..2]);
        assert!(matches!(
            result,
            Err(FontError::TableMismatch { widths: 3, offsets: 2 })
        ));
        assert!(matches!(
            FontTable::new(b' ', 0, 0, &WIDTHS, &OFFSETS),
            Err(FontError::ZeroByteHeight)
        ));
    }
}
