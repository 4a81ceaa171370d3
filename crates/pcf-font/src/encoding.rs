//! Code point to glyph index mapping.

use crate::{
    Error, GlyphIndex, NO_GLYPH, TableKind,
    format::{Format, open_table},
    parser::{ByteOrder, Stream},
};

/// View over the BDF encodings table.
///
/// Glyph indices form a `byte1 x byte2` grid: rows are the high byte of a
/// code point, columns the low byte.
#[derive(Clone, Copy, Debug)]
pub struct EncodingTable<'a> {
    min_char_or_byte2: u16,
    max_char_or_byte2: u16,
    min_byte1: u16,
    max_byte1: u16,
    default_char: u16,
    order: ByteOrder,
    glyph_indices: &'a [u8],
}

impl<'a> EncodingTable<'a> {
    pub fn parse(body: &'a [u8]) -> Result<Self, Error> {
        const KIND: TableKind = TableKind::Encodings;

        let (format, mut s) = open_table(body, KIND)?;
        if format.variant() != Format::DEFAULT {
            return Err(Error::UnsupportedFormat(KIND));
        }

        let mut field = || s.read::<u16>().ok_or(Error::MalformedTable(KIND));
        let min_char_or_byte2 = field()?;
        let max_char_or_byte2 = field()?;
        let min_byte1 = field()?;
        let max_byte1 = field()?;
        let default_char = field()?;

        if min_char_or_byte2 > max_char_or_byte2 || min_byte1 > max_byte1 {
            return Err(Error::MalformedTable(KIND));
        }

        let columns = (max_char_or_byte2 - min_char_or_byte2) as usize + 1;
        let rows = (max_byte1 - min_byte1) as usize + 1;
        let glyph_indices = rows
            .checked_mul(columns)
            .and_then(|cells| cells.checked_mul(2))
            .and_then(|len| s.read_bytes(len))
            .ok_or(Error::MalformedTable(KIND))?;

        Ok(Self {
            min_char_or_byte2,
            max_char_or_byte2,
            min_byte1,
            max_byte1,
            default_char,
            order: format.byte_order(),
            glyph_indices,
        })
    }

    /// Maps a code point to a glyph index, or [`NO_GLYPH`] when the font
    /// has no glyph for it.
    ///
    /// Code points below 256 are not special-cased: they sit in row 0, so a
    /// font whose `min_byte1` is above 0 has no glyph for them.
    pub fn lookup(&self, codepoint: u32) -> GlyphIndex {
        self.grid_index(codepoint)
            .and_then(|index| Stream::read_at::<u16>(self.glyph_indices, index, self.order))
            .unwrap_or(NO_GLYPH)
    }

    /// Code points are split into a big-endian `(byte1, byte2)` pair. With
    /// `min_byte1 == 0` a single-byte code point resolves to
    /// `codepoint - min_char_or_byte2`. Either byte outside the table's
    /// ranges means no glyph.
    fn grid_index(&self, codepoint: u32) -> Option<usize> {
        if codepoint > 0xFFFF {
            return None;
        }

        let byte1 = (codepoint >> 8) as u16;
        let byte2 = (codepoint & 0xFF) as u16;
        if !(self.min_byte1..=self.max_byte1).contains(&byte1)
            || !(self.min_char_or_byte2..=self.max_char_or_byte2).contains(&byte2)
        {
            return None;
        }

        let row = (byte1 - self.min_byte1) as usize;
        let column = (byte2 - self.min_char_or_byte2) as usize;
        Some(row * self.columns() + column)
    }

    fn columns(&self) -> usize {
        (self.max_char_or_byte2 - self.min_char_or_byte2) as usize + 1
    }

    /// Substitute code point declared by the font.
    pub fn default_char(&self) -> u16 {
        self.default_char
    }

    /// Glyph of the default character, if the font maps it.
    pub fn default_glyph(&self) -> Option<GlyphIndex> {
        let glyph = self.lookup(self.default_char as u32);
        (glyph != NO_GLYPH).then_some(glyph)
    }

    pub fn byte2_range(&self) -> (u16, u16) {
        (self.min_char_or_byte2, self.max_char_or_byte2)
    }

    pub fn byte1_range(&self) -> (u16, u16) {
        (self.min_byte1, self.max_byte1)
    }
}
