//! Packed glyph bitmaps.

use crate::{
    Error, GlyphIndex, TableKind,
    format::{BitOrder, Format, open_table},
    parser::{ByteOrder, Stream},
};

/// Bit layout of the bitmap data, decoded from the table's format word.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BitmapLayout {
    /// Row padding in bytes (1, 2, 4 or 8).
    pub pad: usize,
    /// Scan unit in bytes (1, 2, 4 or 8). Never larger than `pad`.
    pub unit: usize,
    pub byte_order: ByteOrder,
    pub bit_order: BitOrder,
}

impl BitmapLayout {
    pub fn from_format(format: Format) -> Result<Self, Error> {
        let layout = Self {
            pad: format.glyph_pad(),
            unit: format.scan_unit(),
            byte_order: format.byte_order(),
            bit_order: format.bit_order(),
        };
        if layout.unit > layout.pad {
            return Err(Error::UnsupportedFormat(TableKind::Bitmaps));
        }
        Ok(layout)
    }

    /// Bytes in one glyph row of `width` pixels, padding included.
    pub fn row_len(&self, width: u16) -> usize {
        (width as usize).div_ceil(self.pad * 8) * self.pad
    }

    /// Byte index within the row and bit shift within that byte for
    /// pixel column `col`.
    pub fn locate(&self, col: usize) -> (usize, u32) {
        let unit_bits = self.unit * 8;
        let within = col % unit_bits;
        let bit = match self.bit_order {
            BitOrder::MsbFirst => unit_bits - 1 - within,
            BitOrder::LsbFirst => within,
        };
        let significance = bit / 8;
        let byte = match self.byte_order {
            ByteOrder::MsbFirst => self.unit - 1 - significance,
            ByteOrder::LsbFirst => significance,
        };
        ((col / unit_bits) * self.unit + byte, (bit % 8) as u32)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BitmapTable<'a> {
    layout: BitmapLayout,
    count: u32,
    offsets: &'a [u8],
    data: &'a [u8],
}

impl<'a> BitmapTable<'a> {
    pub fn parse(body: &'a [u8]) -> Result<Self, Error> {
        const KIND: TableKind = TableKind::Bitmaps;

        let (format, mut s) = open_table(body, KIND)?;
        if format.variant() != Format::DEFAULT {
            return Err(Error::UnsupportedFormat(KIND));
        }
        let layout = BitmapLayout::from_format(format)?;

        let count = s.read::<i32>().ok_or(Error::MalformedTable(KIND))?;
        let count = u32::try_from(count).map_err(|_| Error::MalformedTable(KIND))?;
        let offsets = (count as usize)
            .checked_mul(4)
            .and_then(|len| s.read_bytes(len))
            .ok_or(Error::MalformedTable(KIND))?;

        // One total per padding option; only the one matching the format is
        // backed by data.
        let mut sizes = [0i32; 4];
        for size in &mut sizes {
            *size = s.read().ok_or(Error::MalformedTable(KIND))?;
        }
        let data_len =
            usize::try_from(sizes[format.pad_index()]).map_err(|_| Error::MalformedTable(KIND))?;
        let data = s.read_bytes(data_len).ok_or(Error::MalformedTable(KIND))?;

        Ok(Self {
            layout,
            count,
            offsets,
            data,
        })
    }

    pub fn layout(&self) -> BitmapLayout {
        self.layout
    }

    pub fn glyph_count(&self) -> u32 {
        self.count
    }

    /// Row bytes of a glyph `width` pixels wide and `height` rows tall.
    pub fn rows_of(&self, glyph: GlyphIndex, width: u16, height: u16) -> Result<GlyphRows<'a>, Error> {
        let offset = Stream::read_at::<i32>(self.offsets, glyph as usize, self.layout.byte_order)
            .ok_or(Error::GlyphOutOfRange {
                glyph,
                count: self.count,
            })?;
        let start = usize::try_from(offset).map_err(|_| Error::BufferOverflow { glyph })?;

        let row_len = self.layout.row_len(width);
        let data = row_len
            .checked_mul(height as usize)
            .and_then(|len| start.checked_add(len))
            .and_then(|end| self.data.get(start..end))
            .ok_or(Error::BufferOverflow { glyph })?;

        Ok(GlyphRows {
            data,
            row_len,
            rows: height as usize,
            layout: self.layout,
        })
    }
}

/// Rows of one glyph, top to bottom.
#[derive(Clone, Debug)]
pub struct GlyphRows<'a> {
    data: &'a [u8],
    row_len: usize,
    rows: usize,
    layout: BitmapLayout,
}

impl<'a> GlyphRows<'a> {
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

impl<'a> Iterator for GlyphRows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rows == 0 {
            return None;
        }
        let (bytes, rest) = self.data.split_at_checked(self.row_len)?;
        self.data = rest;
        self.rows -= 1;
        Some(Row {
            bytes,
            layout: self.layout,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rows, Some(self.rows))
    }
}

impl ExactSizeIterator for GlyphRows<'_> {}

/// One packed glyph row.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    bytes: &'a [u8],
    layout: BitmapLayout,
}

impl<'a> Row<'a> {
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Whether pixel `col` (0 = leftmost) is set. Columns past the row read
    /// as clear.
    pub fn bit(&self, col: usize) -> bool {
        let (index, shift) = self.layout.locate(col);
        self.bytes
            .get(index)
            .is_some_and(|byte| (byte >> shift) & 1 != 0)
    }

    /// The first `width` pixels, left to right.
    pub fn bits(&self, width: u16) -> impl Iterator<Item = bool> + use<'a> {
        let row = *self;
        (0..width as usize).map(move |col| row.bit(col))
    }
}
