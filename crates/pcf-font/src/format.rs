//! Table format word.
//!
//! Every table body opens with a least-significant-byte-first `u32`. The low
//! byte carries layout flags, the upper bits select the table variant:
//!
//! - bits 0..2: glyph row padding, `1 << n` bytes
//! - bit 2: byte order (set = most significant byte first)
//! - bit 3: bit order (set = most significant bit first)
//! - bits 4..6: scan unit, `1 << n` bytes

use crate::{
    Error, TableKind,
    parser::{ByteOrder, Stream},
};

/// Order of pixels within a scan unit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BitOrder {
    /// Leftmost pixel is the least significant bit.
    LsbFirst,
    /// Leftmost pixel is the most significant bit.
    MsbFirst,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Format(pub u32);

impl Format {
    /// Plain layout, used by every table.
    pub const DEFAULT: u32 = 0x0000_0000;
    /// Metrics stored as biased bytes.
    pub const COMPRESSED_METRICS: u32 = 0x0000_0100;

    const VARIANT_MASK: u32 = 0xFFFF_FF00;
    const PAD_MASK: u32 = 0b11;
    const BYTE_MASK: u32 = 1 << 2;
    const BIT_MASK: u32 = 1 << 3;
    const UNIT_SHIFT: u32 = 4;

    #[inline]
    pub const fn variant(self) -> u32 {
        self.0 & Self::VARIANT_MASK
    }

    #[inline]
    pub const fn byte_order(self) -> ByteOrder {
        if self.0 & Self::BYTE_MASK != 0 {
            ByteOrder::MsbFirst
        } else {
            ByteOrder::LsbFirst
        }
    }

    #[inline]
    pub const fn bit_order(self) -> BitOrder {
        if self.0 & Self::BIT_MASK != 0 {
            BitOrder::MsbFirst
        } else {
            BitOrder::LsbFirst
        }
    }

    /// Index into the bitmap size array that matches the row padding.
    #[inline]
    pub const fn pad_index(self) -> usize {
        (self.0 & Self::PAD_MASK) as usize
    }

    /// Row padding unit in bytes.
    #[inline]
    pub const fn glyph_pad(self) -> usize {
        1 << self.pad_index()
    }

    /// Scan unit in bytes.
    #[inline]
    pub const fn scan_unit(self) -> usize {
        1 << ((self.0 >> Self::UNIT_SHIFT) & 0b11)
    }
}

/// Reads the format word of a table body and returns a stream positioned
/// after it, switched to the byte order the word declares.
pub(crate) fn open_table(body: &[u8], kind: TableKind) -> Result<(Format, Stream<'_>), Error> {
    let mut s = Stream::new(body, ByteOrder::LsbFirst);
    let format = Format(s.read::<u32>().ok_or(Error::MalformedTable(kind))?);
    s.set_order(format.byte_order());
    Ok((format, s))
}
