//! Per-glyph metrics, stored compressed (biased bytes) or uncompressed.

use crate::{
    Error, GlyphIndex, TableKind,
    format::{Format, open_table},
    parser::{ByteOrder, Stream},
};

const COMPRESSED_RECORD: usize = 5;
const UNCOMPRESSED_RECORD: usize = 12;
const COMPRESSED_BIAS: i16 = 0x80;

/// Record layout, resolved once when the table is parsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsFormat {
    Compressed,
    Uncompressed,
}

impl MetricsFormat {
    const fn record_size(self) -> usize {
        match self {
            MetricsFormat::Compressed => COMPRESSED_RECORD,
            MetricsFormat::Uncompressed => UNCOMPRESSED_RECORD,
        }
    }
}

/// Decoded metrics of one glyph.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Metrics {
    pub left_side_bearing: i16,
    pub right_side_bearing: i16,
    pub character_width: i16,
    pub ascent: i16,
    pub descent: i16,
    /// Always zero for compressed records.
    pub attributes: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct MetricsTable<'a> {
    format: MetricsFormat,
    order: ByteOrder,
    count: u32,
    records: &'a [u8],
}

impl<'a> MetricsTable<'a> {
    pub fn parse(body: &'a [u8]) -> Result<Self, Error> {
        const KIND: TableKind = TableKind::Metrics;

        let (format, mut s) = open_table(body, KIND)?;
        let (layout, count) = match format.variant() {
            Format::DEFAULT => {
                let count = s.read::<i32>().ok_or(Error::MalformedTable(KIND))?;
                (MetricsFormat::Uncompressed, count)
            }
            Format::COMPRESSED_METRICS => {
                let count = s.read::<i16>().ok_or(Error::MalformedTable(KIND))?;
                (MetricsFormat::Compressed, count as i32)
            }
            _ => return Err(Error::UnsupportedFormat(KIND)),
        };

        let count = u32::try_from(count).map_err(|_| Error::MalformedTable(KIND))?;
        let len = (count as usize)
            .checked_mul(layout.record_size())
            .ok_or(Error::MalformedTable(KIND))?;
        let records = s.read_bytes(len).ok_or(Error::MalformedTable(KIND))?;

        Ok(Self {
            format: layout,
            order: format.byte_order(),
            count,
            records,
        })
    }

    pub fn format(&self) -> MetricsFormat {
        self.format
    }

    pub fn is_compressed(&self) -> bool {
        self.format == MetricsFormat::Compressed
    }

    /// Number of glyph records.
    pub fn len(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn metrics(&self, glyph: GlyphIndex) -> Result<Metrics, Error> {
        let out_of_range = Error::GlyphOutOfRange {
            glyph,
            count: self.count,
        };
        if glyph as u32 >= self.count {
            return Err(out_of_range);
        }

        let size = self.format.record_size();
        let start = glyph as usize * size;
        let record = self
            .records
            .get(start..start + size)
            .ok_or(out_of_range)?;

        let mut s = Stream::new(record, self.order);
        let metrics = match self.format {
            MetricsFormat::Compressed => {
                let mut field = || s.read::<u8>().map(|b| b as i16 - COMPRESSED_BIAS);
                Metrics {
                    left_side_bearing: field().ok_or(out_of_range)?,
                    right_side_bearing: field().ok_or(out_of_range)?,
                    character_width: field().ok_or(out_of_range)?,
                    ascent: field().ok_or(out_of_range)?,
                    descent: field().ok_or(out_of_range)?,
                    attributes: 0,
                }
            }
            MetricsFormat::Uncompressed => {
                let mut field = || s.read::<i16>();
                Metrics {
                    left_side_bearing: field().ok_or(out_of_range)?,
                    right_side_bearing: field().ok_or(out_of_range)?,
                    character_width: field().ok_or(out_of_range)?,
                    ascent: field().ok_or(out_of_range)?,
                    descent: field().ok_or(out_of_range)?,
                    attributes: field().ok_or(out_of_range)? as u16,
                }
            }
        };

        Ok(metrics)
    }

    /// Horizontal advance of a glyph in pixels. Negative widths clamp to 0.
    pub fn width_of(&self, glyph: GlyphIndex) -> Result<u16, Error> {
        let width = self.metrics(glyph)?.character_width;
        Ok(width.max(0) as u16)
    }
}
