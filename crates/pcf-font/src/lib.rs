#![cfg_attr(not(any(test, feature = "testing")), no_std)]

//! Zero-copy reader for PCF (Portable Compiled Format) bitmap fonts.
//!
//! Only the tables needed to draw text are decoded: encodings, metrics and
//! bitmaps. Every table is a borrowed view into the font blob; nothing is
//! copied or allocated.

mod bitmap;
mod directory;
mod encoding;
mod error;
mod format;
mod metrics;
mod parser;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bitmap::{BitmapLayout, BitmapTable, GlyphRows, Row};
pub use directory::{MAGIC, TableDirectory, TableEntry};
pub use encoding::EncodingTable;
pub use error::{Error, TableKind};
pub use format::{BitOrder, Format};
pub use metrics::{Metrics, MetricsFormat, MetricsTable};
pub use parser::ByteOrder;

use log::debug;

/// Font-internal glyph identifier.
pub type GlyphIndex = u16;

/// Glyph index meaning "no glyph for this code point".
pub const NO_GLYPH: GlyphIndex = 0xFFFF;

/// A loaded font: the three tables text rendering depends on.
#[derive(Clone, Copy, Debug)]
pub struct FontHandle<'a> {
    encoding: EncodingTable<'a>,
    metrics: MetricsTable<'a>,
    bitmaps: BitmapTable<'a>,
}

impl<'a> FontHandle<'a> {
    pub fn encoding(&self) -> &EncodingTable<'a> {
        &self.encoding
    }

    pub fn metrics(&self) -> &MetricsTable<'a> {
        &self.metrics
    }

    pub fn bitmaps(&self) -> &BitmapTable<'a> {
        &self.bitmaps
    }

    /// Glyph for a code point, `None` when the font has none.
    pub fn glyph(&self, codepoint: u32) -> Option<GlyphIndex> {
        let glyph = self.encoding.lookup(codepoint);
        (glyph != NO_GLYPH).then_some(glyph)
    }
}

/// Parses the directory and the encodings, metrics and bitmaps tables.
pub fn load_font(blob: &[u8]) -> Result<FontHandle<'_>, Error> {
    let directory = TableDirectory::parse(blob)?;

    let encoding = EncodingTable::parse(directory.table_data(TableKind::Encodings)?)?;
    let metrics = MetricsTable::parse(directory.table_data(TableKind::Metrics)?)?;
    let bitmaps = BitmapTable::parse(directory.table_data(TableKind::Bitmaps)?)?;

    debug!(
        "pcf: loaded {} glyphs, metrics={:?}, bitmap layout={:?}",
        metrics.len(),
        metrics.format(),
        bitmaps.layout()
    );

    Ok(FontHandle {
        encoding,
        metrics,
        bitmaps,
    })
}
