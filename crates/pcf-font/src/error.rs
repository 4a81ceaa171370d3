use core::fmt;

/// Tables the renderer depends on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TableKind {
    Encodings,
    Metrics,
    Bitmaps,
}

impl TableKind {
    /// Directory type constant for this table.
    pub const fn type_id(self) -> u32 {
        match self {
            TableKind::Metrics => 1 << 2,
            TableKind::Bitmaps => 1 << 3,
            TableKind::Encodings => 1 << 5,
        }
    }

    pub(crate) fn from_type_id(id: u32) -> Option<Self> {
        match id {
            id if id == TableKind::Metrics.type_id() => Some(TableKind::Metrics),
            id if id == TableKind::Bitmaps.type_id() => Some(TableKind::Bitmaps),
            id if id == TableKind::Encodings.type_id() => Some(TableKind::Encodings),
            _ => None,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Encodings => f.write_str("encodings"),
            TableKind::Metrics => f.write_str("metrics"),
            TableKind::Bitmaps => f.write_str("bitmaps"),
        }
    }
}

/// Font loading and glyph lookup errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Magic mismatch, or the directory extends past the blob.
    MalformedHeader,
    /// A required table is not listed in the directory.
    MissingTable(TableKind),
    /// A directory entry points outside the blob.
    TableOutOfBounds(TableKind),
    /// A table body is truncated or internally inconsistent.
    MalformedTable(TableKind),
    /// A table's format word selects no known variant.
    UnsupportedFormat(TableKind),
    /// Glyph index is not covered by a table.
    GlyphOutOfRange { glyph: u16, count: u32 },
    /// A glyph's bitmap region lies outside the bitmap data.
    BufferOverflow { glyph: u16 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedHeader => f.write_str("malformed PCF header"),
            Error::MissingTable(kind) => write!(f, "missing {} table", kind),
            Error::TableOutOfBounds(kind) => write!(f, "{} table lies outside the font data", kind),
            Error::MalformedTable(kind) => write!(f, "malformed {} table", kind),
            Error::UnsupportedFormat(kind) => write!(f, "unsupported {} table format", kind),
            Error::GlyphOutOfRange { glyph, count } => {
                write!(f, "glyph {} out of range (table holds {})", glyph, count)
            }
            Error::BufferOverflow { glyph } => {
                write!(f, "bitmap of glyph {} exceeds the bitmap data", glyph)
            }
        }
    }
}

impl core::error::Error for Error {}
