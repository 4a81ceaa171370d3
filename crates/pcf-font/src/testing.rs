//! Builds small synthetic PCF fonts for tests.
//!
//! Glyphs are drawn as ASCII art, `#` for a set pixel and anything else for
//! a clear one. The builder packs them in whatever bitmap layout is
//! requested, so tests can cover every padding, scan unit and order
//! combination without shipping font files.

use crate::{BitmapLayout, Format, TableKind, directory::MAGIC};

const PROPERTIES: u32 = 1 << 0;

#[derive(Clone, Debug)]
struct GlyphArt {
    codepoint: u32,
    width: u16,
    rows: Vec<Vec<bool>>,
}

#[derive(Clone, Debug)]
pub struct FontBuilder {
    height: u16,
    format: u32,
    compressed_metrics: bool,
    default_char: Option<u16>,
    omit: Vec<TableKind>,
    glyphs: Vec<GlyphArt>,
}

impl FontBuilder {
    /// Starts a font whose glyphs are `height` rows tall. The default layout
    /// is what `bdftopcf` writes: byte padding, MSB first bytes and bits.
    pub fn new(height: u16) -> Self {
        Self {
            height,
            format: 0x0C,
            compressed_metrics: true,
            default_char: None,
            omit: Vec::new(),
            glyphs: Vec::new(),
        }
    }

    /// Layout flags (low byte of the format word) for every table.
    pub fn bitmap_format(mut self, flags: u32) -> Self {
        self.format = flags & 0xFF;
        self
    }

    pub fn compressed_metrics(mut self, compressed: bool) -> Self {
        self.compressed_metrics = compressed;
        self
    }

    pub fn default_char(mut self, c: char) -> Self {
        self.default_char = Some(c as u16);
        self
    }

    /// Leaves a required table out of the directory.
    pub fn omit(mut self, kind: TableKind) -> Self {
        self.omit.push(kind);
        self
    }

    /// Adds a glyph. Missing rows are blank; characters past `width` are
    /// ignored.
    pub fn glyph(mut self, c: char, width: u16, art: &[&str]) -> Self {
        assert!((c as u32) <= 0xFFFF, "PCF encodings cover the BMP only");
        let rows = (0..self.height as usize)
            .map(|y| {
                let line = art.get(y).copied().unwrap_or("");
                let mut row: Vec<bool> = line.chars().map(|ch| ch == '#').collect();
                row.resize(width as usize, false);
                row.truncate(width as usize);
                row
            })
            .collect();
        self.glyphs.push(GlyphArt {
            codepoint: c as u32,
            width,
            rows,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        assert!(!self.glyphs.is_empty(), "font needs at least one glyph");

        let mut tables: Vec<(u32, u32, Vec<u8>)> = vec![(PROPERTIES, 0, self.table_start(0))];
        for kind in [TableKind::Encodings, TableKind::Metrics, TableKind::Bitmaps] {
            if self.omit.contains(&kind) {
                continue;
            }
            let (format, body) = match kind {
                TableKind::Encodings => (self.format, self.encodings()),
                TableKind::Metrics => (self.metrics_format(), self.metrics()),
                TableKind::Bitmaps => (self.format, self.bitmaps()),
            };
            tables.push((kind.type_id(), format, body));
        }

        let mut blob = MAGIC.to_vec();
        blob.extend_from_slice(&(tables.len() as i32).to_le_bytes());

        let mut offset = 8 + 16 * tables.len();
        for (kind, format, body) in &tables {
            for word in [*kind, *format, body.len() as u32, offset as u32] {
                blob.extend_from_slice(&word.to_le_bytes());
            }
            offset += body.len().next_multiple_of(4);
        }
        for (_, _, body) in &tables {
            blob.extend_from_slice(body);
            blob.resize(blob.len().next_multiple_of(4), 0);
        }
        blob
    }

    fn big_endian(&self) -> bool {
        Format(self.format).byte_order() == crate::ByteOrder::MsbFirst
    }

    fn metrics_format(&self) -> u32 {
        if self.compressed_metrics {
            Format::COMPRESSED_METRICS | self.format
        } else {
            self.format
        }
    }

    fn table_start(&self, format: u32) -> Vec<u8> {
        (format | self.format).to_le_bytes().to_vec()
    }

    fn put16(&self, out: &mut Vec<u8>, v: u16) {
        if self.big_endian() {
            out.extend_from_slice(&v.to_be_bytes());
        } else {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn put32(&self, out: &mut Vec<u8>, v: u32) {
        if self.big_endian() {
            out.extend_from_slice(&v.to_be_bytes());
        } else {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn encodings(&self) -> Vec<u8> {
        let byte1 = |g: &GlyphArt| (g.codepoint >> 8) as u16;
        let byte2 = |g: &GlyphArt| (g.codepoint & 0xFF) as u16;
        let min_b1 = self.glyphs.iter().map(byte1).min().unwrap_or(0);
        let max_b1 = self.glyphs.iter().map(byte1).max().unwrap_or(0);
        let min_b2 = self.glyphs.iter().map(byte2).min().unwrap_or(0);
        let max_b2 = self.glyphs.iter().map(byte2).max().unwrap_or(0);
        let columns = (max_b2 - min_b2) as usize + 1;
        let rows = (max_b1 - min_b1) as usize + 1;

        let mut grid = vec![crate::NO_GLYPH; rows * columns];
        for (index, g) in self.glyphs.iter().enumerate() {
            let cell = (byte1(g) - min_b1) as usize * columns + (byte2(g) - min_b2) as usize;
            grid[cell] = index as u16;
        }

        let default_char = self.default_char.unwrap_or(self.glyphs[0].codepoint as u16);
        let mut body = self.table_start(Format::DEFAULT);
        for v in [min_b2, max_b2, min_b1, max_b1, default_char] {
            self.put16(&mut body, v);
        }
        for v in grid {
            self.put16(&mut body, v);
        }
        body
    }

    fn metrics(&self) -> Vec<u8> {
        let mut body = self.metrics_format().to_le_bytes().to_vec();
        let height = self.height as i16;
        if self.compressed_metrics {
            self.put16(&mut body, self.glyphs.len() as u16);
            for g in &self.glyphs {
                let width = g.width as i16;
                for field in [0, width, width, height, 0] {
                    body.push((field + 0x80) as u8);
                }
            }
        } else {
            self.put32(&mut body, self.glyphs.len() as u32);
            for g in &self.glyphs {
                let width = g.width as i16;
                for field in [0, width, width, height, 0, 0] {
                    self.put16(&mut body, field as u16);
                }
            }
        }
        body
    }

    fn bitmaps(&self) -> Vec<u8> {
        let mut body = self.table_start(Format::DEFAULT);
        self.put32(&mut body, self.glyphs.len() as u32);

        let mut sizes = [0u32; 4];
        for (pad_index, size) in sizes.iter_mut().enumerate() {
            let pad = 1usize << pad_index;
            *size = self
                .glyphs
                .iter()
                .map(|g| (g.width as usize).div_ceil(pad * 8) * pad * self.height as usize)
                .sum::<usize>() as u32;
        }

        let layout = BitmapLayout::from_format(Format(self.format))
            .expect("scan unit must not exceed padding");
        let mut data = Vec::new();
        for g in &self.glyphs {
            self.put32(&mut body, data.len() as u32);
            let row_len = layout.row_len(g.width);
            for row in &g.rows {
                let mut packed = vec![0u8; row_len];
                for (col, _) in row.iter().enumerate().filter(|(_, on)| **on) {
                    let (byte, shift) = layout.locate(col);
                    packed[byte] |= 1 << shift;
                }
                data.extend_from_slice(&packed);
            }
        }

        for size in sizes {
            self.put32(&mut body, size);
        }
        body.extend_from_slice(&data);
        body
    }
}
