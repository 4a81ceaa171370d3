//! File header and table of contents.

use log::debug;

use crate::{
    Error, TableKind,
    parser::{ByteOrder, Stream},
};

/// File signature: `"\x01fcp"`.
pub const MAGIC: [u8; 4] = [0x01, b'f', b'c', b'p'];

const HEADER_SIZE: usize = 8;
const ENTRY_SIZE: usize = 16;

/// One directory entry. All fields are stored least significant byte first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableEntry {
    pub kind: u32,
    pub format: u32,
    pub size: u32,
    pub offset: u32,
}

impl TableEntry {
    fn parse(s: &mut Stream<'_>) -> Option<Self> {
        Some(Self {
            kind: s.read()?,
            format: s.read()?,
            size: s.read()?,
            offset: s.read()?,
        })
    }

    fn body<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        let start = self.offset as usize;
        let end = start.checked_add(self.size as usize)?;
        data.get(start..end)
    }
}

/// Located Encodings, Metrics and Bitmaps tables.
#[derive(Clone, Copy, Debug)]
pub struct TableDirectory<'a> {
    data: &'a [u8],
    count: usize,
    encodings: TableEntry,
    metrics: TableEntry,
    bitmaps: TableEntry,
}

impl<'a> TableDirectory<'a> {
    /// Checks the signature and scans the table of contents.
    pub fn parse(data: &'a [u8]) -> Result<Self, Error> {
        if data.get(..MAGIC.len()) != Some(&MAGIC[..]) {
            return Err(Error::MalformedHeader);
        }

        let mut s = Stream::new(data, ByteOrder::LsbFirst);
        s.read_bytes(MAGIC.len()).ok_or(Error::MalformedHeader)?;
        let count = s.read::<i32>().ok_or(Error::MalformedHeader)?;
        let count = usize::try_from(count).map_err(|_| Error::MalformedHeader)?;

        let directory_end = count
            .checked_mul(ENTRY_SIZE)
            .and_then(|len| len.checked_add(HEADER_SIZE))
            .ok_or(Error::MalformedHeader)?;
        if directory_end > data.len() {
            return Err(Error::MalformedHeader);
        }

        let mut found: [Option<TableEntry>; 3] = [None; 3];
        for _ in 0..count {
            let entry = TableEntry::parse(&mut s).ok_or(Error::MalformedHeader)?;
            let Some(kind) = TableKind::from_type_id(entry.kind) else {
                debug!("pcf: skipping table type {:#x}", entry.kind);
                continue;
            };

            if entry.body(data).is_none() {
                return Err(Error::TableOutOfBounds(kind));
            }

            debug!(
                "pcf: {} table at {:#x} size={} format={:#x}",
                kind, entry.offset, entry.size, entry.format
            );
            found[slot(kind)] = Some(entry);
        }

        let required = |kind: TableKind| found[slot(kind)].ok_or(Error::MissingTable(kind));
        Ok(Self {
            data,
            count,
            encodings: required(TableKind::Encodings)?,
            metrics: required(TableKind::Metrics)?,
            bitmaps: required(TableKind::Bitmaps)?,
        })
    }

    /// Number of directory entries, including skipped ones.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Every raw entry in file order.
    pub fn entries(&self) -> impl Iterator<Item = TableEntry> + use<'a> {
        let toc = self.data.get(HEADER_SIZE..).unwrap_or_default();
        let mut s = Stream::new(toc, ByteOrder::LsbFirst);
        (0..self.count).map_while(move |_| TableEntry::parse(&mut s))
    }

    pub fn get(&self, kind: TableKind) -> TableEntry {
        match kind {
            TableKind::Encodings => self.encodings,
            TableKind::Metrics => self.metrics,
            TableKind::Bitmaps => self.bitmaps,
        }
    }

    /// Body bytes of a required table.
    pub fn table_data(&self, kind: TableKind) -> Result<&'a [u8], Error> {
        self.get(kind)
            .body(self.data)
            .ok_or(Error::TableOutOfBounds(kind))
    }
}

fn slot(kind: TableKind) -> usize {
    match kind {
        TableKind::Encodings => 0,
        TableKind::Metrics => 1,
        TableKind::Bitmaps => 2,
    }
}
