//! Bounds-checked reading primitives over the font blob.

/// Byte order of multi-byte fields inside a table body.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ByteOrder {
    LsbFirst,
    MsbFirst,
}

/// A value that can be decoded from a fixed number of bytes.
pub(crate) trait FromData: Sized {
    const SIZE: usize;

    fn parse(data: &[u8], order: ByteOrder) -> Self;
}

impl FromData for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn parse(data: &[u8], _: ByteOrder) -> Self {
        data[0]
    }
}

impl FromData for u16 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8], order: ByteOrder) -> Self {
        let bytes = [data[0], data[1]];
        match order {
            ByteOrder::LsbFirst => u16::from_le_bytes(bytes),
            ByteOrder::MsbFirst => u16::from_be_bytes(bytes),
        }
    }
}

impl FromData for i16 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8], order: ByteOrder) -> Self {
        u16::parse(data, order) as i16
    }
}

impl FromData for u32 {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8], order: ByteOrder) -> Self {
        let bytes = [data[0], data[1], data[2], data[3]];
        match order {
            ByteOrder::LsbFirst => u32::from_le_bytes(bytes),
            ByteOrder::MsbFirst => u32::from_be_bytes(bytes),
        }
    }
}

impl FromData for i32 {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8], order: ByteOrder) -> Self {
        u32::parse(data, order) as i32
    }
}

/// Forward-only cursor. Every read checks the remaining length first and
/// returns `None` instead of reading past the slice.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Stream<'a> {
    data: &'a [u8],
    offset: usize,
    order: ByteOrder,
}

impl<'a> Stream<'a> {
    #[inline]
    pub(crate) fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            data,
            offset: 0,
            order,
        }
    }

    #[inline]
    pub(crate) fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    #[inline]
    pub(crate) fn read<T: FromData>(&mut self) -> Option<T> {
        let bytes = self.read_bytes(T::SIZE)?;
        Some(T::parse(bytes, self.order))
    }

    #[inline]
    pub(crate) fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(len)?;
        let bytes = self.data.get(self.offset..end)?;
        self.offset = end;
        Some(bytes)
    }

    /// Reads a value at `index * T::SIZE` without moving a cursor.
    #[inline]
    pub(crate) fn read_at<T: FromData>(data: &[u8], index: usize, order: ByteOrder) -> Option<T> {
        let start = index.checked_mul(T::SIZE)?;
        let end = start.checked_add(T::SIZE)?;
        data.get(start..end).map(|bytes| T::parse(bytes, order))
    }
}
