//! Lazy UTF-8 decoding over raw text bytes.

use core::fmt;

/// Malformed UTF-8 at `offset` bytes into the input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Utf8Error {
    offset: usize,
}

impl Utf8Error {
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid UTF-8 sequence at byte {}", self.offset)
    }
}

impl core::error::Error for Utf8Error {}

/// Yields `(code point, encoded length)` pairs.
///
/// Cloning restarts from the clone's position. After the first error the
/// decoder yields nothing more.
#[derive(Clone, Debug)]
pub struct Utf8Decoder<'a> {
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Utf8Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            failed: false,
        }
    }

    /// Byte offset of the next sequence.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn decode_at(&self, offset: usize) -> Option<(u32, usize)> {
        let lead = *self.bytes.get(offset)?;
        let (len, bits, min) = match lead {
            0x00..=0x7F => return Some((lead as u32, 1)),
            0xC0..=0xDF => (2, lead & 0x1F, 0x80),
            0xE0..=0xEF => (3, lead & 0x0F, 0x800),
            0xF0..=0xF7 => (4, lead & 0x07, 0x1_0000),
            _ => return None,
        };

        let tail = self.bytes.get(offset + 1..offset + len)?;
        let mut codepoint = bits as u32;
        for &byte in tail {
            if byte & 0xC0 != 0x80 {
                return None;
            }
            codepoint = (codepoint << 6) | (byte & 0x3F) as u32;
        }

        // Overlong forms, surrogates and values past the Unicode range.
        if codepoint < min || (0xD800..=0xDFFF).contains(&codepoint) || codepoint > 0x10_FFFF {
            return None;
        }

        Some((codepoint, len))
    }
}

impl Iterator for Utf8Decoder<'_> {
    type Item = Result<(u32, usize), Utf8Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }

        match self.decode_at(self.offset) {
            Some((codepoint, len)) => {
                self.offset += len;
                Some(Ok((codepoint, len)))
            }
            None => {
                self.failed = true;
                Some(Err(Utf8Error {
                    offset: self.offset,
                }))
            }
        }
    }
}

impl core::iter::FusedIterator for Utf8Decoder<'_> {}
