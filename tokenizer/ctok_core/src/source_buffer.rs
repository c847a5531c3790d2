//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing the scanner to detect EOF without explicit bounds checking.
//! The total buffer size is rounded up to the next 64-byte boundary, which
//! also provides safe padding for `peek()` near the end of the buffer.
//!
//! # Interior Null Bytes
//!
//! Input is arbitrary binary, so interior `0x00` bytes are ordinary data,
//! not terminators. The buffer tracks `source_len` explicitly and the cursor
//! distinguishes an interior null (`pos < source_len`) from the sentinel
//! (`pos >= source_len`). Nothing in this crate treats the content as a
//! null-terminated string, so lexemes containing NUL survive intact.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a sentinel-terminated, padded buffer.
    ///
    /// # File Size
    ///
    /// Sources larger than `u32::MAX` bytes saturate `source_len`; callers
    /// that can encounter such inputs must reject them before constructing
    /// the buffer (the CLI does).
    pub fn new(source: &[u8]) -> Self {
        let source_len = source.len();

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Zero-filled allocation: the sentinel and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source);

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
        }
    }

    /// The source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_source() {
        let buf = SourceBuffer::new(b"");
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.as_bytes(), b"");
        assert!(buf.cursor().is_eof());
    }

    #[test]
    fn content_preserved_exactly() {
        let buf = SourceBuffer::new(b"int main(void) {}\n");
        assert_eq!(buf.as_bytes(), b"int main(void) {}\n");
        assert_eq!(buf.len(), 18);
    }

    #[test]
    fn sentinel_follows_content() {
        let buf = SourceBuffer::new(b"abc");
        let mut cursor = buf.cursor();
        cursor.advance_n(3);
        assert_eq!(cursor.current(), 0);
        assert!(cursor.is_eof());
    }

    #[test]
    fn padding_rounds_to_cache_line() {
        // 63 content bytes + sentinel fit exactly in one line; 64 need two.
        let buf = SourceBuffer::new(&[b'x'; 63]);
        assert_eq!(buf.len(), 63);
        let buf = SourceBuffer::new(&[b'x'; 64]);
        assert_eq!(buf.len(), 64);
    }

    #[test]
    fn interior_nulls_are_content() {
        let buf = SourceBuffer::new(b"a\0b");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_bytes(), b"a\0b");
        let mut cursor = buf.cursor();
        cursor.advance();
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.is_eof());
    }

    #[test]
    fn non_utf8_bytes_preserved() {
        let raw = [0xFFu8, 0xFE, 0x80, 0x00, 0x7F];
        let buf = SourceBuffer::new(&raw);
        assert_eq!(buf.as_bytes(), &raw);
    }
}
