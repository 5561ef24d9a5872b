//! Zero-copy byte cursor with a forward-only offset.

use crate::BufferError;

/// A cursor over an immutable byte slice.
///
/// `Subdata` never copies the buffer it views. The only mutation is moving
/// `offset` forward, and `offset <= data.len()` always holds. The type is
/// `Copy`, so a caller can keep a snapshot of a position by value while a
/// decoder advances its own copy.
///
/// # Example
///
/// ```
/// use tagpack_buffers::Subdata;
///
/// let data = [0xcd, 0x01, 0x02, 0xff];
/// let mut cursor = Subdata::new(&data);
///
/// assert_eq!(cursor.take_one(), 0xcd);
/// assert_eq!(cursor.take_uint(2), Ok(0x0102));
/// assert_eq!(cursor.remaining(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subdata<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Subdata<'a> {
    /// Creates a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offset == self.data.len()
    }

    /// The whole underlying buffer, including consumed bytes.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The unconsumed tail. Does not advance.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    /// Looks at the next byte without advancing.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Takes the next byte.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is empty. Callers check [`is_empty`](Self::is_empty)
    /// first; this read carries no check of its own.
    #[inline]
    pub fn take_one(&mut self) -> u8 {
        let byte = self.data[self.offset];
        self.offset += 1;
        byte
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if n > remaining {
            Err(BufferError::InsufficientData {
                needed: n,
                remaining,
            })
        } else {
            Ok(())
        }
    }

    /// Borrows the next `n` bytes and advances past them.
    pub fn take_range(&mut self, n: usize) -> Result<&'a [u8], BufferError> {
        self.check(n)?;
        let start = self.offset;
        self.offset += n;
        Ok(&self.data[start..self.offset])
    }

    /// Copies the next `n` bytes out and advances past them.
    pub fn take_range_owned(&mut self, n: usize) -> Result<Vec<u8>, BufferError> {
        self.take_range(n).map(<[u8]>::to_vec)
    }

    /// Reads a `width`-byte big-endian unsigned integer.
    ///
    /// `width` must be between 1 and 8. The value is assembled one byte at a
    /// time, so it is independent of host endianness and alignment. The
    /// offset does not move when an error is returned.
    pub fn take_uint(&mut self, width: usize) -> Result<u64, BufferError> {
        if width == 0 || width > 8 {
            return Err(BufferError::InvalidArgument { width });
        }
        self.check(width)?;
        let mut val = 0u64;
        for _ in 0..width {
            val = (val << 8) | self.take_one() as u64;
        }
        Ok(val)
    }

    /// Reads a length field of `width` bytes as a `usize`.
    ///
    /// A length that does not fit the platform's `usize` can never be
    /// satisfied by an in-memory buffer, so it is reported as missing data.
    pub fn take_len(&mut self, width: usize) -> Result<usize, BufferError> {
        let before = *self;
        let len = self.take_uint(width)?;
        usize::try_from(len).map_err(|_| {
            *self = before;
            BufferError::InsufficientData {
                needed: usize::MAX,
                remaining: self.remaining(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_one() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = Subdata::new(&data);
        assert_eq!(cursor.take_one(), 0x01);
        assert_eq!(cursor.take_one(), 0x02);
        assert_eq!(cursor.take_one(), 0x03);
        assert!(cursor.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_take_one_on_empty_panics() {
        let data: [u8; 0] = [];
        let mut cursor = Subdata::new(&data);
        cursor.take_one();
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0x55u8];
        let cursor = Subdata::new(&data);
        assert_eq!(cursor.peek(), Some(0x55));
        assert_eq!(cursor.offset(), 0);
        assert_eq!(Subdata::new(&[]).peek(), None);
    }

    #[test]
    fn test_take_range_borrows() {
        let data = [1u8, 2, 3, 4, 5];
        let mut cursor = Subdata::new(&data);
        let range = cursor.take_range(3).unwrap();
        assert_eq!(range, &[1, 2, 3]);
        assert_eq!(range.as_ptr(), data.as_ptr());
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.rest(), &[4, 5]);
    }

    #[test]
    fn test_take_range_zero() {
        let data: [u8; 0] = [];
        let mut cursor = Subdata::new(&data);
        assert_eq!(cursor.take_range(0), Ok(&[][..]));
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_take_range_insufficient() {
        let data = [1u8, 2];
        let mut cursor = Subdata::new(&data);
        assert_eq!(
            cursor.take_range(5),
            Err(BufferError::InsufficientData {
                needed: 5,
                remaining: 2
            })
        );
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_take_range_owned() {
        let data = [9u8, 8, 7];
        let mut cursor = Subdata::new(&data);
        cursor.take_one();
        assert_eq!(cursor.take_range_owned(2), Ok(vec![8, 7]));
    }

    #[test]
    fn test_take_uint_widths() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(Subdata::new(&data).take_uint(1), Ok(0x01));
        assert_eq!(Subdata::new(&data).take_uint(2), Ok(0x0102));
        assert_eq!(Subdata::new(&data).take_uint(4), Ok(0x01020304));
        assert_eq!(
            Subdata::new(&data).take_uint(8),
            Ok(0x0102030405060708)
        );
    }

    #[test]
    fn test_take_uint_invalid_width() {
        let data = [0u8; 16];
        let mut cursor = Subdata::new(&data);
        assert_eq!(
            cursor.take_uint(0),
            Err(BufferError::InvalidArgument { width: 0 })
        );
        assert_eq!(
            cursor.take_uint(9),
            Err(BufferError::InvalidArgument { width: 9 })
        );
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_take_uint_insufficient_keeps_offset() {
        let data = [0x01u8, 0x02, 0x03];
        let mut cursor = Subdata::new(&data);
        assert_eq!(
            cursor.take_uint(4),
            Err(BufferError::InsufficientData {
                needed: 4,
                remaining: 3
            })
        );
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_copy_snapshot_is_independent() {
        let data = [1u8, 2, 3];
        let mut cursor = Subdata::new(&data);
        let snapshot = cursor;
        cursor.take_one();
        assert_eq!(snapshot.offset(), 0);
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn test_take_len() {
        let data = [0x00u8, 0x10];
        let mut cursor = Subdata::new(&data);
        assert_eq!(cursor.take_len(2), Ok(16));
    }
}
