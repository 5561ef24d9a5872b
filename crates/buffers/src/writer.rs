//! Growable big-endian byte writer.

/// A binary writer that appends to an internal buffer.
///
/// All multi-byte integers and floats are written big-endian, matching the
/// wire format read back by [`Subdata`](crate::Subdata).
///
/// # Example
///
/// ```
/// use tagpack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0203);
/// let data = writer.flush();
/// assert_eq!(data, [0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Writer {
    uint8: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with room for `capacity` bytes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Discards everything written since the last flush.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Returns the written bytes and leaves the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Bytes written so far, without flushing.
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.uint8.push(val as u8);
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.u32(val.to_bits());
    }

    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.u64(val.to_bits());
    }

    /// Writes a marker byte followed by a 16-bit value.
    pub fn u8u16(&mut self, marker: u8, val: u16) {
        self.u8(marker);
        self.u16(val);
    }

    /// Writes a marker byte followed by a 32-bit value.
    pub fn u8u32(&mut self, marker: u8, val: u32) {
        self.u8(marker);
        self.u32(val);
    }

    /// Writes a marker byte followed by a 64-bit value.
    pub fn u8u64(&mut self, marker: u8, val: u64) {
        self.u8(marker);
        self.u64(val);
    }

    pub fn u8f32(&mut self, marker: u8, val: f32) {
        self.u8(marker);
        self.f32(val);
    }

    pub fn u8f64(&mut self, marker: u8, val: f64) {
        self.u8(marker);
        self.f64(val);
    }

    /// Appends raw bytes.
    pub fn buf(&mut self, buf: &[u8]) {
        self.uint8.extend_from_slice(buf);
    }

    /// Appends the UTF-8 bytes of `s` and returns how many were written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.buf(s.as_bytes());
        s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_big_endian() {
        let mut writer = Writer::new();
        writer.u16(0x0102);
        writer.u32(0x03040506);
        writer.i16(-2);
        assert_eq!(writer.flush(), [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0xff, 0xfe]);
    }

    #[test]
    fn test_u64_and_i64() {
        let mut writer = Writer::new();
        writer.u64(0x0102030405060708);
        writer.i64(-1);
        let data = writer.flush();
        assert_eq!(&data[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&data[8..], &[0xff; 8]);
    }

    #[test]
    fn test_floats() {
        let mut writer = Writer::new();
        writer.u8f32(0xca, 1.5);
        assert_eq!(writer.flush(), [0xca, 0x3f, 0xc0, 0x00, 0x00]);

        writer.u8f64(0xcb, 1.0);
        assert_eq!(writer.flush(), [0xcb, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_flush_empties_writer() {
        let mut writer = Writer::new();
        writer.utf8("hi");
        assert_eq!(writer.len(), 2);
        assert_eq!(writer.flush(), b"hi");
        assert!(writer.is_empty());
    }

    #[test]
    fn test_marker_helpers() {
        let mut writer = Writer::with_capacity(16);
        writer.u8u16(0xcd, 0x0100);
        writer.u8u32(0xce, 1);
        assert_eq!(writer.as_slice(), &[0xcd, 0x01, 0x00, 0xce, 0, 0, 0, 1]);
        writer.reset();
        assert!(writer.is_empty());
    }
}
