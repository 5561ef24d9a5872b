//! `Decoder` — recursive-descent decoder driven by the tag byte.

use tagpack_buffers::Subdata;

use crate::constants::*;
use crate::error::DecodeError;
use crate::options::DecodeOptions;
use crate::value::{Map, Value};

/// Decodes values from a byte buffer through a [`Subdata`] cursor.
///
/// Each call to [`read_value`](Self::read_value) consumes exactly one
/// encoded value and leaves the cursor on the first byte after it. The
/// decoder is also an iterator over the top-level values of its buffer; the
/// iterator ends when the buffer is exhausted or right after the first
/// error.
///
/// ```
/// use tagpack::{Decoder, Value};
///
/// let mut decoder = Decoder::new(&[0x92, 0x01, 0xa1, b'x', 0xc3]);
/// assert_eq!(
///     decoder.read_value().unwrap(),
///     Value::Array(vec![Value::UInt(1), Value::from("x")])
/// );
/// assert_eq!(decoder.remaining(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    cursor: Subdata<'a>,
    options: DecodeOptions,
    depth: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        Self::from_subdata(Subdata::new(data), options)
    }

    /// Continues decoding from an existing cursor position.
    pub fn from_subdata(cursor: Subdata<'a>, options: DecodeOptions) -> Self {
        Self {
            cursor,
            options,
            depth: 0,
            failed: false,
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    /// The cursor as it stands now.
    pub fn subdata(&self) -> Subdata<'a> {
        self.cursor
    }

    pub fn into_subdata(self) -> Subdata<'a> {
        self.cursor
    }

    /// Decodes one value at the cursor.
    pub fn read_value(&mut self) -> Result<Value, DecodeError> {
        self.read_any()
    }

    fn read_any(&mut self) -> Result<Value, DecodeError> {
        if self.cursor.is_empty() {
            return Err(DecodeError::InsufficientData {
                offset: self.cursor.offset(),
                needed: 1,
                remaining: 0,
            });
        }
        let tag = self.cursor.take_one();

        match tag {
            // positive fixint
            0x00..=0x7f => Ok(Value::UInt(tag as u64)),
            // fixmap
            0x80..=0x8f => self.read_map((tag - FIXMAP) as usize),
            // fixarray
            0x90..=0x9f => self.read_array((tag - FIXARRAY) as usize),
            // fixstr
            0xa0..=0xbf => self.read_str((tag - FIXSTR) as usize),
            NIL => Ok(Value::Nil),
            UNUSED => Err(DecodeError::InvalidTag {
                offset: self.cursor.offset() - 1,
                tag,
            }),
            FALSE => Ok(Value::Bool(false)),
            TRUE => Ok(Value::Bool(true)),
            BIN8 | BIN16 | BIN32 => {
                let len = self.len(1 << (tag - BIN8))?;
                Ok(Value::Bin(self.bytes(len)?.to_vec()))
            }
            EXT8 | EXT16 | EXT32 => {
                let len = self.len(1 << (tag - EXT8))?;
                self.read_ext(len)
            }
            FLOAT32 => Ok(Value::F32(f32::from_bits(self.uint(4)? as u32))),
            FLOAT64 => Ok(Value::F64(f64::from_bits(self.uint(8)?))),
            UINT8 | UINT16 | UINT32 | UINT64 => {
                Ok(Value::UInt(self.uint(1 << (tag - UINT8))?))
            }
            INT8 => Ok(Value::Int(self.uint(1)? as u8 as i8 as i64)),
            INT16 => Ok(Value::Int(self.uint(2)? as u16 as i16 as i64)),
            INT32 => Ok(Value::Int(self.uint(4)? as u32 as i32 as i64)),
            INT64 => Ok(Value::Int(self.uint(8)? as i64)),
            FIXEXT1..=FIXEXT16 => self.read_ext(1 << (tag - FIXEXT1)),
            STR8 | STR16 | STR32 => {
                let len = self.len(1 << (tag - STR8))?;
                self.read_str(len)
            }
            ARRAY16 | ARRAY32 => {
                let count = self.len(2 << (tag - ARRAY16))?;
                self.read_array(count)
            }
            MAP16 | MAP32 => {
                let count = self.len(2 << (tag - MAP16))?;
                self.read_map(count)
            }
            // negative fixint: -32..=-1
            0xe0..=0xff => Ok(Value::Int(tag as i8 as i64)),
        }
    }

    #[inline]
    fn uint(&mut self, width: usize) -> Result<u64, DecodeError> {
        let offset = self.cursor.offset();
        self.cursor
            .take_uint(width)
            .map_err(|e| DecodeError::at(offset, e))
    }

    #[inline]
    fn len(&mut self, width: usize) -> Result<usize, DecodeError> {
        let offset = self.cursor.offset();
        self.cursor
            .take_len(width)
            .map_err(|e| DecodeError::at(offset, e))
    }

    #[inline]
    fn bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let offset = self.cursor.offset();
        self.cursor
            .take_range(len)
            .map_err(|e| DecodeError::at(offset, e))
    }

    fn read_str(&mut self, len: usize) -> Result<Value, DecodeError> {
        let offset = self.cursor.offset();
        let bytes = self.bytes(len)?;
        if self.options.compatibility_mode {
            return Ok(Value::Bin(bytes.to_vec()));
        }
        std::str::from_utf8(bytes)
            .map(|s| Value::Str(s.to_owned()))
            .map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    fn read_ext(&mut self, len: usize) -> Result<Value, DecodeError> {
        let kind = self.uint(1)? as u8 as i8;
        let data = self.bytes(len)?.to_vec();
        Ok(Value::Ext { kind, data })
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        if let Some(max) = self.options.max_depth {
            if self.depth >= max {
                return Err(DecodeError::DepthLimitExceeded {
                    offset: self.cursor.offset(),
                    max,
                });
            }
        }
        self.depth += 1;
        Ok(())
    }

    /// Decodes `count` consecutive values. The first failure discards
    /// everything decoded so far.
    fn read_seq(&mut self, count: usize) -> Result<Vec<Value>, DecodeError> {
        // Every value takes at least one byte, so the remaining length bounds
        // how many can actually follow.
        let mut items = Vec::with_capacity(count.min(self.cursor.remaining()));
        for _ in 0..count {
            items.push(self.read_any()?);
        }
        Ok(items)
    }

    fn read_array(&mut self, count: usize) -> Result<Value, DecodeError> {
        self.enter()?;
        let items = self.read_seq(count);
        self.depth -= 1;
        items.map(Value::Array)
    }

    fn read_map(&mut self, count: usize) -> Result<Value, DecodeError> {
        let flat = count
            .checked_mul(2)
            .ok_or_else(|| DecodeError::InsufficientData {
                offset: self.cursor.offset(),
                needed: usize::MAX,
                remaining: self.cursor.remaining(),
            })?;
        self.enter()?;
        let items = self.read_seq(flat);
        self.depth -= 1;

        let items = items?;
        let mut map = Map::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(key), Some(value)) = (items.next(), items.next()) {
            // Later duplicates overwrite earlier ones.
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.is_empty() {
            return None;
        }
        let result = self.read_any();
        self.failed = result.is_err();
        Some(result)
    }
}

/// Decodes one value at `cursor` and returns it with the advanced cursor.
///
/// `compatibility_mode` turns every string-tag family into binary blobs.
pub fn decode(
    cursor: Subdata<'_>,
    compatibility_mode: bool,
) -> Result<(Value, Subdata<'_>), DecodeError> {
    decode_with(cursor, &DecodeOptions::from(compatibility_mode))
}

/// [`decode`] with full [`DecodeOptions`].
pub fn decode_with<'a>(
    cursor: Subdata<'a>,
    options: &DecodeOptions,
) -> Result<(Value, Subdata<'a>), DecodeError> {
    let mut decoder = Decoder::from_subdata(cursor, *options);
    let value = decoder.read_value()?;
    Ok((value, decoder.into_subdata()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(bytes: &[u8]) -> Result<Value, DecodeError> {
        Decoder::new(bytes).read_value()
    }

    #[test]
    fn fixints() {
        assert_eq!(one(&[0x00]), Ok(Value::UInt(0)));
        assert_eq!(one(&[0x7f]), Ok(Value::UInt(127)));
        assert_eq!(one(&[0xff]), Ok(Value::Int(-1)));
        assert_eq!(one(&[0xe0]), Ok(Value::Int(-32)));
    }

    #[test]
    fn sized_integers() {
        assert_eq!(one(&[0xcc, 0xff]), Ok(Value::UInt(255)));
        assert_eq!(one(&[0xcd, 0x01, 0x00]), Ok(Value::UInt(256)));
        assert_eq!(one(&[0xce, 0xff, 0xff, 0xff, 0xff]), Ok(Value::UInt(u32::MAX as u64)));
        assert_eq!(one(&[0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]), Ok(Value::UInt(u64::MAX)));
        assert_eq!(one(&[0xd0, 0x80]), Ok(Value::Int(-128)));
        assert_eq!(one(&[0xd0, 0x7f]), Ok(Value::Int(127)));
        assert_eq!(one(&[0xd1, 0xff, 0x38]), Ok(Value::Int(-200)));
        assert_eq!(one(&[0xd2, 0x80, 0x00, 0x00, 0x00]), Ok(Value::Int(i32::MIN as i64)));
        assert_eq!(one(&[0xd3, 0x80, 0, 0, 0, 0, 0, 0, 0]), Ok(Value::Int(i64::MIN)));
    }

    #[test]
    fn floats() {
        assert_eq!(one(&[0xca, 0x3f, 0xc0, 0x00, 0x00]), Ok(Value::F32(1.5)));
        assert_eq!(one(&[0xcb, 0xbf, 0xf0, 0, 0, 0, 0, 0, 0]), Ok(Value::F64(-1.0)));
    }

    #[test]
    fn unused_tag_is_invalid() {
        assert_eq!(
            one(&[0xc1]),
            Err(DecodeError::InvalidTag { offset: 0, tag: 0xc1 })
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            one(&[]),
            Err(DecodeError::InsufficientData {
                offset: 0,
                needed: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn strings_and_compat() {
        assert_eq!(one(&[0xa2, b'h', b'i']), Ok(Value::from("hi")));
        let mut compat = Decoder::with_options(&[0xa2, b'h', b'i'], DecodeOptions::compat());
        assert_eq!(compat.read_value(), Ok(Value::Bin(b"hi".to_vec())));
        assert_eq!(
            one(&[0xa2, 0xff, 0xfe]),
            Err(DecodeError::InvalidUtf8 { offset: 1 })
        );
    }

    #[test]
    fn compat_mode_reaches_nested_values() {
        let bytes = [0x91, 0x81, 0xa1, b'k', 0xd9, 0x01, b'v'];
        let (value, rest) = decode(Subdata::new(&bytes), true).unwrap();
        assert!(rest.is_empty());
        assert_eq!(
            value,
            Value::Array(vec![Value::map([(
                Value::Bin(b"k".to_vec()),
                Value::Bin(b"v".to_vec())
            )])])
        );
    }

    #[test]
    fn ext_families() {
        assert_eq!(one(&[0xd4, 0x05, 0x7f]), Ok(Value::ext(5, vec![0x7fu8])));
        assert_eq!(one(&[0xd5, 0xff, 1, 2]), Ok(Value::ext(-1, vec![1u8, 2])));
        assert_eq!(one(&[0xc7, 0x00, 0x02]), Ok(Value::ext(2, Vec::<u8>::new())));
        assert_eq!(
            one(&[0xc8, 0x00, 0x03, 0x10, 7, 8, 9]),
            Ok(Value::ext(16, vec![7u8, 8, 9]))
        );
    }

    #[test]
    fn map_last_write_wins() {
        let value = one(&[0x82, 0x01, 0x0a, 0x01, 0x0b]).unwrap();
        assert_eq!(value, Value::map([(Value::UInt(1), Value::UInt(11))]));
        assert_eq!(value.as_map().map(|m| m.len()), Some(1));
    }

    #[test]
    fn partial_array_is_discarded() {
        let err = one(&[0x93, 0x01, 0x02]).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn hostile_count_does_not_preallocate() {
        let err = one(&[0xdd, 0xff, 0xff, 0xff, 0xff]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InsufficientData {
                offset: 5,
                needed: 1,
                remaining: 0
            }
        );
    }

    #[test]
    fn depth_limit() {
        let nested = [0x91, 0x91, 0x91, 0x01];
        let opts = DecodeOptions::new().max_depth(2);
        let err = Decoder::with_options(&nested, opts).read_value().unwrap_err();
        assert_eq!(err, DecodeError::DepthLimitExceeded { offset: 3, max: 2 });

        let opts = DecodeOptions::new().max_depth(3);
        assert!(Decoder::with_options(&nested, opts).read_value().is_ok());
        assert!(Decoder::new(&nested).read_value().is_ok());
    }

    #[test]
    fn depth_counter_resets_between_siblings() {
        let bytes = [0x92, 0x91, 0x01, 0x91, 0x02];
        let opts = DecodeOptions::new().max_depth(2);
        assert!(Decoder::with_options(&bytes, opts).read_value().is_ok());
    }

    #[test]
    fn iterator_stops_after_error() {
        let bytes = [0x01, 0xc1, 0x02];
        let results: Vec<_> = Decoder::new(&bytes).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], Ok(Value::UInt(1)));
        assert!(results[1].is_err());
    }

    #[test]
    fn decode_threads_cursor() {
        let bytes = [0x01, 0xa1, b'a', 0xc0];
        let cursor = Subdata::new(&bytes);
        let (first, cursor) = decode(cursor, false).unwrap();
        let (second, cursor) = decode(cursor, false).unwrap();
        let (third, cursor) = decode(cursor, false).unwrap();
        assert_eq!(first, Value::UInt(1));
        assert_eq!(second, Value::from("a"));
        assert_eq!(third, Value::Nil);
        assert!(cursor.is_empty());
    }
}
