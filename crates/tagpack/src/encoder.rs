//! `Encoder` — writes [`Value`] trees using the smallest encoding per value.

use tagpack_buffers::Writer;

use crate::constants::*;
use crate::error::EncodeError;
use crate::options::EncodeOptions;
use crate::value::Value;

fn len32(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::TooLong { len })
}

/// Writes values in the tag format read by [`Decoder`](crate::Decoder).
///
/// Integers keep their variant across a round trip: `UInt` only uses the
/// unsigned families and `Int` only the signed ones, so positive fixint is
/// reserved for `UInt`.
#[derive(Debug, Default)]
pub struct Encoder {
    pub writer: Writer,
    options: EncodeOptions,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            writer: Writer::new(),
            options,
        }
    }

    /// Encodes one value and returns its bytes.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        self.writer.reset();
        self.write_any(value)?;
        Ok(self.writer.flush())
    }

    pub fn write_any(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Nil => self.writer.u8(NIL),
            Value::Bool(b) => self.writer.u8(if *b { TRUE } else { FALSE }),
            Value::UInt(u) => self.write_uint(*u),
            Value::Int(i) => self.write_int(*i),
            Value::F32(f) => self.writer.u8f32(FLOAT32, *f),
            Value::F64(f) => self.writer.u8f64(FLOAT64, *f),
            Value::Str(s) => self.write_str(s)?,
            Value::Bin(b) => self.write_bin(b)?,
            Value::Ext { kind, data } => self.write_ext(*kind, data)?,
            Value::Array(items) => {
                self.write_arr_hdr(items.len())?;
                for item in items {
                    self.write_any(item)?;
                }
            }
            Value::Map(map) => {
                self.write_map_hdr(map.len())?;
                for (key, val) in map {
                    self.write_any(key)?;
                    self.write_any(val)?;
                }
            }
        }
        Ok(())
    }

    pub fn write_uint(&mut self, uint: u64) {
        if uint <= POSITIVE_FIXINT_MAX as u64 {
            self.writer.u8(uint as u8);
        } else if uint <= 0xff {
            self.writer.u8(UINT8);
            self.writer.u8(uint as u8);
        } else if uint <= 0xffff {
            self.writer.u8u16(UINT16, uint as u16);
        } else if uint <= 0xffff_ffff {
            self.writer.u8u32(UINT32, uint as u32);
        } else {
            self.writer.u8u64(UINT64, uint);
        }
    }

    pub fn write_int(&mut self, int: i64) {
        if (-32..0).contains(&int) {
            self.writer.i8(int as i8);
        } else if i8::try_from(int).is_ok() {
            self.writer.u8(INT8);
            self.writer.i8(int as i8);
        } else if i16::try_from(int).is_ok() {
            self.writer.u8(INT16);
            self.writer.i16(int as i16);
        } else if i32::try_from(int).is_ok() {
            self.writer.u8(INT32);
            self.writer.i32(int as i32);
        } else {
            self.writer.u8(INT64);
            self.writer.i64(int);
        }
    }

    pub fn write_str_hdr(&mut self, length: usize) -> Result<(), EncodeError> {
        let length = len32(length)?;
        if length as usize <= FIXSTR_MAX {
            self.writer.u8(FIXSTR | length as u8);
        } else if length <= 0xff && !self.options.compatibility_mode {
            self.writer.u8(STR8);
            self.writer.u8(length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(STR16, length as u16);
        } else {
            self.writer.u8u32(STR32, length);
        }
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), EncodeError> {
        self.write_str_hdr(s.len())?;
        self.writer.utf8(s);
        Ok(())
    }

    pub fn write_bin_hdr(&mut self, length: usize) -> Result<(), EncodeError> {
        if self.options.compatibility_mode {
            return self.write_str_hdr(length);
        }
        let length = len32(length)?;
        if length <= 0xff {
            self.writer.u8(BIN8);
            self.writer.u8(length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(BIN16, length as u16);
        } else {
            self.writer.u8u32(BIN32, length);
        }
        Ok(())
    }

    pub fn write_bin(&mut self, buf: &[u8]) -> Result<(), EncodeError> {
        self.write_bin_hdr(buf.len())?;
        self.writer.buf(buf);
        Ok(())
    }

    pub fn write_ext_hdr(&mut self, kind: i8, length: usize) -> Result<(), EncodeError> {
        match length {
            1 => self.writer.u8(FIXEXT1),
            2 => self.writer.u8(FIXEXT2),
            4 => self.writer.u8(FIXEXT4),
            8 => self.writer.u8(FIXEXT8),
            16 => self.writer.u8(FIXEXT16),
            _ => {
                let length = len32(length)?;
                if length <= 0xff {
                    self.writer.u8(EXT8);
                    self.writer.u8(length as u8);
                } else if length <= 0xffff {
                    self.writer.u8u16(EXT16, length as u16);
                } else {
                    self.writer.u8u32(EXT32, length);
                }
            }
        }
        self.writer.i8(kind);
        Ok(())
    }

    pub fn write_ext(&mut self, kind: i8, data: &[u8]) -> Result<(), EncodeError> {
        self.write_ext_hdr(kind, data.len())?;
        self.writer.buf(data);
        Ok(())
    }

    pub fn write_arr_hdr(&mut self, length: usize) -> Result<(), EncodeError> {
        let length = len32(length)?;
        if length as usize <= FIX_CONTAINER_MAX {
            self.writer.u8(FIXARRAY | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(ARRAY16, length as u16);
        } else {
            self.writer.u8u32(ARRAY32, length);
        }
        Ok(())
    }

    pub fn write_map_hdr(&mut self, length: usize) -> Result<(), EncodeError> {
        let length = len32(length)?;
        if length as usize <= FIX_CONTAINER_MAX {
            self.writer.u8(FIXMAP | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(MAP16, length as u16);
        } else {
            self.writer.u8u32(MAP32, length);
        }
        Ok(())
    }
}
