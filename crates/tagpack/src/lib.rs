//! Tag-driven decoder for a MessagePack-style binary format.
//!
//! A byte buffer is read through a zero-copy [`Subdata`] cursor. The
//! [`Decoder`] takes one tag byte, dispatches on it, and recurses into
//! arrays and maps, producing a [`Value`] tree plus the advanced cursor.
//!
//! # Example
//!
//! ```
//! use tagpack::{decode_all, decode_one, Value};
//!
//! let value = decode_one(&[0x82, 0x01, 0x0a, 0x01, 0x0b], false).unwrap();
//! assert_eq!(value, Value::map([(Value::UInt(1), Value::UInt(11))]));
//!
//! let values = decode_all(&[0x01, 0x02], false).unwrap();
//! assert_eq!(values, vec![Value::UInt(1), Value::UInt(2)]);
//! ```

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod options;
pub mod util;
pub mod value;

pub use decoder::{decode, decode_with, Decoder};
pub use encoder::Encoder;
pub use error::{DecodeError, EncodeError, ErrorKind};
pub use options::{DecodeOptions, EncodeOptions};
pub use util::{
    decode_all, decode_all_with, decode_one, decode_one_with, encode, encode_compat,
};
pub use value::{Map, Value};

pub use tagpack_buffers::{BufferError, Subdata};
