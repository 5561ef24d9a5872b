//! Byte buffer primitives for tagpack.
//!
//! # Overview
//!
//! - [`Subdata`] - zero-copy cursor over a byte slice with a forward-only offset
//! - [`Writer`] - appends big-endian binary data to a growable buffer
//!
//! # Example
//!
//! ```
//! use tagpack_buffers::{Subdata, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! let mut cursor = Subdata::new(&data);
//! assert_eq!(cursor.take_one(), 0x01);
//! assert_eq!(cursor.take_uint(2), Ok(0x0203));
//! assert_eq!(cursor.take_range(5), Ok(&b"hello"[..]));
//! assert!(cursor.is_empty());
//! ```

mod subdata;
mod writer;

pub use subdata::Subdata;
pub use writer::Writer;

use thiserror::Error;

/// Error type for cursor reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A fixed-width read was asked for zero bytes or more than eight.
    #[error("invalid read width {width}")]
    InvalidArgument { width: usize },
    /// Fewer bytes remain than the read needs.
    #[error("insufficient data: needed {needed} bytes, {remaining} remaining")]
    InsufficientData { needed: usize, remaining: usize },
}
