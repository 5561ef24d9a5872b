//! Decoder and encoder error types.

use tagpack_buffers::BufferError;
use thiserror::Error;

/// Coarse classification of a [`DecodeError`].
///
/// `InsufficientData` means the buffer ended early and a longer buffer could
/// still decode; `InvalidData` means the bytes are wrong no matter what
/// follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InsufficientData,
    InvalidData,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// An internal read was asked for an unsupported width.
    #[error("invalid read width {width}")]
    InvalidArgument { width: usize },
    #[error("insufficient data at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    InsufficientData {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("invalid tag {tag:#04x} at offset {offset}")]
    InvalidTag { offset: usize, tag: u8 },
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("nesting deeper than {max} at offset {offset}")]
    DepthLimitExceeded { offset: usize, max: usize },
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            DecodeError::InsufficientData { .. } => ErrorKind::InsufficientData,
            DecodeError::InvalidTag { .. }
            | DecodeError::InvalidUtf8 { .. }
            | DecodeError::DepthLimitExceeded { .. } => ErrorKind::InvalidData,
        }
    }

    pub fn is_insufficient_data(&self) -> bool {
        self.kind() == ErrorKind::InsufficientData
    }

    /// Attaches the cursor offset at which a buffer read failed.
    pub(crate) fn at(offset: usize, err: BufferError) -> Self {
        match err {
            BufferError::InvalidArgument { width } => DecodeError::InvalidArgument { width },
            BufferError::InsufficientData { needed, remaining } => DecodeError::InsufficientData {
                offset,
                needed,
                remaining,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A string, binary, extension, or container is longer than a 32-bit
    /// length field can express.
    #[error("length {len} exceeds the 32-bit length field")]
    TooLong { len: usize },
}
