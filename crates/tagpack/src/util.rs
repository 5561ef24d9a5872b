//! Whole-buffer convenience entry points.

use tracing::{debug, trace};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{DecodeError, EncodeError};
use crate::options::{DecodeOptions, EncodeOptions};
use crate::value::Value;

/// Decodes the first value in `bytes`. Trailing bytes are ignored.
pub fn decode_one(bytes: &[u8], compatibility_mode: bool) -> Result<Value, DecodeError> {
    decode_one_with(bytes, DecodeOptions::from(compatibility_mode))
}

pub fn decode_one_with(bytes: &[u8], options: DecodeOptions) -> Result<Value, DecodeError> {
    Decoder::with_options(bytes, options)
        .read_value()
        .inspect_err(|err| debug!(%err, len = bytes.len(), "decode_one failed"))
}

/// Decodes every value in `bytes` until the buffer is exhausted.
///
/// The first failure aborts the whole call, including a final value that is
/// cut short.
pub fn decode_all(bytes: &[u8], compatibility_mode: bool) -> Result<Vec<Value>, DecodeError> {
    decode_all_with(bytes, DecodeOptions::from(compatibility_mode))
}

pub fn decode_all_with(bytes: &[u8], options: DecodeOptions) -> Result<Vec<Value>, DecodeError> {
    trace!(len = bytes.len(), "decode_all");
    let values = Decoder::with_options(bytes, options)
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|err| debug!(%err, len = bytes.len(), "decode_all failed"))?;
    trace!(count = values.len(), "decode_all done");
    Ok(values)
}

pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    Encoder::new().encode(value)
}

/// Encodes with strings and binaries both under the string tags.
pub fn encode_compat(value: &Value) -> Result<Vec<u8>, EncodeError> {
    Encoder::with_options(EncodeOptions::compat()).encode(value)
}
