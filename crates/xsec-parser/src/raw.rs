//! Flat arrays of double-precision values with no framing.

use bytes::{Buf, BufMut};

use crate::error::{ParseError, ParseResult};

const F64_SIZE: usize = std::mem::size_of::<f64>();

/// Decode a raw little-endian `f64` array.
pub fn decode_f64_array(data: &[u8]) -> ParseResult<Vec<f64>> {
    if data.len() % F64_SIZE != 0 {
        return Err(ParseError::format_mismatch(format!(
            "{} bytes is not a whole number of f64 values",
            data.len()
        )));
    }

    let mut buf = data;
    let mut values = Vec::with_capacity(data.len() / F64_SIZE);
    while buf.has_remaining() {
        values.push(buf.get_f64_le());
    }
    Ok(values)
}

/// Encode values as a raw little-endian `f64` array.
pub fn encode_f64_array(values: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * F64_SIZE);
    for &value in values {
        bytes.put_f64_le(value);
    }
    bytes
}
