//! Record-framed k-table sample streams.
//!
//! Each sample file is a sequence of sequential unformatted records, one
//! `f64` per record. Viewed as 32-bit words a record is
//!
//! ```text
//! [ length marker | low half | high half | length marker ]
//! ```
//!
//! The markers are skipped, never reinterpreted. The halves are gathered
//! into two sequences, interleaved back into word pairs and each pair is
//! reassembled into one `f64`. The flat result is reshaped into rows of
//! g-point values, one row per wavenumber bin in the file's native order.

use bytes::{Buf, BufMut};
use tracing::debug;

use crate::error::{ParseError, ParseResult};

/// Bytes per framing/data word.
pub const WORD_SIZE: usize = 4;

/// Words per record: leading marker, two data halves, trailing marker.
pub const WORDS_PER_RECORD: usize = 4;

/// Byte length written into the record markers (one `f64`).
const RECORD_PAYLOAD_LEN: u32 = 8;

/// Decode a record-framed stream into its flat sequence of `f64` values.
pub fn decode_record_stream(data: &[u8]) -> ParseResult<Vec<f64>> {
    if data.len() % WORD_SIZE != 0 {
        return Err(ParseError::corrupt_record_stream(format!(
            "{} bytes is not a whole number of {}-byte words",
            data.len(),
            WORD_SIZE
        )));
    }

    let word_count = data.len() / WORD_SIZE;
    if word_count % WORDS_PER_RECORD != 0 {
        return Err(ParseError::corrupt_record_stream(format!(
            "{} words is not a multiple of the {}-word record framing",
            word_count, WORDS_PER_RECORD
        )));
    }

    let records = word_count / WORDS_PER_RECORD;
    let mut first_half = Vec::with_capacity(records);
    let mut second_half = Vec::with_capacity(records);

    let mut buf = data;
    while buf.has_remaining() {
        let _leading = buf.get_u32_le();
        first_half.push(buf.get_u32_le());
        second_half.push(buf.get_u32_le());
        let _trailing = buf.get_u32_le();
    }

    let mut combined = Vec::with_capacity(records * 2);
    for (first, second) in first_half.iter().zip(&second_half) {
        combined.push(*first);
        combined.push(*second);
    }

    let values = combined
        .chunks_exact(2)
        .map(|pair| f64::from_bits(u64::from(pair[0]) | (u64::from(pair[1]) << 32)))
        .collect::<Vec<_>>();

    debug!(records, "Decoded record stream");
    Ok(values)
}

/// Encode values as a record-framed stream, one `f64` per record.
pub fn encode_record_stream(values: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * WORDS_PER_RECORD * WORD_SIZE);
    for &value in values {
        bytes.put_u32_le(RECORD_PAYLOAD_LEN);
        bytes.put_f64_le(value);
        bytes.put_u32_le(RECORD_PAYLOAD_LEN);
    }
    bytes
}

/// Row-major `[rows][g_points]` block decoded from one sample file.
#[derive(Debug, Clone, PartialEq)]
pub struct GPointRows {
    values: Vec<f64>,
    g_points: usize,
}

impl GPointRows {
    /// Reshape a flat sequence into rows of `g_points` contiguous values.
    pub fn from_flat(values: Vec<f64>, g_points: usize) -> ParseResult<Self> {
        if g_points == 0 {
            return Err(ParseError::format_mismatch("g-point count must be > 0"));
        }
        if values.len() % g_points != 0 {
            return Err(ParseError::format_mismatch(format!(
                "{} values cannot be reshaped into rows of {} g-points",
                values.len(),
                g_points
            )));
        }
        Ok(Self { values, g_points })
    }

    /// Number of rows (wavenumber bins).
    pub fn rows(&self) -> usize {
        self.values.len() / self.g_points
    }

    pub fn g_points(&self) -> usize {
        self.g_points
    }

    /// The g-point values of one row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.rows()`.
    pub fn row(&self, index: usize) -> &[f64] {
        &self.values[index * self.g_points..(index + 1) * self.g_points]
    }

    /// Flat row-major view.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }
}

/// Decode a record-framed stream and reshape it into g-point rows.
pub fn decode_g_point_rows(data: &[u8], g_points: usize) -> ParseResult<GPointRows> {
    let values = decode_record_stream(data)?;
    GPointRows::from_flat(values, g_points)
}
