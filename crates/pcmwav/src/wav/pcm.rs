//! Packing and unpacking of PCM sample bytes.
//!
//! Every width is handled by the same little-endian byte loop; there is no
//! native 3-byte integer, so 24-bit values are sign-extended by hand.

use crate::buffer::SampleBuffer;
use crate::error::{WavError, WavResult};

use super::format::SampleWidth;

/// Decodes one little-endian sample of `bytes.len()` bytes.
///
/// Sums `byte[i] << (8 * i)`, then for signed widths subtracts
/// `2^(8 * len)` when the top bit is set.
pub fn decode_sample(bytes: &[u8], signed: bool) -> i64 {
    debug_assert!((1..=4).contains(&bytes.len()));

    let value = bytes
        .iter()
        .enumerate()
        .fold(0i64, |acc, (i, &b)| acc | (i64::from(b) << (8 * i)));

    let bits = 8 * bytes.len();
    if signed && value >= 1i64 << (bits - 1) {
        value - (1i64 << bits)
    } else {
        value
    }
}

/// Appends the low `width` bytes of `value` in little-endian order.
pub fn encode_sample(value: i32, width: SampleWidth, out: &mut Vec<u8>) {
    debug_assert!(
        width.contains(i64::from(value)),
        "{value} does not fit a {width} sample"
    );
    out.extend_from_slice(&value.to_le_bytes()[..width.bytes()]);
}

/// Converts data chunk bytes to a (frames, channels) buffer.
pub fn unpack_samples(data: &[u8], channels: usize, width: SampleWidth) -> WavResult<SampleBuffer> {
    if channels == 0 {
        return Err(WavError::invalid_param(
            "channels",
            "channel count must be positive",
        ));
    }

    let frame_size = channels * width.bytes();
    if data.len() % frame_size != 0 {
        return Err(WavError::TruncatedData {
            len: data.len(),
            frame_size,
        });
    }

    let signed = width.is_signed();
    let samples = data
        .chunks_exact(width.bytes())
        .map(|bytes| decode_sample(bytes, signed) as i32)
        .collect();

    SampleBuffer::new(samples, channels)
}

/// Converts a buffer to data chunk bytes.
///
/// Samples must already lie in the range of `width`.
pub fn pack_samples(buffer: &SampleBuffer, width: SampleWidth) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(buffer.len() * width.bytes());
    for &sample in buffer.samples() {
        encode_sample(sample, width, &mut pcm);
    }
    pcm
}
