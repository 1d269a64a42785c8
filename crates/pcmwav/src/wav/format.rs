//! WAV format parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{WavError, WavResult};

/// Bytes used to store one sample.
///
/// Serialized as the byte count (`1`, `2`, `3` or `4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SampleWidth {
    /// 8-bit unsigned samples, midpoint 128.
    U8,
    /// 16-bit signed samples.
    I16,
    /// 24-bit signed samples.
    I24,
    /// 32-bit signed samples.
    I32,
}

impl SampleWidth {
    /// All supported widths, narrowest first.
    pub const ALL: [SampleWidth; 4] = [
        SampleWidth::U8,
        SampleWidth::I16,
        SampleWidth::I24,
        SampleWidth::I32,
    ];

    /// Looks up a width by its byte count.
    pub fn from_bytes(bytes: u32) -> WavResult<Self> {
        match bytes {
            1 => Ok(SampleWidth::U8),
            2 => Ok(SampleWidth::I16),
            3 => Ok(SampleWidth::I24),
            4 => Ok(SampleWidth::I32),
            width => Err(WavError::InvalidSampleWidth { width }),
        }
    }

    /// Converts a `bits per sample` header field to a width, rounding up to
    /// whole bytes (12-bit data is stored in 2 bytes).
    pub fn from_bits(bits: u16) -> WavResult<Self> {
        if bits == 0 || bits > 32 {
            return Err(WavError::unsupported(format!(
                "{bits} bits per sample (only 8, 16, 24 and 32-bit PCM is supported)"
            )));
        }
        Self::from_bytes(u32::from(bits).div_ceil(8))
    }

    /// Bytes per sample.
    pub fn bytes(self) -> usize {
        match self {
            SampleWidth::U8 => 1,
            SampleWidth::I16 => 2,
            SampleWidth::I24 => 3,
            SampleWidth::I32 => 4,
        }
    }

    /// Bits per sample.
    pub fn bits(self) -> u16 {
        self.bytes() as u16 * 8
    }

    /// 8-bit WAV data is unsigned; every wider width is two's complement.
    pub fn is_signed(self) -> bool {
        self != SampleWidth::U8
    }

    /// Smallest storable value.
    pub fn min_value(self) -> i64 {
        if self.is_signed() {
            -(1i64 << (self.bits() - 1))
        } else {
            0
        }
    }

    /// Largest storable value.
    pub fn max_value(self) -> i64 {
        if self.is_signed() {
            (1i64 << (self.bits() - 1)) - 1
        } else {
            255
        }
    }

    /// Value representing silence.
    pub fn midpoint(self) -> i64 {
        if self.is_signed() {
            0
        } else {
            128
        }
    }

    /// Whether `value` fits the width.
    pub fn contains(self, value: i64) -> bool {
        (self.min_value()..=self.max_value()).contains(&value)
    }
}

impl TryFrom<u8> for SampleWidth {
    type Error = WavError;

    fn try_from(bytes: u8) -> WavResult<Self> {
        Self::from_bytes(u32::from(bytes))
    }
}

impl From<SampleWidth> for u8 {
    fn from(width: SampleWidth) -> u8 {
        width.bytes() as u8
    }
}

impl fmt::Display for SampleWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

impl FromStr for SampleWidth {
    type Err = WavError;

    /// Accepts a byte count (`"3"`) or a bit depth (`"24-bit"`, `"24bit"`).
    fn from_str(s: &str) -> WavResult<Self> {
        let s = s.trim();
        let bits = s.strip_suffix("-bit").or_else(|| s.strip_suffix("bit"));
        let parsed = match bits {
            Some(bits) => bits.trim().parse::<u16>().ok().and_then(|bits| {
                if bits % 8 == 0 {
                    Self::from_bytes(u32::from(bits / 8)).ok()
                } else {
                    None
                }
            }),
            None => s.parse::<u32>().ok().and_then(|b| Self::from_bytes(b).ok()),
        };
        parsed.ok_or_else(|| {
            WavError::invalid_param("sample width", format!("'{s}' is not 1, 2, 3 or 4 bytes"))
        })
    }
}

/// Format parameters stored in the `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Bytes per sample.
    pub sample_width: SampleWidth,
}

impl WavHeader {
    /// Creates a header, rejecting a zero sample rate or channel count.
    pub fn new(sample_rate: u32, channels: u16, sample_width: SampleWidth) -> WavResult<Self> {
        if sample_rate == 0 {
            return Err(WavError::invalid_param("rate", "sample rate must be positive"));
        }
        if channels == 0 {
            return Err(WavError::invalid_param(
                "channels",
                "channel count must be positive",
            ));
        }
        Ok(Self {
            sample_rate,
            channels,
            sample_width,
        })
    }

    /// Bits per sample as written to the header.
    pub fn bits_per_sample(&self) -> u16 {
        self.sample_width.bits()
    }

    /// Bytes per frame (one sample for every channel).
    pub fn block_align(&self) -> usize {
        usize::from(self.channels) * self.sample_width.bytes()
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u64 {
        u64::from(self.sample_rate) * self.block_align() as u64
    }
}
