//! Rectangular sample storage.
//!
//! Samples are stored interleaved (row-major): frame `f`, channel `c` lives at
//! index `f * channels + c`, which is also the order WAV data chunks use.

use crate::error::{WavError, WavResult};
use crate::wav::SampleWidth;

/// A (frames, channels) array of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Frames<T> {
    samples: Vec<T>,
    channels: usize,
}

/// Integer samples as decoded from, or packed into, a data chunk.
pub type SampleBuffer = Frames<i32>;

/// Floating point samples awaiting conversion by the scaling engine.
pub type FloatBuffer = Frames<f64>;

impl<T> Frames<T> {
    /// Wraps interleaved samples.
    ///
    /// Fails if `channels` is zero or the sample count is not a whole number
    /// of frames.
    pub fn new(samples: Vec<T>, channels: usize) -> WavResult<Self> {
        if channels == 0 {
            return Err(WavError::invalid_param(
                "channels",
                "channel count must be positive",
            ));
        }
        if samples.len() % channels != 0 {
            return Err(WavError::invalid_param(
                "samples",
                format!(
                    "{} samples do not divide evenly into {channels} channels",
                    samples.len()
                ),
            ));
        }
        Ok(Self { samples, channels })
    }

    /// Single-channel buffer.
    pub fn mono(samples: Vec<T>) -> Self {
        Self {
            samples,
            channels: 1,
        }
    }

    /// Number of channels (columns).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of frames (rows).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Total number of samples across all channels.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    /// Consumes the buffer, returning the interleaved samples.
    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }

    /// The samples of one frame, one per channel.
    pub fn frame(&self, frame: usize) -> Option<&[T]> {
        let start = frame.checked_mul(self.channels)?;
        self.samples.get(start..start + self.channels)
    }

    /// Iterates frames in order.
    pub fn iter_frames(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.samples.chunks_exact(self.channels)
    }

    /// Applies `f` to every sample, keeping the geometry.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Frames<U> {
        Frames {
            samples: self.samples.iter().map(f).collect(),
            channels: self.channels,
        }
    }
}

impl<T: Copy> Frames<T> {
    /// Builds an interleaved buffer from one vector per channel.
    ///
    /// All channels must have the same length.
    pub fn from_channels(channels: &[Vec<T>]) -> WavResult<Self> {
        let Some(first) = channels.first() else {
            return Err(WavError::invalid_param(
                "channels",
                "at least one channel is required",
            ));
        };
        let frames = first.len();
        if let Some(bad) = channels.iter().position(|c| c.len() != frames) {
            return Err(WavError::invalid_param(
                "channels",
                format!(
                    "channel {bad} has {} samples, expected {frames}",
                    channels[bad].len()
                ),
            ));
        }

        let mut samples = Vec::with_capacity(frames * channels.len());
        for frame in 0..frames {
            samples.extend(channels.iter().map(|c| c[frame]));
        }
        Ok(Self {
            samples,
            channels: channels.len(),
        })
    }

    /// The sample at (frame, channel).
    pub fn get(&self, frame: usize, channel: usize) -> Option<T> {
        if channel >= self.channels {
            return None;
        }
        self.frame(frame).map(|f| f[channel])
    }

    /// Iterates one channel (column).
    pub fn channel(&self, channel: usize) -> impl Iterator<Item = T> + '_ {
        let skip = if channel < self.channels {
            channel
        } else {
            self.samples.len()
        };
        self.samples.iter().skip(skip).step_by(self.channels).copied()
    }
}

/// Integer types with a conventional WAV sample width.
///
/// Integer input written without an explicit width uses this width.
pub trait NativeSample: Copy + Into<i64> {
    /// Width chosen when none is given.
    const WIDTH: SampleWidth;
}

macro_rules! native_sample {
    ($($ty:ty => $width:expr),* $(,)?) => {
        $(
            impl NativeSample for $ty {
                const WIDTH: SampleWidth = $width;
            }

            impl From<Frames<$ty>> for SampleInput {
                fn from(frames: Frames<$ty>) -> Self {
                    SampleInput::integer(frames)
                }
            }
        )*
    };
}

native_sample! {
    u8 => SampleWidth::U8,
    i8 => SampleWidth::U8,
    u16 => SampleWidth::I16,
    i16 => SampleWidth::I16,
    u32 => SampleWidth::I32,
    i32 => SampleWidth::I32,
}

/// Data handed to the write entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleInput {
    /// Integer samples; only clipped, never scaled or shifted.
    Integer {
        /// The samples, widened so any source integer type fits.
        samples: Frames<i64>,
        /// Default output width, if the source type implies one.
        native_width: Option<SampleWidth>,
    },
    /// Floating point samples, converted by the scaling engine.
    Float(FloatBuffer),
}

impl SampleInput {
    /// Integer input whose default width comes from the element type.
    pub fn integer<T: NativeSample>(frames: Frames<T>) -> Self {
        SampleInput::Integer {
            samples: frames.map(|&s| s.into()),
            native_width: Some(T::WIDTH),
        }
    }

    /// Integer input with no default width; the writer must be told one.
    pub fn wide_integer(samples: Frames<i64>) -> Self {
        SampleInput::Integer {
            samples,
            native_width: None,
        }
    }

    /// Floating point input.
    pub fn float(samples: FloatBuffer) -> Self {
        SampleInput::Float(samples)
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            SampleInput::Integer { samples, .. } => samples.channels(),
            SampleInput::Float(samples) => samples.channels(),
        }
    }

    /// Number of frames.
    pub fn frames(&self) -> usize {
        match self {
            SampleInput::Integer { samples, .. } => samples.frames(),
            SampleInput::Float(samples) => samples.frames(),
        }
    }
}

impl From<FloatBuffer> for SampleInput {
    fn from(frames: FloatBuffer) -> Self {
        SampleInput::Float(frames)
    }
}

impl From<Frames<i64>> for SampleInput {
    fn from(frames: Frames<i64>) -> Self {
        SampleInput::wide_integer(frames)
    }
}
