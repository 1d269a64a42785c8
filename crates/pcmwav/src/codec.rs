//! Read and write entry points.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::{SampleBuffer, SampleInput};
use crate::error::{WavError, WavResult};
use crate::scale::{clip_integers, float_to_integer, ClipPolicy, ClipReport, Scale, Scaled};
use crate::wav::{encode_wav, parse_container, unpack_samples, SampleWidth, WavHeader};

/// Contents of a decoded WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct Wav {
    /// Sample rate in Hz.
    pub rate: u32,
    /// Bytes per sample in the file.
    pub sampwidth: SampleWidth,
    /// Samples exactly as stored; 24-bit values are sign-extended.
    pub data: SampleBuffer,
}

impl Wav {
    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.data.channels()
    }

    /// Number of frames.
    pub fn frames(&self) -> usize {
        self.data.frames()
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.rate as f64
    }

    /// Header describing this data.
    pub fn header(&self) -> WavHeader {
        WavHeader {
            sample_rate: self.rate,
            channels: self.data.channels() as u16,
            sample_width: self.sampwidth,
        }
    }
}

/// Options for the write entry points.
///
/// Deserializes from e.g. `{"sample_width": 3, "scale": "auto", "clip": "raise"}`;
/// every field may be omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriteOptions {
    /// Output width. Defaults to the native width of integer input and is
    /// required for float input.
    pub sample_width: Option<SampleWidth>,
    /// Scaling for float input. Must be unset for integer input.
    pub scale: Option<Scale>,
    /// Reaction to clipping.
    pub clip: ClipPolicy,
}

impl WriteOptions {
    /// Sets the output sample width.
    pub fn with_sample_width(mut self, width: SampleWidth) -> Self {
        self.sample_width = Some(width);
        self
    }

    /// Sets the scale for float input.
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the clip policy.
    pub fn with_clip(mut self, clip: ClipPolicy) -> Self {
        self.clip = clip;
        self
    }
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteReport {
    /// Header that was written.
    pub header: WavHeader,
    /// Number of frames written.
    pub frames: usize,
    /// Total bytes of the WAV stream.
    pub bytes: usize,
    /// Clipping that occurred, unless the policy turned it into an error.
    pub clip: Option<ClipReport>,
}

/// Decodes a complete WAV file held in memory.
pub fn decode(bytes: &[u8]) -> WavResult<Wav> {
    let container = parse_container(bytes)?;
    let header = container.header;
    let data = unpack_samples(
        container.data(bytes),
        usize::from(header.channels),
        header.sample_width,
    )?;
    Ok(Wav {
        rate: header.sample_rate,
        sampwidth: header.sample_width,
        data,
    })
}

/// Reads and decodes a WAV stream.
pub fn read<R: Read>(mut reader: R) -> WavResult<Wav> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}

/// Reads and decodes a WAV file.
pub fn read_file(path: impl AsRef<Path>) -> WavResult<Wav> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Converts `input` to integers of the chosen width, applying the clip policy.
pub fn convert(input: &SampleInput, options: &WriteOptions) -> WavResult<(SampleWidth, Scaled)> {
    let scaled = match input {
        SampleInput::Integer {
            samples,
            native_width,
        } => {
            if options.scale.is_some() {
                return Err(WavError::invalid_param(
                    "scale",
                    "must not be set for integer input; integer values are never scaled",
                ));
            }
            let width = options
                .sample_width
                .or(*native_width)
                .ok_or(WavError::MissingWidth)?;
            (width, clip_integers(samples, width))
        }
        SampleInput::Float(samples) => {
            let width = options.sample_width.ok_or(WavError::MissingWidth)?;
            (width, float_to_integer(samples, width, options.scale)?)
        }
    };
    options.clip.check(scaled.1.clip.as_ref())?;
    Ok(scaled)
}

/// Encodes `input` as a complete WAV file in memory.
pub fn encode(
    input: &SampleInput,
    rate: u32,
    options: &WriteOptions,
) -> WavResult<(Vec<u8>, WriteReport)> {
    let (width, scaled) = convert(input, options)?;
    let bytes = encode_wav(&scaled.samples, width, rate)?;

    let report = WriteReport {
        header: WavHeader::new(rate, scaled.samples.channels() as u16, width)?,
        frames: scaled.samples.frames(),
        bytes: bytes.len(),
        clip: scaled.clip,
    };
    Ok((bytes, report))
}

/// Encodes `input` and writes it to `writer`.
///
/// Nothing is written if conversion fails.
pub fn write<W: Write>(
    mut writer: W,
    input: &SampleInput,
    rate: u32,
    options: &WriteOptions,
) -> WavResult<WriteReport> {
    let (bytes, report) = encode(input, rate, options)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(report)
}

/// Encodes `input` and writes it to the file at `path`.
///
/// The file is only created once encoding has succeeded.
pub fn write_file(
    path: impl AsRef<Path>,
    input: &SampleInput,
    rate: u32,
    options: &WriteOptions,
) -> WavResult<WriteReport> {
    let (bytes, report) = encode(input, rate, options)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(report)
}
