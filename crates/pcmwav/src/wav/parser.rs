//! RIFF/WAVE container parsing.

use std::io::Cursor;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

use crate::error::{WavError, WavResult};

use super::format::{SampleWidth, WavHeader};

/// `WAVE_FORMAT_PCM`.
pub const FORMAT_PCM: u16 = 0x0001;

/// `WAVE_FORMAT_EXTENSIBLE`; the real format code is in the sub-format GUID.
pub const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Size of the `fmt ` body for plain PCM.
pub const FMT_CHUNK_SIZE: u32 = 16;

const EXTENSIBLE_FMT_SIZE: usize = 40;
const CHUNK_HEADER_SIZE: usize = 8;

/// Location of the sample data inside a parsed WAV stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    /// Format parameters from the `fmt ` chunk.
    pub header: WavHeader,
    /// Offset of the first data byte.
    pub data_offset: usize,
    /// Length of the data chunk in bytes.
    pub data_len: usize,
}

impl Container {
    /// Slices the data chunk out of the bytes this container was parsed from.
    pub fn data<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.data_offset..self.data_offset + self.data_len]
    }
}

/// Parses the RIFF structure of a complete WAV file.
///
/// Chunks other than `fmt ` and `data` are skipped. Parsing stops at the
/// first `data` chunk.
pub fn parse_container(bytes: &[u8]) -> WavResult<Container> {
    if bytes.len() < 12 {
        return Err(WavError::malformed(format!(
            "{} bytes is too short for a RIFF header",
            bytes.len()
        )));
    }
    if &bytes[0..4] != b"RIFF" {
        return Err(WavError::malformed("missing RIFF magic"));
    }

    let riff_size = LittleEndian::read_u32(&bytes[4..8]) as usize;
    let end = riff_size
        .checked_add(CHUNK_HEADER_SIZE)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| {
            WavError::malformed(format!(
                "RIFF chunk declares {riff_size} bytes but only {} follow",
                bytes.len() - CHUNK_HEADER_SIZE
            ))
        })?;

    if &bytes[8..12] != b"WAVE" {
        return Err(WavError::malformed("missing WAVE form type"));
    }

    let mut header = None;
    let mut pos = 12;
    while pos + CHUNK_HEADER_SIZE <= end {
        let chunk_id = &bytes[pos..pos + 4];
        let chunk_size = LittleEndian::read_u32(&bytes[pos + 4..pos + 8]) as usize;
        let body_start = pos + CHUNK_HEADER_SIZE;
        let body_end = body_start
            .checked_add(chunk_size)
            .filter(|&body_end| body_end <= end)
            .ok_or_else(|| {
                WavError::malformed(format!(
                    "chunk '{}' declares {chunk_size} bytes but only {} remain",
                    String::from_utf8_lossy(chunk_id),
                    end - body_start
                ))
            })?;

        match chunk_id {
            b"fmt " => header = Some(parse_fmt(&bytes[body_start..body_end])?),
            b"data" => {
                let Some(header) = header else {
                    return Err(WavError::malformed("data chunk appears before fmt chunk"));
                };
                tracing::debug!(
                    sample_rate = header.sample_rate,
                    channels = header.channels,
                    sample_width = header.sample_width.bytes(),
                    data_len = chunk_size,
                    "parsed WAV container"
                );
                return Ok(Container {
                    header,
                    data_offset: body_start,
                    data_len: chunk_size,
                });
            }
            _ => {}
        }

        pos = body_end;
        // Align to word boundary
        if chunk_size % 2 == 1 {
            pos += 1;
        }
    }

    Err(match header {
        None => WavError::malformed("missing fmt chunk"),
        Some(_) => WavError::malformed("missing data chunk"),
    })
}

/// Decodes the body of a `fmt ` chunk.
fn parse_fmt(body: &[u8]) -> WavResult<WavHeader> {
    if body.len() < FMT_CHUNK_SIZE as usize {
        return Err(WavError::malformed(format!(
            "fmt chunk is {} bytes, expected at least {FMT_CHUNK_SIZE}",
            body.len()
        )));
    }

    let mut cursor = Cursor::new(body);
    let mut format_tag = cursor.read_u16::<LittleEndian>()?;
    let channels = cursor.read_u16::<LittleEndian>()?;
    let sample_rate = cursor.read_u32::<LittleEndian>()?;
    let _byte_rate = cursor.read_u32::<LittleEndian>()?;
    let _block_align = cursor.read_u16::<LittleEndian>()?;
    let bits_per_sample = cursor.read_u16::<LittleEndian>()?;

    if format_tag == FORMAT_EXTENSIBLE {
        if body.len() < EXTENSIBLE_FMT_SIZE {
            return Err(WavError::malformed(format!(
                "extensible fmt chunk is {} bytes, expected {EXTENSIBLE_FMT_SIZE}",
                body.len()
            )));
        }
        // cbSize, valid bits and channel mask precede the sub-format GUID,
        // whose first two bytes hold the format code.
        format_tag = LittleEndian::read_u16(&body[24..26]);
    }

    if format_tag != FORMAT_PCM {
        return Err(WavError::unsupported(format!(
            "{} (only integer PCM is supported)",
            format_name(format_tag)
        )));
    }
    if channels == 0 {
        return Err(WavError::malformed("fmt chunk declares zero channels"));
    }
    if sample_rate == 0 {
        return Err(WavError::malformed("fmt chunk declares a zero sample rate"));
    }

    let sample_width = SampleWidth::from_bits(bits_per_sample)?;
    Ok(WavHeader {
        sample_rate,
        channels,
        sample_width,
    })
}

fn format_name(tag: u16) -> String {
    match tag {
        0x0002 => "Microsoft ADPCM".to_string(),
        0x0003 => "IEEE floating point".to_string(),
        0x0006 => "A-law".to_string(),
        0x0007 => "mu-law".to_string(),
        0x0011 => "IMA ADPCM".to_string(),
        0x0055 => "MPEG layer 3".to_string(),
        tag => format!("format code {tag:#06x}"),
    }
}
