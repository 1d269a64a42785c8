//! RIFF/WAVE container writing.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::buffer::SampleBuffer;
use crate::error::{WavError, WavResult};

use super::format::{SampleWidth, WavHeader};
use super::parser::{FMT_CHUNK_SIZE, FORMAT_PCM};
use super::pcm::pack_samples;

/// Bytes before the sample data: RIFF header, `fmt ` chunk, `data` header.
pub const HEADER_SIZE: usize = 44;

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `header` - Format parameters
/// * `pcm_data` - Packed samples
///
/// An odd-length data chunk is followed by one pad byte.
pub fn write_container<W: Write>(
    writer: &mut W,
    header: &WavHeader,
    pcm_data: &[u8],
) -> WavResult<()> {
    let block_align = u16::try_from(header.block_align()).map_err(|_| {
        WavError::unsupported(format!(
            "{} channels of {} samples exceed the maximum frame size",
            header.channels, header.sample_width
        ))
    })?;
    let byte_rate = u32::try_from(header.byte_rate()).map_err(|_| {
        WavError::unsupported(format!(
            "byte rate {} does not fit the fmt chunk",
            header.byte_rate()
        ))
    })?;

    let pad = pcm_data.len() % 2;
    let data_size = u32::try_from(pcm_data.len())
        .ok()
        .filter(|&size| size.checked_add(36 + pad as u32).is_some())
        .ok_or_else(|| {
            WavError::unsupported(format!(
                "{} bytes of sample data exceed the 4 GiB RIFF limit",
                pcm_data.len()
            ))
        })?;
    // Total file size minus 8 bytes for RIFF header
    let file_size = 36 + data_size + pad as u32;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_u32::<LittleEndian>(file_size)?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_u32::<LittleEndian>(FMT_CHUNK_SIZE)?;
    writer.write_u16::<LittleEndian>(FORMAT_PCM)?;
    writer.write_u16::<LittleEndian>(header.channels)?;
    writer.write_u32::<LittleEndian>(header.sample_rate)?;
    writer.write_u32::<LittleEndian>(byte_rate)?;
    writer.write_u16::<LittleEndian>(block_align)?;
    writer.write_u16::<LittleEndian>(header.bits_per_sample())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_u32::<LittleEndian>(data_size)?;
    writer.write_all(pcm_data)?;
    if pad == 1 {
        writer.write_u8(0)?;
    }

    tracing::debug!(
        sample_rate = header.sample_rate,
        channels = header.channels,
        sample_width = header.sample_width.bytes(),
        data_len = pcm_data.len(),
        "wrote WAV container"
    );
    Ok(())
}

/// Packs `buffer` and wraps it in a WAV container.
pub fn encode_wav(
    buffer: &SampleBuffer,
    sample_width: SampleWidth,
    sample_rate: u32,
) -> WavResult<Vec<u8>> {
    let channels = u16::try_from(buffer.channels()).map_err(|_| {
        WavError::unsupported(format!(
            "{} channels exceed the WAV limit of {}",
            buffer.channels(),
            u16::MAX
        ))
    })?;
    let header = WavHeader::new(sample_rate, channels, sample_width)?;

    let pcm = pack_samples(buffer, sample_width);
    let mut out = Vec::with_capacity(HEADER_SIZE + pcm.len() + 1);
    write_container(&mut out, &header, &pcm)?;
    Ok(out)
}
