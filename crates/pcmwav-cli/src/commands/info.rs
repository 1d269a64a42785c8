//! Info command implementation
//!
//! Prints the format and per-channel sample range of a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use pcmwav::Wav;
use serde::Serialize;
use std::process::ExitCode;

/// Summary of a WAV file.
#[derive(Debug, Serialize, PartialEq)]
pub struct WavInfo {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per sample.
    pub sample_width: u8,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Number of channels.
    pub channels: usize,
    /// Number of frames.
    pub frames: usize,
    /// Duration in seconds.
    pub duration_seconds: f64,
    /// Per-channel statistics.
    pub channel_ranges: Vec<ChannelRange>,
}

/// Sample range of one channel.
#[derive(Debug, Serialize, PartialEq)]
pub struct ChannelRange {
    /// Smallest sample.
    pub min: i32,
    /// Largest sample.
    pub max: i32,
}

impl WavInfo {
    /// Collects the summary of a decoded file.
    pub fn from_wav(wav: &Wav) -> Self {
        let channel_ranges = (0..wav.channels())
            .filter_map(|ch| {
                let (min, max) = wav
                    .data
                    .channel(ch)
                    .fold(None, |acc: Option<(i32, i32)>, s| match acc {
                        None => Some((s, s)),
                        Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
                    })?;
                Some(ChannelRange { min, max })
            })
            .collect();

        Self {
            sample_rate: wav.rate,
            sample_width: wav.sampwidth.into(),
            bits_per_sample: wav.sampwidth.bits(),
            channels: wav.channels(),
            frames: wav.frames(),
            duration_seconds: wav.duration_seconds(),
            channel_ranges,
        }
    }
}

/// Run the info command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `json` - Print JSON instead of colored text
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, json: bool) -> Result<ExitCode> {
    let wav = pcmwav::read_file(input)
        .with_context(|| format!("Failed to read WAV file: {}", input))?;
    let info = WavInfo::from_wav(&wav);

    if json {
        let output = serde_json::to_string_pretty(&info).context("Failed to serialize info")?;
        println!("{}", output);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "File:".cyan().bold(), input);
    println!("  sample rate: {} Hz", info.sample_rate);
    println!(
        "  sample width: {} bytes ({}-bit)",
        info.sample_width, info.bits_per_sample
    );
    println!("  channels: {}", info.channels);
    println!(
        "  frames: {} ({:.3} s)",
        info.frames, info.duration_seconds
    );
    for (ch, range) in info.channel_ranges.iter().enumerate() {
        println!("  channel {}: min {}, max {}", ch, range.min, range.max);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcmwav::{Frames, SampleBuffer, SampleWidth};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_info_ranges() {
        let wav = Wav {
            rate: 4,
            sampwidth: SampleWidth::I24,
            data: SampleBuffer::new(vec![1, -5, 7, 2, -3, 9, 0, 0], 2).unwrap(),
        };
        let info = WavInfo::from_wav(&wav);
        assert_eq!(info.channels, 2);
        assert_eq!(info.frames, 4);
        assert_eq!(info.sample_width, 3);
        assert_eq!(info.bits_per_sample, 24);
        assert_eq!(info.duration_seconds, 1.0);
        assert_eq!(
            info.channel_ranges,
            vec![
                ChannelRange { min: -3, max: 7 },
                ChannelRange { min: -5, max: 9 },
            ]
        );
    }

    #[test]
    fn test_info_empty_file() {
        let wav = Wav {
            rate: 8000,
            sampwidth: SampleWidth::U8,
            data: Frames::new(vec![], 1).unwrap(),
        };
        let info = WavInfo::from_wav(&wav);
        assert_eq!(info.frames, 0);
        assert!(info.channel_ranges.is_empty());
    }

    #[test]
    fn test_run_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.wav");
        let input = pcmwav::SampleInput::integer(Frames::mono(vec![0i16, 1, -1]));
        pcmwav::write_file(&path, &input, 8000, &Default::default()).unwrap();

        let path = path.to_str().unwrap();
        assert!(run(path, true).is_ok());
        assert!(run("does/not/exist.wav", false).is_err());
    }
}
