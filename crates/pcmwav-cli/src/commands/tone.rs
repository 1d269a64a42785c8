//! Tone command implementation
//!
//! Synthesizes a sine tone and writes it through the float write path.

use anyhow::{ensure, Context, Result};
use colored::Colorize;
use pcmwav::{ClipPolicy, FloatBuffer, SampleInput, SampleWidth, Scale, WriteOptions};
use std::f64::consts::PI;
use std::process::ExitCode;

use super::reporting::print_write_report;

/// Parameters of the generated tone.
#[derive(Debug, Clone, Copy)]
pub struct ToneParams {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Length in seconds.
    pub duration: f64,
    /// Sample rate in Hz.
    pub rate: u32,
    /// Number of identical channels.
    pub channels: usize,
    /// Peak amplitude of the float signal.
    pub amplitude: f64,
}

/// Generates the tone as interleaved float samples.
pub fn synthesize(params: &ToneParams) -> Result<FloatBuffer> {
    ensure!(params.rate > 0, "sample rate must be positive");
    ensure!(params.channels > 0, "channel count must be positive");
    ensure!(
        params.duration.is_finite() && params.duration >= 0.0,
        "duration must be a non-negative number of seconds"
    );

    let frames = (params.duration * f64::from(params.rate)).round() as usize;
    let omega = 2.0 * PI * params.frequency;
    let rate = f64::from(params.rate);

    let mut samples = Vec::with_capacity(frames * params.channels);
    for i in 0..frames {
        let value = params.amplitude * (omega * i as f64 / rate).sin();
        samples.extend(std::iter::repeat(value).take(params.channels));
    }
    Ok(FloatBuffer::new(samples, params.channels)?)
}

/// Run the tone command
///
/// # Arguments
/// * `output` - Destination WAV file
/// * `params` - Tone parameters
/// * `width` - Output sample width
/// * `scale` - Scale for the float to integer conversion
/// * `clip` - Clip policy
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    output: &str,
    params: &ToneParams,
    width: SampleWidth,
    scale: Option<Scale>,
    clip: ClipPolicy,
) -> Result<ExitCode> {
    println!(
        "{} {:.1} Hz for {} s at {} Hz",
        "Generating:".cyan().bold(),
        params.frequency,
        params.duration,
        params.rate
    );

    let samples = synthesize(params)?;
    let mut options = WriteOptions::default()
        .with_sample_width(width)
        .with_clip(clip);
    options.scale = scale;

    let report = pcmwav::write_file(output, &SampleInput::float(samples), params.rate, &options)
        .with_context(|| format!("Failed to write WAV file: {}", output))?;

    print_write_report(output, &report);
    Ok(ExitCode::SUCCESS)
}
