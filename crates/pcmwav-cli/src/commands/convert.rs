//! Convert command implementation
//!
//! Rewrites a WAV file with a different sample width.

use anyhow::{Context, Result};
use colored::Colorize;
use pcmwav::scale::scale_factor;
use pcmwav::{ClipPolicy, FloatBuffer, SampleInput, SampleWidth, Scale, Wav, WriteOptions};
use std::process::ExitCode;

use super::reporting::print_write_report;

/// Maps decoded samples onto [-1, 1] using the scaling of their own width,
/// so writing them back with scale 1.0 preserves their level.
pub fn normalize(wav: &Wav) -> FloatBuffer {
    let c = scale_factor(wav.sampwidth);
    let midpoint = wav.sampwidth.midpoint();
    wav.data.map(|&s| (i64::from(s) - midpoint) as f64 / c)
}

/// Builds the write input and options for a conversion.
pub fn plan(
    wav: &Wav,
    width: SampleWidth,
    rescale: bool,
    clip: ClipPolicy,
) -> (SampleInput, WriteOptions) {
    let options = WriteOptions::default()
        .with_sample_width(width)
        .with_clip(clip);
    if rescale {
        (
            SampleInput::float(normalize(wav)),
            options.with_scale(Scale::Fixed(1.0)),
        )
    } else {
        (SampleInput::integer(wav.data.clone()), options)
    }
}

/// Run the convert command
///
/// # Arguments
/// * `input` - Source WAV file
/// * `output` - Destination WAV file
/// * `width` - Output sample width
/// * `rescale` - Rescale to the new width instead of clipping raw values
/// * `clip` - Clip policy
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    input: &str,
    output: &str,
    width: SampleWidth,
    rescale: bool,
    clip: ClipPolicy,
) -> Result<ExitCode> {
    println!(
        "{} {} -> {} ({})",
        "Converting:".cyan().bold(),
        input,
        output,
        width
    );

    let wav = pcmwav::read_file(input)
        .with_context(|| format!("Failed to read WAV file: {}", input))?;
    let (data, options) = plan(&wav, width, rescale, clip);
    let report = pcmwav::write_file(output, &data, wav.rate, &options)
        .with_context(|| format!("Failed to write WAV file: {}", output))?;

    print_write_report(output, &report);
    Ok(ExitCode::SUCCESS)
}
