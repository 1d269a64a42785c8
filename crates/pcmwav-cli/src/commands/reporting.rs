//! Shared console output for write commands.

use colored::Colorize;
use pcmwav::WriteReport;

/// Prints a one-line summary of a finished write.
pub(super) fn print_write_report(path: &str, report: &WriteReport) {
    println!(
        "{} Wrote {} ({} frames, {} channel(s), {} Hz, {})",
        "SUCCESS".green().bold(),
        path,
        report.frames,
        report.header.channels,
        report.header.sample_rate,
        report.header.sample_width
    );
    if let Some(clip) = &report.clip {
        println!("  {} {}", "clipped:".yellow().bold(), clip);
    }
}
