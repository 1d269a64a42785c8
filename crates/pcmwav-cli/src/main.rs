//! pcmwav CLI - Command-line interface for PCM WAV files
//!
//! This binary inspects WAV files and writes them at 8, 16, 24 or 32-bit
//! sample widths.

use clap::{Parser, Subcommand};
use pcmwav::{ClipPolicy, SampleWidth, Scale};
use std::process::ExitCode;
use tracing::Level;

// Use modules from the library crate
use pcmwav_cli::commands;
use pcmwav_cli::commands::tone::ToneParams;

/// pcmwav - Read and write integer PCM WAV files
#[derive(Parser)]
#[command(name = "pcmwav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the format and sample range of a WAV file
    Info {
        /// Path to the WAV file
        input: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a WAV file with a different sample width
    Convert {
        /// Source WAV file
        input: String,

        /// Destination WAV file
        output: String,

        /// Output sample width in bytes (1, 2, 3, 4) or bits (e.g. 24-bit)
        #[arg(short, long)]
        width: SampleWidth,

        /// Rescale samples to the new width instead of clipping raw values
        #[arg(long)]
        rescale: bool,

        /// What to do when samples are clipped (warn, raise, ignore)
        #[arg(long, default_value = "warn")]
        clip: ClipPolicy,
    },

    /// Write a sine tone
    Tone {
        /// Destination WAV file
        output: String,

        /// Frequency in Hz
        #[arg(short, long, default_value_t = 440.0)]
        freq: f64,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Sample rate in Hz
        #[arg(short, long, default_value_t = 44100)]
        rate: u32,

        /// Output sample width in bytes (1, 2, 3, 4) or bits (e.g. 24-bit)
        #[arg(short, long, default_value = "2")]
        width: SampleWidth,

        /// Number of channels
        #[arg(short, long, default_value_t = 1)]
        channels: usize,

        /// Peak amplitude of the generated signal
        #[arg(short, long, default_value_t = 1.0)]
        amplitude: f64,

        /// Scale for the float conversion: a positive number or "auto"
        #[arg(short, long)]
        scale: Option<Scale>,

        /// What to do when samples are clipped (warn, raise, ignore)
        #[arg(long, default_value = "warn")]
        clip: ClipPolicy,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Info { input, json } => commands::info::run(&input, json),
        Commands::Convert {
            input,
            output,
            width,
            rescale,
            clip,
        } => commands::convert::run(&input, &output, width, rescale, clip),
        Commands::Tone {
            output,
            freq,
            duration,
            rate,
            width,
            channels,
            amplitude,
            scale,
            clip,
        } => {
            let params = ToneParams {
                frequency: freq,
                duration,
                rate,
                channels,
                amplitude,
            };
            commands::tone::run(&output, &params, width, scale, clip)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
