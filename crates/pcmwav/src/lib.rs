//! pcmwav
//!
//! Reads and writes uncompressed PCM WAV files with 8, 16, 24 and 32-bit
//! integer samples. Sample data is exposed as a (frames, channels) array of
//! integers.
//!
//! # Overview
//!
//! - Reading never scales or shifts: the values in [`Wav::data`] are the values
//!   stored in the file. 8-bit files are unsigned (0..=255, silence at 128);
//!   wider files are signed, with 24-bit samples sign-extended into `i32`.
//! - Writing accepts integer or floating point input ([`SampleInput`]).
//!   Integer input is only clipped to the output range. Floating point input
//!   is scaled by the [`scale`] module so that 0.0 always lands on the
//!   midpoint.
//! - Clipping is reported once per write call as a [`ClipReport`]; the
//!   [`ClipPolicy`] decides whether it is ignored, logged, or an error.
//!
//! # Example
//!
//! ```
//! use pcmwav::{FloatBuffer, SampleInput, SampleWidth, Scale, WriteOptions};
//!
//! let rate = 22050;
//! let tone: Vec<f64> = (0..rate)
//!     .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / rate as f64).sin())
//!     .collect();
//!
//! let options = WriteOptions::default()
//!     .with_sample_width(SampleWidth::I24)
//!     .with_scale(Scale::Fixed(1.0));
//! let input = SampleInput::float(FloatBuffer::mono(tone));
//! let (bytes, report) = pcmwav::encode(&input, rate as u32, &options)?;
//! assert!(report.clip.is_none());
//!
//! let wav = pcmwav::decode(&bytes)?;
//! assert_eq!(wav.sampwidth, SampleWidth::I24);
//! assert_eq!(wav.frames(), 22050);
//! # Ok::<(), pcmwav::WavError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`codec`] - `read`/`write` entry points and [`WriteOptions`]
//! - [`scale`] - Float to integer conversion and clip policy
//! - [`buffer`] - Sample storage
//! - [`wav`] - RIFF container parsing/writing and sample packing

pub mod buffer;
pub mod codec;
pub mod error;
pub mod scale;
pub mod wav;

// Re-export main types at crate root
pub use buffer::{FloatBuffer, Frames, NativeSample, SampleBuffer, SampleInput};
pub use codec::{
    convert, decode, encode, read, read_file, write, write_file, Wav, WriteOptions, WriteReport,
};
pub use error::{WavError, WavResult};
pub use scale::{ClipPolicy, ClipReport, Scale};
pub use wav::{SampleWidth, WavHeader};
