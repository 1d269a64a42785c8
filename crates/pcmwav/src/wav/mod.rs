//! RIFF/WAVE container and PCM sample packing.
//!
//! Only integer PCM with 1, 2, 3 or 4 byte samples is handled. All header
//! fields are little-endian; 8-bit samples are unsigned and wider samples are
//! two's complement.

mod format;
mod parser;
mod pcm;
mod writer;


// Re-export public API
pub use format::{SampleWidth, WavHeader};
pub use parser::{parse_container, Container, FORMAT_EXTENSIBLE, FORMAT_PCM};
pub use pcm::{decode_sample, encode_sample, pack_samples, unpack_samples};
pub use writer::{encode_wav, write_container, HEADER_SIZE};
