//! Error types for WAV encoding and decoding.

use thiserror::Error;

use crate::scale::ClipReport;

/// Result type for WAV operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that can occur while reading or writing WAV data.
#[derive(Debug, Error)]
pub enum WavError {
    /// Structurally invalid RIFF/WAVE input.
    #[error("malformed WAV container: {message}")]
    MalformedContainer {
        /// What was wrong with the container.
        message: String,
    },

    /// Valid container holding an encoding this crate does not handle.
    #[error("unsupported WAV format: {message}")]
    UnsupportedFormat {
        /// Description of the unsupported feature.
        message: String,
    },

    /// Data chunk length inconsistent with the frame geometry.
    #[error("data length {len} is not a multiple of the frame size {frame_size} (channels * sample width)")]
    TruncatedData {
        /// Length of the data in bytes.
        len: usize,
        /// Bytes per frame.
        frame_size: usize,
    },

    /// Float input was given without an output sample width.
    #[error("sample width must be given when it cannot be inferred from the input data")]
    MissingWidth,

    /// A caller-supplied sample width outside {1, 2, 3, 4}.
    #[error("invalid sample width: {width} (must be 1, 2, 3 or 4 bytes)")]
    InvalidSampleWidth {
        /// The rejected width in bytes.
        width: u32,
    },

    /// Clipping occurred and the clip policy escalates it.
    #[error("{report}")]
    ClippedData {
        /// Aggregated clipping information.
        report: ClipReport,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WavError {
    /// Creates a malformed container error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedContainer {
            message: message.into(),
        }
    }

    /// Creates an unsupported format error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            WavError::MalformedContainer { .. } => "WAV_001",
            WavError::UnsupportedFormat { .. } => "WAV_002",
            WavError::TruncatedData { .. } => "WAV_003",
            WavError::MissingWidth => "WAV_004",
            WavError::InvalidSampleWidth { .. } => "WAV_005",
            WavError::ClippedData { .. } => "WAV_006",
            WavError::InvalidParameter { .. } => "WAV_007",
            WavError::Io(_) => "WAV_008",
        }
    }

    /// Error category, used when reporting diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            WavError::MalformedContainer { .. }
            | WavError::UnsupportedFormat { .. }
            | WavError::TruncatedData { .. } => "decode",
            WavError::MissingWidth
            | WavError::InvalidSampleWidth { .. }
            | WavError::ClippedData { .. }
            | WavError::InvalidParameter { .. } => "encode",
            WavError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = WavError::invalid_param("scale", "must be positive");
        assert!(err.to_string().contains("scale"));
        assert!(err.to_string().contains("must be positive"));
        assert_eq!(err.code(), "WAV_007");
    }

    #[test]
    fn test_malformed_helper() {
        let err = WavError::malformed("missing RIFF magic");
        assert!(err.to_string().contains("missing RIFF magic"));
        assert_eq!(err.category(), "decode");
    }

    #[test]
    fn test_truncated_data_message() {
        let err = WavError::TruncatedData {
            len: 7,
            frame_size: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('4'));
        assert_eq!(err.code(), "WAV_003");
    }
}
