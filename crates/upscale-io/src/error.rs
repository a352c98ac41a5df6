//! Error types for image I/O.

use std::io;
use thiserror::Error;

/// Image I/O error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported or missing file extension.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    Decode(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    Encode(String),

    /// Pixel buffer does not match the stated dimensions.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Expected byte count (`width * height * 4`).
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },
}

/// Result alias for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
