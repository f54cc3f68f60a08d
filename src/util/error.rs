//! Error types for pixmatch.

use thiserror::Error;

/// Result alias for pixmatch operations.
pub type PixMatchResult<T> = std::result::Result<T, PixMatchError>;

/// Errors that can occur when constructing, decoding, or hashing images.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PixMatchError {
    /// A bitmap was requested with a zero or overflowing dimension.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The supplied pixel buffer does not match the requested dimensions.
    #[error("rgb8 buffer holds {got} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, got: usize },
    /// Encoded image bytes could not be decoded.
    #[error("image decode failed: {reason}")]
    Decode { reason: String },
    /// A hash literal was not 16 valid hex digits.
    #[error("invalid hash hex: {reason}")]
    InvalidHashHex { reason: String },
}
