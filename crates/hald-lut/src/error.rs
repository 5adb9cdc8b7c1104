//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while decoding a LUT strip.
#[derive(Debug, Error)]
pub enum LutError {
    /// Strip dimensions are not the fixed 512x512 layout.
    #[error("malformed LUT: strip is {width}x{height}, expected {expected}x{expected}")]
    MalformedLut {
        /// Strip width
        width: u32,
        /// Strip height
        height: u32,
        /// Required side length
        expected: u32,
    },

    /// Strip pixels cannot be read as RGBA8.
    #[error("invalid LUT image: {0}")]
    InvalidImage(#[from] hald_core::Error),
}
