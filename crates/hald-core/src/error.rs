//! Error types for hald-core operations.
//!
//! Covers the failure modes of building and reading RGBA8 pixel buffers:
//! - Geometry errors (zero area, overflowing sizes, short strides)
//! - Backing store errors (slice shorter than the declared geometry)
//! - Allocation errors
//!
//! # Usage
//!
//! ```rust
//! use hald_core::{Error, ImageView};
//!
//! let data = [0u8; 8];
//! let err = ImageView::packed(&data, 2, 2).validate().unwrap_err();
//! assert!(matches!(err, Error::BufferTooSmall { len: 8, required: 16 }));
//! assert!(err.is_unreadable());
//! ```
//!
//! # Used By
//!
//! - [`crate::image::PixelBuffer`] - buffer construction
//! - [`crate::image::ImageView`] - validation of borrowed pixel data
//! - `hald-lut`, `hald-ops` - mapped into their own error enums

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading pixel buffers.
///
/// # Categories
///
/// - **Geometry errors**: [`InvalidDimensions`](Error::InvalidDimensions), [`InvalidStride`](Error::InvalidStride)
/// - **Backing store errors**: [`BufferTooSmall`](Error::BufferTooSmall)
/// - **Allocation errors**: [`AllocationFailed`](Error::AllocationFailed)
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or the dimensions would
    /// overflow a buffer size calculation.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Stride is too small for the given width.
    ///
    /// Every row must hold at least `width * 4` bytes.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride
        stride: usize,
        /// Minimum required stride
        min_stride: usize,
        /// Image width
        width: u32,
    },

    /// The backing slice is shorter than the geometry requires.
    #[error("pixel data holds {len} bytes, geometry requires {required}")]
    BufferTooSmall {
        /// Bytes available
        len: usize,
        /// Bytes required by width, height and stride
        required: usize,
    },

    /// Memory allocation failed.
    ///
    /// Returned by fallible constructors when the system cannot provide
    /// the requested bytes.
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }

    /// Returns `true` if the error describes unreadable pixel data
    /// (bad geometry or a short backing store).
    #[inline]
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::InvalidStride { .. } | Self::BufferTooSmall { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_failed() {
        let err = Error::allocation_failed(1024 * 1024 * 1024, "out of memory");
        assert!(err.to_string().contains("out of memory"));
        assert!(err.is_allocation_error());
    }

    #[test]
    fn test_unreadable_kinds() {
        assert!(Error::invalid_dimensions(0, 10, "zero width").is_unreadable());
        let short = Error::BufferTooSmall { len: 3, required: 4 };
        assert!(short.is_unreadable());
        assert!(short.to_string().contains("requires 4"));
    }
}
