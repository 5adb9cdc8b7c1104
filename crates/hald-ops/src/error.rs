//! Error types for the grading engine.

use hald_lut::LutError;
use thiserror::Error;

/// Error type for grading operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Source or LUT pixels cannot be read as RGBA8.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// LUT strip is not 512x512.
    #[error("malformed LUT: strip is {width}x{height}, expected 512x512")]
    MalformedLut {
        /// Strip width
        width: u32,
        /// Strip height
        height: u32,
    },

    /// Output buffer could not be allocated.
    #[error("failed to allocate {requested} bytes for output")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
    },
}

impl EngineError {
    /// Returns `true` for asset errors that retrying cannot fix.
    pub fn is_asset_error(&self) -> bool {
        matches!(self, Self::MalformedLut { .. })
    }
}

impl From<hald_core::Error> for EngineError {
    fn from(err: hald_core::Error) -> Self {
        match err {
            hald_core::Error::AllocationFailed { requested, .. } => Self::AllocationFailed { requested },
            other => Self::InvalidImage(other.to_string()),
        }
    }
}

impl From<LutError> for EngineError {
    fn from(err: LutError) -> Self {
        match err {
            LutError::MalformedLut { width, height, .. } => Self::MalformedLut { width, height },
            LutError::InvalidImage(e) => Self::InvalidImage(format!("LUT: {e}")),
        }
    }
}

/// Result type for grading operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for [`GradeSession`](crate::session::GradeSession) submissions.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The worker thread could not be started.
    #[error("failed to spawn grading worker: {0}")]
    Spawn(#[from] std::io::Error),
}
