//! # hald-ops
//!
//! Hald LUT color grading engine.
//!
//! Remaps every pixel of an RGBA8 image through a 64-level LUT cube and
//! blends the graded color with the original at a caller-chosen intensity.
//!
//! # Modules
//!
//! - [`grade`] - The transform itself
//! - [`session`] - Single-flight job gate for interactive callers
//!
//! # Example
//!
//! ```rust
//! use hald_core::PixelBuffer;
//! use hald_lut::LutCube;
//! use hald_ops::{transform, EngineError};
//!
//! let lut = LutCube::identity().to_strip();
//! let src = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);
//!
//! let out = transform(src.view(), lut.view(), 0.6).unwrap();
//! assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);
//!
//! // Anything but a 512x512 strip is rejected
//! let bad = PixelBuffer::new(511, 511);
//! assert!(matches!(
//!     transform(src.view(), bad.view(), 1.0),
//!     Err(EngineError::MalformedLut { .. })
//! ));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - Spread rows across the rayon thread pool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod options;
mod parallel;
pub mod grade;
pub mod session;

pub use error::{EngineError, EngineResult, SessionError};
pub use grade::{blend, grade_pixel, transform, transform_cube, transform_with};
pub use options::{GradeOptions, Intensity};
pub use session::{GradeSession, SessionState, Submission};
