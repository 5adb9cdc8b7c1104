//! # hald-lut
//!
//! Hald strip LUT decoding for 8-bit color grading.
//!
//! A grading LUT is a 64x64x64 RGB cube shipped as a 512x512 RGBA8 image
//! (an 8x8 grid of 64x64 tiles, blue selecting the tile). This crate reads
//! such strips and evaluates the cube for 8-bit input colors.
//!
//! # Types
//!
//! - [`HaldStrip`] - Zero-copy reader over the caller's strip pixels
//! - [`LutCube`] - Dense decoded cube, shareable across threads
//! - [`CubeLookup`] - Lattice access implemented by both
//! - [`Interpolation`] - Floor, per-axis or trilinear evaluation
//!
//! # Usage
//!
//! ```rust
//! use hald_lut::{CubeLookup, HaldStrip, Interpolation, LutCube, sample};
//!
//! // Author a LUT and pack it as a strip
//! let pixels = LutCube::identity().to_strip();
//!
//! // Validate once, then look up freely
//! let strip = HaldStrip::new(pixels.view()).unwrap();
//! assert_eq!(strip.lookup(0, 0, 0), [0, 0, 0]);
//!
//! let rgb = sample(&strip, [252, 252, 252], Interpolation::PerAxis);
//! assert_eq!(rgb, [255.0, 255.0, 255.0]);
//! ```
//!
//! # Dependencies
//!
//! - [`hald-core`] - Pixel buffers and views
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `hald-ops` - Grading engine

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod interp;
mod lut3d;
pub mod strip;

pub use error::{LutError, LutResult};
pub use interp::{lerp, quantize, sample, Interpolation, STEP};
pub use lut3d::{identity_level, CubeLookup, LutCube, ENTRY_COUNT};
pub use strip::{strip_offset, strip_position, HaldStrip, LEVELS, MAX_INDEX, STRIP_SIZE};
