//! # hald-core
//!
//! Core types for Hald LUT color grading.
//!
//! This crate provides the foundational types shared by the hald crates:
//!
//! - [`PixelBuffer`] - Owned RGBA8 image with row stride
//! - [`ImageView`] - Borrowed RGBA8 pixel data, validated on demand
//! - [`Error`], [`Result`] - Buffer construction and validation errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other crates build on it:
//!
//! ```text
//! hald-core (this crate)
//!    ^
//!    |
//!    +-- hald-lut (strip decoding, cube lookup)
//!    +-- hald-ops (grading engine, single-flight session)
//!    +-- hald-cli (raw RGBA8 command line tool)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::{required_len, ImageView, PixelBuffer, BYTES_PER_PIXEL};

