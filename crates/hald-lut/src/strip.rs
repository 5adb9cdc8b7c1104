//! Hald strip addressing.
//!
//! A 64-level cube is packed into a 512x512 RGBA8 image as an 8x8 grid of
//! 64x64 tiles. Blue selects the tile, green the row inside it and red the
//! column:
//!
//! ```text
//!  tile column = b % 8        pixel row    = (b / 8) * 64 + g
//!  tile row    = b / 8        pixel column = (b % 8) * 64 + r
//!
//!  +--------+--------+-----+--------+
//!  | b = 0  | b = 1  | ... | b = 7  |   <- tile row 0
//!  +--------+--------+-----+--------+
//!  | b = 8  | b = 9  | ... | b = 15 |
//!  +--------+--------+-----+--------+
//!  |  ...                           |
//!  +--------+--------+-----+--------+
//!  | b = 56 |  ...         | b = 63 |   <- tile row 7
//!  +--------+--------+-----+--------+
//! ```
//!
//! [`HaldStrip`] reads entries straight out of the caller's pixels without
//! copying them. Decode into a [`LutCube`](crate::LutCube) when the same LUT
//! is applied repeatedly.

use crate::{CubeLookup, LutError, LutResult};
use hald_core::{ImageView, BYTES_PER_PIXEL};

/// Lattice points per cube axis.
pub const LEVELS: usize = 64;

/// Highest valid cube coordinate.
pub const MAX_INDEX: u8 = (LEVELS - 1) as u8;

/// Tiles per strip row (and per strip column).
pub const TILES_PER_ROW: usize = 8;

/// Side length of the strip image in pixels.
pub const STRIP_SIZE: u32 = (LEVELS * TILES_PER_ROW) as u32;

/// Returns the (x, y) pixel position of cube entry (r, g, b) in the strip.
///
/// Coordinates above 63 are clamped.
#[inline]
pub fn strip_position(r: u8, g: u8, b: u8) -> (u32, u32) {
    let (r, g, b) = (
        r.min(MAX_INDEX) as usize,
        g.min(MAX_INDEX) as usize,
        b.min(MAX_INDEX) as usize,
    );
    let tile_col = b % TILES_PER_ROW;
    let tile_row = b / TILES_PER_ROW;
    let x = tile_col * LEVELS + r;
    let y = tile_row * LEVELS + g;
    (x as u32, y as u32)
}

/// Byte offset of cube entry (r, g, b) in a tightly packed 512x512 strip.
///
/// Equivalent to `(tile_row*64*512 + g*512 + tile_col*64 + r) * 4`.
///
/// # Example
///
/// ```rust
/// use hald_lut::strip_offset;
///
/// assert_eq!(strip_offset(0, 0, 0), 0);
/// assert_eq!(strip_offset(63, 63, 63), (511 * 512 + 511) * 4);
/// ```
#[inline]
pub fn strip_offset(r: u8, g: u8, b: u8) -> usize {
    let (x, y) = strip_position(r, g, b);
    (y as usize * STRIP_SIZE as usize + x as usize) * BYTES_PER_PIXEL
}

/// Zero-copy reader over a 512x512 Hald strip.
///
/// Validation happens once, in [`new`](Self::new); lookups afterwards are
/// plain index arithmetic. Row stride padding in the source pixels is
/// honoured.
///
/// # Example
///
/// ```rust
/// use hald_lut::{CubeLookup, HaldStrip, LutCube};
///
/// let pixels = LutCube::identity().to_strip();
/// let strip = HaldStrip::new(pixels.view()).unwrap();
/// assert_eq!(strip.lookup(63, 63, 63), [255, 255, 255]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HaldStrip<'a> {
    view: ImageView<'a>,
}

impl<'a> HaldStrip<'a> {
    /// Validates `view` as a Hald strip.
    ///
    /// # Errors
    ///
    /// - [`LutError::InvalidImage`] if the pixels cannot be read as RGBA8
    /// - [`LutError::MalformedLut`] if the image is not exactly 512x512
    pub fn new(view: ImageView<'a>) -> LutResult<Self> {
        let (width, height) = view.dimensions();
        if width != STRIP_SIZE || height != STRIP_SIZE {
            return Err(LutError::MalformedLut {
                width,
                height,
                expected: STRIP_SIZE,
            });
        }
        view.validate()?;
        Ok(Self { view })
    }

    /// Returns the underlying pixels.
    #[inline]
    pub fn view(&self) -> ImageView<'a> {
        self.view
    }
}

impl CubeLookup for HaldStrip<'_> {
    #[inline]
    fn lookup(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        let (x, y) = strip_position(r, g, b);
        let offset = y as usize * self.view.stride() + x as usize * BYTES_PER_PIXEL;
        let data = self.view.data();
        [data[offset], data[offset + 1], data[offset + 2]]
    }
}
