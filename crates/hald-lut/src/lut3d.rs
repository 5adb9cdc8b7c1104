//! Decoded 64-level color cube.
//!
//! A [`LutCube`] owns the 64x64x64 lattice a Hald strip encodes. Decoding
//! costs one pass over the strip; afterwards the cube can be shared across
//! threads and reused for any number of images.

use crate::interp::{sample, Interpolation};
use crate::strip::{strip_position, HaldStrip, LEVELS, MAX_INDEX, STRIP_SIZE};
use crate::LutResult;
use hald_core::{ImageView, PixelBuffer};

/// Number of entries in a 64-level cube.
pub const ENTRY_COUNT: usize = LEVELS * LEVELS * LEVELS;

/// Constant-time access to cube entries by lattice coordinate.
///
/// Implementors clamp coordinates above 63 rather than panicking.
pub trait CubeLookup {
    /// Returns the stored color at lattice point (r, g, b).
    fn lookup(&self, r: u8, g: u8, b: u8) -> [u8; 3];
}

impl<T: CubeLookup + ?Sized> CubeLookup for &T {
    #[inline]
    fn lookup(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        (**self).lookup(r, g, b)
    }
}

/// Level stored at lattice coordinate `q` by the identity cube.
///
/// Spreads 0..=63 evenly over 0..=255: `round(q * 255 / 63)`.
#[inline]
pub fn identity_level(q: u8) -> u8 {
    let q = q.min(MAX_INDEX) as u32;
    ((q * 255 + 31) / 63) as u8
}

/// A decoded 64x64x64 RGB lookup cube.
///
/// # Structure
///
/// - 262,144 entries, each an RGB8 triple
/// - Stored red-fastest: `index = b*64*64 + g*64 + r`
///
/// # Example
///
/// ```rust
/// use hald_lut::{CubeLookup, LutCube};
///
/// let cube = LutCube::identity();
/// assert_eq!(cube.lookup(0, 0, 0), [0, 0, 0]);
/// assert_eq!(cube.lookup(63, 63, 63), [255, 255, 255]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LutCube {
    data: Box<[[u8; 3]]>,
}

impl LutCube {
    /// Creates the identity (pass-through) cube.
    pub fn identity() -> Self {
        Self::from_fn(|r, g, b| [identity_level(r), identity_level(g), identity_level(b)])
    }

    /// Builds a cube by evaluating `f` at every lattice point.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hald_lut::{CubeLookup, LutCube};
    ///
    /// // Swap red and blue
    /// let cube = LutCube::from_fn(|r, g, b| [b * 4, g * 4, r * 4]);
    /// assert_eq!(cube.lookup(10, 0, 0), [0, 0, 40]);
    /// ```
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(u8, u8, u8) -> [u8; 3],
    {
        let mut data = Vec::with_capacity(ENTRY_COUNT);
        for b in 0..LEVELS as u8 {
            for g in 0..LEVELS as u8 {
                for r in 0..LEVELS as u8 {
                    data.push(f(r, g, b));
                }
            }
        }
        Self {
            data: data.into_boxed_slice(),
        }
    }

    /// Decodes a validated strip into a dense cube.
    pub fn from_strip(strip: &HaldStrip<'_>) -> Self {
        Self::from_fn(|r, g, b| strip.lookup(r, g, b))
    }

    /// Validates and decodes a 512x512 strip image.
    ///
    /// # Errors
    ///
    /// Same as [`HaldStrip::new`].
    pub fn decode(view: ImageView<'_>) -> LutResult<Self> {
        let strip = HaldStrip::new(view)?;
        Ok(Self::from_strip(&strip))
    }

    #[inline]
    fn index(r: u8, g: u8, b: u8) -> usize {
        let (r, g, b) = (
            r.min(MAX_INDEX) as usize,
            g.min(MAX_INDEX) as usize,
            b.min(MAX_INDEX) as usize,
        );
        b * LEVELS * LEVELS + g * LEVELS + r
    }

    /// Returns all entries in red-fastest order.
    #[inline]
    pub fn entries(&self) -> &[[u8; 3]] {
        &self.data
    }

    /// Evaluates the LUT-only color for an RGB8 input.
    pub fn sample(&self, rgb: [u8; 3], method: Interpolation) -> [f32; 3] {
        sample(self, rgb, method)
    }

    /// Packs the cube into a tightly packed 512x512 strip with opaque alpha.
    pub fn to_strip(&self) -> PixelBuffer {
        let mut img = PixelBuffer::new(STRIP_SIZE, STRIP_SIZE);
        for b in 0..LEVELS as u8 {
            for g in 0..LEVELS as u8 {
                for r in 0..LEVELS as u8 {
                    let [cr, cg, cb] = self.lookup(r, g, b);
                    let (x, y) = strip_position(r, g, b);
                    img.set_pixel(x, y, [cr, cg, cb, 255]);
                }
            }
        }
        img
    }
}

impl CubeLookup for LutCube {
    #[inline]
    fn lookup(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        self.data[Self::index(r, g, b)]
    }
}

impl std::fmt::Debug for LutCube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LutCube")
            .field("levels", &LEVELS)
            .field("entries", &self.data.len())
            .finish()
    }
}
