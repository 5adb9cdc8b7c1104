//! RGBA8 pixel buffers.
//!
//! This module provides the two image containers the grading engine works on:
//! - [`PixelBuffer`] - Owned, validated RGBA8 buffer
//! - [`ImageView`] - Borrowed RGBA8 pixel data, validated on demand
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, four interleaved bytes per
//! pixel. Rows may be padded, so each row starts `stride` bytes after the
//! previous one:
//!
//! ```text
//! Memory: [R G B A R G B A ... pad]  <- Row 0 (stride bytes)
//!         [R G B A R G B A ... pad]  <- Row 1
//!         ...
//! ```
//!
//! Pixel `(x, y)` starts at `y * stride + x * 4`.
//!
//! # Usage
//!
//! ```rust
//! use hald_core::PixelBuffer;
//!
//! let mut img = PixelBuffer::new(4, 2);
//! img.set_pixel(1, 1, [255, 128, 0, 255]);
//! assert_eq!(img.pixel(1, 1), [255, 128, 0, 255]);
//!
//! // Borrowed views are what the engine consumes
//! let view = img.view();
//! assert!(view.validate().is_ok());
//! ```

use crate::{Error, Result};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Returns the number of bytes a `width x height` image with the given stride
/// occupies, or `None` if the computation overflows.
///
/// The last row only needs `width * 4` bytes; trailing padding after the
/// final row is not required.
#[inline]
pub fn required_len(width: u32, height: u32, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    let row = (width as usize).checked_mul(BYTES_PER_PIXEL)?;
    (height as usize - 1).checked_mul(stride)?.checked_add(row)
}

/// Borrowed RGBA8 pixel data.
///
/// Constructing a view never fails: it only records the slice and the
/// geometry the caller claims for it. [`validate`](Self::validate) checks
/// whether the data can actually be read as RGBA8, which is how consumers
/// detect absent or truncated backing stores.
///
/// Pixel accessors assume a validated view.
#[derive(Clone, Copy)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Wraps raw pixel data with an explicit stride.
    #[inline]
    pub fn new(data: &'a [u8], width: u32, height: u32, stride: usize) -> Self {
        Self {
            data,
            width,
            height,
            stride,
        }
    }

    /// Wraps tightly packed pixel data (`stride = width * 4`).
    #[inline]
    pub fn packed(data: &'a [u8], width: u32, height: u32) -> Self {
        Self::new(data, width, height, (width as usize).saturating_mul(BYTES_PER_PIXEL))
    }

    /// Returns the view width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the view height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the stride (bytes per row).
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the raw backing slice.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Checks that the data can be read as `width x height` RGBA8 pixels.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] for zero area or overflowing sizes
    /// - [`Error::InvalidStride`] if `stride < width * 4`
    /// - [`Error::BufferTooSmall`] if the slice is shorter than the geometry
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid_dimensions(self.width, self.height, "image has no pixels"));
        }
        let min_stride = (self.width as usize)
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| Error::invalid_dimensions(self.width, self.height, "row size overflows"))?;
        if self.stride < min_stride {
            return Err(Error::InvalidStride {
                stride: self.stride,
                min_stride,
                width: self.width,
            });
        }
        let required = required_len(self.width, self.height, self.stride)
            .ok_or_else(|| Error::invalid_dimensions(self.width, self.height, "buffer size overflows"))?;
        if self.data.len() < required {
            return Err(Error::BufferTooSmall {
                len: self.data.len(),
                required,
            });
        }
        Ok(())
    }

    /// Returns the RGBA pixels of row `y` (exactly `width * 4` bytes).
    #[inline]
    pub fn row(&self, y: u32) -> &'a [u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Returns the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = y as usize * self.stride + x as usize * BYTES_PER_PIXEL;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[offset..offset + BYTES_PER_PIXEL]);
        px
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Copies the view into an owned, tightly packed buffer.
    pub fn to_buffer(&self) -> Result<PixelBuffer> {
        self.validate()?;
        let mut out = PixelBuffer::try_new(self.width, self.height)?;
        for y in 0..self.height {
            out.row_mut(y).copy_from_slice(self.row(y));
        }
        Ok(out)
    }
}

impl std::fmt::Debug for ImageView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageView")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Owned RGBA8 image buffer.
///
/// The geometry is validated on construction, so a `PixelBuffer` can always
/// be read as RGBA8. Buffers created by [`new`](Self::new) and
/// [`try_new`](Self::try_new) are tightly packed; [`from_raw`](Self::from_raw)
/// keeps whatever row padding the caller's data carries.
///
/// # Example
///
/// ```rust
/// use hald_core::PixelBuffer;
///
/// let img = PixelBuffer::filled(16, 16, [10, 20, 30, 255]);
/// assert_eq!(img.pixel(15, 15), [10, 20, 30, 255]);
/// assert_eq!(img.stride(), 64);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
}

impl PixelBuffer {
    /// Creates a tightly packed image filled with zeros.
    ///
    /// # Panics
    ///
    /// Panics if allocation fails. Use [`try_new`](Self::try_new) where
    /// allocation failure must be reported.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = width as usize * BYTES_PER_PIXEL;
        Self {
            data: vec![0; stride * height as usize],
            width,
            height,
            stride,
        }
    }

    /// Creates a tightly packed, zeroed image, reporting allocation failure.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if the byte size overflows `usize`
    /// - [`Error::AllocationFailed`] if the memory cannot be reserved
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let stride = (width as usize)
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "row size overflows"))?;
        let len = stride
            .checked_mul(height as usize)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::allocation_failed(len, e.to_string()))?;
        data.resize(len, 0);

        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Creates a tightly packed image filled with one pixel value.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        let mut img = Self::new(width, height);
        img.fill(pixel);
        img
    }

    /// Takes ownership of raw pixel data with an explicit stride.
    ///
    /// # Errors
    ///
    /// Fails with the same errors as [`ImageView::validate`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use hald_core::PixelBuffer;
    ///
    /// // 2x2 image, rows padded to 12 bytes
    /// let data = vec![0u8; 12 + 8];
    /// let img = PixelBuffer::from_raw(2, 2, 12, data).unwrap();
    /// assert_eq!(img.stride(), 12);
    /// ```
    pub fn from_raw(width: u32, height: u32, stride: usize, data: Vec<u8>) -> Result<Self> {
        ImageView::new(&data, width, height, stride).validate()?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Takes ownership of tightly packed pixel data.
    pub fn from_packed(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let stride = (width as usize).saturating_mul(BYTES_PER_PIXEL);
        Self::from_raw(width, height, stride, data)
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the stride (bytes per row).
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the raw pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its raw bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Borrows the buffer as an [`ImageView`].
    #[inline]
    pub fn view(&self) -> ImageView<'_> {
        ImageView::new(&self.data, self.width, self.height, self.stride)
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + x as usize * BYTES_PER_PIXEL
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[offset..offset + BYTES_PER_PIXEL]);
        px
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&pixel);
    }

    /// Fills every pixel with one value. Row padding is left untouched.
    pub fn fill(&mut self, pixel: [u8; 4]) {
        for y in 0..self.height {
            for px in self.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                px.copy_from_slice(&pixel);
            }
        }
    }

    /// Returns the RGBA pixels of row `y` (exactly `width * 4` bytes).
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Returns row `y` mutably (exactly `width * 4` bytes).
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.stride;
        let end = start + self.width as usize * BYTES_PER_PIXEL;
        &mut self.data[start..end]
    }

    /// Iterates over all pixels with their coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [u8; 4])> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<'a> From<&'a PixelBuffer> for ImageView<'a> {
    fn from(buf: &'a PixelBuffer) -> Self {
        buf.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let img = PixelBuffer::new(100, 50);
        assert_eq!(img.dimensions(), (100, 50));
        assert_eq!(img.stride(), 400);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.data().len(), 20000);
    }

    #[test]
    fn test_buffer_set_get_pixel() {
        let mut img = PixelBuffer::new(10, 10);
        img.set_pixel(5, 5, [255, 0, 0, 255]);
        assert_eq!(img.pixel(5, 5), [255, 0, 0, 255]);
        assert_eq!(img.pixel(0, 0), [0, 0, 0, 0]);
        assert!(img.get_pixel(10, 0).is_none());
    }

    #[test]
    fn test_from_raw_with_padding() {
        // 3x2, stride 16 (4 bytes of padding per row)
        let mut data = vec![0u8; 16 + 12];
        data[16..20].copy_from_slice(&[1, 2, 3, 4]);
        let img = PixelBuffer::from_raw(3, 2, 16, data).unwrap();
        assert_eq!(img.pixel(0, 1), [1, 2, 3, 4]);
        assert_eq!(img.row(1).len(), 12);
    }

    #[test]
    fn test_fill_skips_padding() {
        let data = vec![7u8; 16 + 12];
        let mut img = PixelBuffer::from_raw(3, 2, 16, data).unwrap();
        img.fill([1, 1, 1, 1]);
        assert_eq!(&img.data()[12..16], &[7, 7, 7, 7]);
        assert_eq!(img.pixel(2, 1), [1, 1, 1, 1]);
    }

    #[test]
    fn test_view_validation() {
        let data = vec![0u8; 32];
        assert!(ImageView::packed(&data, 4, 2).validate().is_ok());

        let err = ImageView::new(&data, 4, 2, 8).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidStride { min_stride: 16, .. }));

        let err = ImageView::packed(&data, 4, 3).validate().unwrap_err();
        assert!(matches!(err, Error::BufferTooSmall { len: 32, required: 48 }));

        let err = ImageView::packed(&[], 0, 0).validate().unwrap_err();
        assert!(err.is_unreadable());
    }

    #[test]
    fn test_required_len_ignores_trailing_padding() {
        assert_eq!(required_len(2, 3, 12), Some(12 * 2 + 8));
        assert_eq!(required_len(0, 3, 12), Some(0));
        assert_eq!(required_len(u32::MAX, u32::MAX, usize::MAX), None);
    }

    #[test]
    fn test_view_to_buffer_packs_rows() {
        let mut data = vec![0u8; 12 + 8];
        data[12..16].copy_from_slice(&[9, 8, 7, 6]);
        let view = ImageView::new(&data, 2, 2, 12);
        let packed = view.to_buffer().unwrap();
        assert_eq!(packed.stride(), 8);
        assert_eq!(packed.pixel(0, 1), [9, 8, 7, 6]);
    }

    #[test]
    fn test_try_new_overflow() {
        // u32::MAX * 4 * u32::MAX overflows on every target
        let err = PixelBuffer::try_new(u32::MAX, u32::MAX).unwrap_err();
        assert!(err.is_unreadable() || err.is_allocation_error());
    }
}
