//! LUT grading with intensity blending.
//!
//! Every source pixel is pushed through the cube and mixed back with its
//! original color:
//!
//! 1. Quantize each channel to a cube coordinate (`c / 4`)
//! 2. Evaluate the cube ([`Interpolation::PerAxis`] by default)
//! 3. Blend: `out = src + (graded - src) * intensity`
//! 4. Round to the nearest 8-bit value; alpha is copied
//!
//! Pixels are independent. The output is always a freshly allocated,
//! tightly packed buffer; caller pixels are only read.
//!
//! # Example
//!
//! ```rust
//! use hald_core::PixelBuffer;
//! use hald_lut::LutCube;
//! use hald_ops::transform;
//!
//! let lut = LutCube::identity().to_strip();
//! let src = PixelBuffer::filled(2, 2, [252, 252, 252, 128]);
//!
//! let out = transform(src.view(), lut.view(), 1.0).unwrap();
//! assert_eq!(out.pixel(1, 1), [255, 255, 255, 128]);
//! ```

use crate::parallel::for_each_row;
use crate::{EngineError, EngineResult, GradeOptions, Intensity};
use hald_core::{ImageView, PixelBuffer, BYTES_PER_PIXEL};
use hald_lut::{lerp, sample, CubeLookup, HaldStrip, Interpolation};

/// Grades `source` through the strip `lut` with default options.
///
/// # Errors
///
/// - [`EngineError::InvalidImage`] if either image cannot be read as RGBA8
/// - [`EngineError::MalformedLut`] if `lut` is not 512x512
/// - [`EngineError::AllocationFailed`] if the output cannot be allocated
pub fn transform(
    source: ImageView<'_>,
    lut: ImageView<'_>,
    intensity: impl Into<Intensity>,
) -> EngineResult<PixelBuffer> {
    transform_with(source, lut, intensity, &GradeOptions::default())
}

/// Grades `source` through the strip `lut`.
///
/// The strip is validated once and read in place.
pub fn transform_with(
    source: ImageView<'_>,
    lut: ImageView<'_>,
    intensity: impl Into<Intensity>,
    options: &GradeOptions,
) -> EngineResult<PixelBuffer> {
    check_source(&source)?;
    let strip = HaldStrip::new(lut)?;
    grade(source, &strip, intensity.into(), options)
}

/// Grades `source` through an already decoded cube.
///
/// Use this with a cached [`LutCube`](hald_lut::LutCube) when the same LUT
/// is applied repeatedly.
pub fn transform_cube<L>(
    source: ImageView<'_>,
    lut: &L,
    intensity: impl Into<Intensity>,
    options: &GradeOptions,
) -> EngineResult<PixelBuffer>
where
    L: CubeLookup + Sync + ?Sized,
{
    check_source(&source)?;
    grade(source, lut, intensity.into(), options)
}

fn check_source(source: &ImageView<'_>) -> EngineResult<()> {
    source
        .validate()
        .map_err(|e| EngineError::InvalidImage(format!("source: {e}")))
}

fn grade<L>(
    source: ImageView<'_>,
    lut: &L,
    intensity: Intensity,
    options: &GradeOptions,
) -> EngineResult<PixelBuffer>
where
    L: CubeLookup + Sync + ?Sized,
{
    let (width, height) = source.dimensions();
    let mut out = PixelBuffer::try_new(width, height)?;
    let stride = out.stride();
    let method = options.interpolation;

    for_each_row(out.data_mut(), stride, options.parallel, |y, row| {
        let src = source.row(y as u32);
        if intensity.is_none() {
            row.copy_from_slice(src);
            return;
        }
        for (s, d) in src
            .chunks_exact(BYTES_PER_PIXEL)
            .zip(row.chunks_exact_mut(BYTES_PER_PIXEL))
        {
            let px = grade_pixel(lut, [s[0], s[1], s[2], s[3]], intensity, method);
            d.copy_from_slice(&px);
        }
    });

    Ok(out)
}

/// Grades one RGBA pixel.
///
/// # Example
///
/// ```rust
/// use hald_lut::{Interpolation, LutCube};
/// use hald_ops::{grade_pixel, Intensity};
///
/// let cube = LutCube::from_fn(|_, _, _| [200, 100, 0]);
/// let px = grade_pixel(&cube, [100, 100, 100, 7], Intensity::new(0.5), Interpolation::PerAxis);
/// assert_eq!(px, [150, 100, 50, 7]);
/// ```
#[inline]
pub fn grade_pixel<L>(lut: &L, px: [u8; 4], intensity: Intensity, method: Interpolation) -> [u8; 4]
where
    L: CubeLookup + ?Sized,
{
    let graded = sample(lut, [px[0], px[1], px[2]], method);
    let t = intensity.value();
    [
        blend(px[0], graded[0], t),
        blend(px[1], graded[1], t),
        blend(px[2], graded[2], t),
        px[3],
    ]
}

/// Mixes a source channel toward its graded value and rounds to 8 bits.
///
/// Exact at `t = 0` (source) and `t = 1` (graded), monotone in between.
#[inline]
pub fn blend(src: u8, graded: f32, t: f32) -> u8 {
    to_u8(lerp(f32::from(src), graded, t))
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
