//! Grading parameters.

use hald_lut::Interpolation;

/// Blend weight of the graded color, clamped to `[0, 1]`.
///
/// `0.0` reproduces the source, `1.0` applies the LUT fully. Out-of-range
/// values are clamped rather than rejected; NaN counts as `0.0`.
///
/// # Example
///
/// ```rust
/// use hald_ops::Intensity;
///
/// assert_eq!(Intensity::new(1.5).value(), 1.0);
/// assert_eq!(Intensity::new(-0.3).value(), 0.0);
/// assert_eq!(Intensity::from_percent(60.0).value(), 0.6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Intensity(f32);

impl Intensity {
    /// Source passes through unchanged.
    pub const NONE: Self = Self(0.0);
    /// LUT applied fully.
    pub const FULL: Self = Self(1.0);
    /// Starting position of an interactive intensity slider (60%).
    pub const SLIDER_DEFAULT: Self = Self(0.6);

    /// Clamps `value` into `[0, 1]`.
    #[inline]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self::NONE
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Converts a 0-100 slider position.
    #[inline]
    pub fn from_percent(percent: f32) -> Self {
        Self::new(percent / 100.0)
    }

    /// Returns the clamped weight.
    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the weight on the 0-100 slider scale.
    #[inline]
    pub fn percent(self) -> f32 {
        self.0 * 100.0
    }

    /// Returns `true` when the output equals the source.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f32> for Intensity {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<f64> for Intensity {
    fn from(value: f64) -> Self {
        Self::new(value as f32)
    }
}

/// Engine configuration.
///
/// ```rust
/// use hald_ops::GradeOptions;
/// use hald_lut::Interpolation;
///
/// let opts = GradeOptions::default()
///     .with_interpolation(Interpolation::Trilinear)
///     .with_parallel(false);
/// assert!(!opts.parallel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeOptions {
    /// Cube evaluation method.
    pub interpolation: Interpolation,
    /// Spread rows across the rayon pool. Ignored without the `parallel` feature.
    pub parallel: bool,
}

impl GradeOptions {
    /// Sets the interpolation method.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Enables or disables row parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for GradeOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::PerAxis,
            parallel: cfg!(feature = "parallel"),
        }
    }
}
