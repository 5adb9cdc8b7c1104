//! Interpolation methods for cube evaluation.
//!
//! 8-bit channels are quantized to cube coordinates by integer division by
//! four. The two bits lost by the division become the interpolation weight
//! toward the next lattice point, so `t` is always one of 0, 0.25, 0.5, 0.75.

use crate::strip::MAX_INDEX;
use crate::CubeLookup;

/// Channel values per lattice step.
pub const STEP: u8 = 4;

/// Interpolation method for cube evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Lattice lookup at the floor point, no interpolation.
    Floor,

    /// Separable per-axis interpolation.
    ///
    /// Each output channel blends the floor entry with the entry one step
    /// further along that channel's own axis, the other two coordinates
    /// held at floor.
    #[default]
    PerAxis,

    /// Full 8-corner trilinear interpolation.
    Trilinear,
}

/// Linear interpolation between two values.
///
/// Exact at both ends: returns `a` for `t = 0.0` and `b` for `t = 1.0`
/// whenever `b - a` is representable.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Splits an 8-bit channel into its cube coordinate and fractional weight.
///
/// ```rust
/// use hald_lut::quantize;
///
/// assert_eq!(quantize(0), (0, 0.0));
/// assert_eq!(quantize(130), (32, 0.5));
/// assert_eq!(quantize(255), (63, 0.75));
/// ```
#[inline]
pub fn quantize(channel: u8) -> (u8, f32) {
    let q = channel / STEP;
    let t = f32::from(channel % STEP) / f32::from(STEP);
    (q, t)
}

#[inline]
fn ceil(q: u8) -> u8 {
    (q + 1).min(MAX_INDEX)
}

#[inline]
fn to_f32(c: [u8; 3]) -> [f32; 3] {
    [f32::from(c[0]), f32::from(c[1]), f32::from(c[2])]
}

/// Evaluates the LUT-only color of an RGB8 input.
///
/// # Example
///
/// ```rust
/// use hald_lut::{sample, Interpolation, LutCube};
///
/// let cube = LutCube::identity();
/// let out = sample(&cube, [252, 252, 252], Interpolation::PerAxis);
/// assert_eq!(out, [255.0, 255.0, 255.0]);
/// ```
pub fn sample<L: CubeLookup + ?Sized>(lut: &L, rgb: [u8; 3], method: Interpolation) -> [f32; 3] {
    match method {
        Interpolation::Floor => sample_floor(lut, rgb),
        Interpolation::PerAxis => sample_per_axis(lut, rgb),
        Interpolation::Trilinear => sample_trilinear(lut, rgb),
    }
}

fn sample_floor<L: CubeLookup + ?Sized>(lut: &L, rgb: [u8; 3]) -> [f32; 3] {
    to_f32(lut.lookup(rgb[0] / STEP, rgb[1] / STEP, rgb[2] / STEP))
}

fn sample_per_axis<L: CubeLookup + ?Sized>(lut: &L, rgb: [u8; 3]) -> [f32; 3] {
    let (r, tr) = quantize(rgb[0]);
    let (g, tg) = quantize(rgb[1]);
    let (b, tb) = quantize(rgb[2]);

    let base = lut.lookup(r, g, b);
    let mut out = to_f32(base);

    // A zero remainder lands exactly on the lattice; the neighbour is never read.
    if tr > 0.0 {
        let hi = lut.lookup(ceil(r), g, b);
        out[0] = lerp(out[0], f32::from(hi[0]), tr);
    }
    if tg > 0.0 {
        let hi = lut.lookup(r, ceil(g), b);
        out[1] = lerp(out[1], f32::from(hi[1]), tg);
    }
    if tb > 0.0 {
        let hi = lut.lookup(r, g, ceil(b));
        out[2] = lerp(out[2], f32::from(hi[2]), tb);
    }
    out
}

fn sample_trilinear<L: CubeLookup + ?Sized>(lut: &L, rgb: [u8; 3]) -> [f32; 3] {
    let (r0, tr) = quantize(rgb[0]);
    let (g0, tg) = quantize(rgb[1]);
    let (b0, tb) = quantize(rgb[2]);
    let (r1, g1, b1) = (ceil(r0), ceil(g0), ceil(b0));

    let c000 = to_f32(lut.lookup(r0, g0, b0));
    let c100 = to_f32(lut.lookup(r1, g0, b0));
    let c010 = to_f32(lut.lookup(r0, g1, b0));
    let c110 = to_f32(lut.lookup(r1, g1, b0));
    let c001 = to_f32(lut.lookup(r0, g0, b1));
    let c101 = to_f32(lut.lookup(r1, g0, b1));
    let c011 = to_f32(lut.lookup(r0, g1, b1));
    let c111 = to_f32(lut.lookup(r1, g1, b1));

    let mut out = [0.0f32; 3];
    for i in 0..3 {
        let c00 = lerp(c000[i], c100[i], tr);
        let c01 = lerp(c001[i], c101[i], tr);
        let c10 = lerp(c010[i], c110[i], tr);
        let c11 = lerp(c011[i], c111[i], tr);

        let c0 = lerp(c00, c10, tg);
        let c1 = lerp(c01, c11, tg);

        out[i] = lerp(c0, c1, tb);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LutCube;
    use approx::assert_relative_eq;

    /// Cube whose entries are the lattice coordinate times 4, so the
    /// interpolated value along each axis is the input channel itself.
    fn ramp() -> LutCube {
        LutCube::from_fn(|r, g, b| [r * 4, g * 4, b * 4])
    }

    #[test]
    fn test_quantize_fraction_matches_division() {
        for c in 0..=255u8 {
            let (q, t) = quantize(c);
            assert_eq!(q, c / 4);
            assert_relative_eq!(t, f32::from(c) / 4.0 - f32::from(q));
        }
    }

    #[test]
    fn test_per_axis_interpolates_each_channel() {
        let out = sample(&ramp(), [129, 66, 3], Interpolation::PerAxis);
        assert_relative_eq!(out[0], 129.0);
        assert_relative_eq!(out[1], 66.0);
        assert_relative_eq!(out[2], 3.0);
    }

    #[test]
    fn test_per_axis_uses_single_axis_neighbour() {
        // Entries depend on all three coordinates. Red must blend between
        // (r, g, b) and (r+1, g, b) only.
        let cube = LutCube::from_fn(|r, g, b| [r + g + b, 0, 0]);
        let out = sample(&cube, [2, 4, 4], Interpolation::PerAxis);
        // floor (0,1,1) -> 2, red ceiling (1,1,1) -> 3, t = 0.5
        assert_relative_eq!(out[0], 2.5);
    }

    #[test]
    fn test_lattice_values_skip_interpolation() {
        // 128 sits on the lattice (q = 32); the red neighbour must not leak in.
        let cube = LutCube::from_fn(|r, _, _| if r == 33 { [200, 0, 0] } else { [10, 0, 0] });
        let out = sample(&cube, [128, 0, 0], Interpolation::PerAxis);
        assert_eq!(out[0], 10.0);
    }

    #[test]
    fn test_top_edge_clamps() {
        let out = sample(&LutCube::identity(), [255, 255, 255], Interpolation::PerAxis);
        assert_eq!(out, [255.0, 255.0, 255.0]);
    }

    #[test]
    fn test_floor_ignores_fraction() {
        let out = sample(&ramp(), [131, 7, 255], Interpolation::Floor);
        assert_eq!(out, [128.0, 4.0, 252.0]);
    }

    #[test]
    fn test_trilinear_matches_per_axis_on_separable_cube() {
        // On a cube where each output only depends on its own axis both
        // methods agree.
        let cube = ramp();
        for rgb in [[1u8, 2, 3], [130, 67, 250], [255, 0, 129]] {
            let a = sample(&cube, rgb, Interpolation::PerAxis);
            let b = sample(&cube, rgb, Interpolation::Trilinear);
            for i in 0..3 {
                assert_relative_eq!(a[i], b[i], epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_trilinear_blends_all_corners() {
        let cube = LutCube::from_fn(|r, g, b| [r + g + b, 0, 0]);
        // floor (0,0,0); all fractions 0.5
        let out = sample(&cube, [2, 2, 2], Interpolation::Trilinear);
        assert_relative_eq!(out[0], 1.5);
        // per-axis only moves along red
        let out = sample(&cube, [2, 2, 2], Interpolation::PerAxis);
        assert_relative_eq!(out[0], 0.5);
    }
}
