//! Grade a raw RGBA8 image through a Hald strip.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use hald_core::ImageView;
use hald_lut::Interpolation;
use hald_ops::{transform_with, GradeOptions, Intensity};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use super::{load_raw, load_square, save_raw};

/// Arguments for the apply command
#[derive(Args, Clone)]
pub struct ApplyArgs {
    /// Input image (headerless RGBA8)
    pub input: PathBuf,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    pub width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    pub height: u32,

    /// Input row stride in bytes (default: width * 4)
    #[arg(long)]
    pub stride: Option<usize>,

    /// LUT strip (headerless 512x512 RGBA8)
    #[arg(short, long)]
    pub lut: PathBuf,

    /// Output image (headerless RGBA8, tightly packed)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Blend amount, 0.0 (original) to 1.0 (LUT only)
    #[arg(short, long, conflicts_with = "percent")]
    pub intensity: Option<f32>,

    /// Blend amount as a slider percentage, 0 to 100 [default: 60]
    #[arg(short, long)]
    pub percent: Option<f32>,

    /// Cube evaluation method
    #[arg(long, value_enum, default_value = "per-axis")]
    pub interp: InterpArg,

    /// Process rows on a single thread
    #[arg(long)]
    pub serial: bool,
}

/// Command line names for [`Interpolation`].
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpArg {
    /// Nearest lower lattice point
    Floor,
    /// Each channel blended with its own axis neighbour
    PerAxis,
    /// Full 8-corner interpolation
    Trilinear,
}

impl From<InterpArg> for Interpolation {
    fn from(arg: InterpArg) -> Self {
        match arg {
            InterpArg::Floor => Interpolation::Floor,
            InterpArg::PerAxis => Interpolation::PerAxis,
            InterpArg::Trilinear => Interpolation::Trilinear,
        }
    }
}

impl ApplyArgs {
    /// Resolves the blend amount, falling back to the slider default.
    pub fn intensity(&self) -> Intensity {
        match (self.percent, self.intensity) {
            (Some(p), _) => Intensity::from_percent(p),
            (None, Some(i)) => Intensity::new(i),
            (None, None) => Intensity::SLIDER_DEFAULT,
        }
    }

    fn options(&self) -> GradeOptions {
        GradeOptions::default()
            .with_interpolation(self.interp.into())
            .with_parallel(!self.serial)
    }
}

pub fn run(args: ApplyArgs) -> Result<()> {
    let source = load_raw(&args.input, args.width, args.height, args.stride)?;
    let (lut_data, side) = load_square(&args.lut)?;
    let lut = ImageView::packed(&lut_data, side, side);

    let intensity = args.intensity();
    let options = args.options();
    debug!(
        lut = %args.lut.display(),
        intensity = intensity.value(),
        interp = ?options.interpolation,
        parallel = options.parallel,
        "grading"
    );

    let start = Instant::now();
    let graded = transform_with(source.view(), lut, intensity, &options)
        .with_context(|| format!("Failed to grade {} with {}", args.input.display(), args.lut.display()))?;

    save_raw(&args.output, &graded)?;
    info!(
        "{} -> {} ({}x{}, {:.0}%, {:.1} ms)",
        args.input.display(),
        args.output.display(),
        graded.width(),
        graded.height(),
        intensity.percent(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}
