//! Write the neutral LUT strip.
//!
//! Useful as a starting point for authoring a grade in an image editor:
//! color-correct the strip, then feed it back to `hald apply`.

use anyhow::Result;
use clap::Args;
use hald_lut::LutCube;
use std::path::PathBuf;
use tracing::info;

use super::save_raw;

/// Arguments for the identity command
#[derive(Args, Clone)]
pub struct IdentityArgs {
    /// Output strip (headerless 512x512 RGBA8)
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(args: IdentityArgs) -> Result<()> {
    let strip = LutCube::identity().to_strip();
    save_raw(&args.output, &strip)?;
    info!("Wrote identity strip {}x{} to {}", strip.width(), strip.height(), args.output.display());
    Ok(())
}
