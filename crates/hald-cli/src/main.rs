//! hald - Hald LUT grading for raw RGBA8 images
//!
//! Image decoding is left to other tools: inputs and outputs are headerless
//! RGBA8 pixel dumps.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::apply::ApplyArgs;
use commands::identity::IdentityArgs;

#[derive(Parser)]
#[command(name = "hald")]
#[command(author, version, about = "Grade raw RGBA8 images through 512x512 Hald strip LUTs")]
#[command(long_about = "
Applies a 64-level color cube, packed as a 512x512 RGBA8 strip, to a raw
RGBA8 image and blends the result with the original.

Examples:
  hald identity -o neutral.rgba                        # Write the identity strip
  hald apply photo.rgba -W 1920 -H 1080 -l film.rgba -o out.rgba
  hald apply photo.rgba -W 1920 -H 1080 -l film.rgba -o out.rgba -p 60
  hald apply photo.rgba -W 640 -H 480 -l film.rgba -o out.rgba -i 1.0 --interp trilinear
  RUST_LOG=debug hald apply ...                        # Override log filter
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade an image through a LUT strip
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Write the identity LUT strip
    Identity(IdentityArgs),
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Identity(args) => commands::identity::run(args),
    }
}
