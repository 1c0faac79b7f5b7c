use clap::{Parser, Subcommand, ValueEnum};
use imgfit::{EncoderOptions, FitStrategy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgfit")]
#[command(about = "Fit an image into a bounding box and re-encode it")]
#[command(long_about = "\
Fit an image into a bounding box and re-encode it

Strategies:
  contain     scale to fit entirely within the box (aspect preserved)
  cover       scale to cover the box, center-crop the overflow
  fill        stretch to the box exactly (aspect ignored)
  scale-down  like contain, but never upscale

The output format is inferred from the destination extension unless --format
is given. --quality implies --format jpeg; --compression implies --format png.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Shared arguments for all fit strategies.
#[derive(clap::Args)]
struct FitArgs {
    /// Source image file
    source: PathBuf,

    /// Destination file (parent directories are created)
    destination: PathBuf,

    /// Target box width in pixels
    width: u32,

    /// Target box height in pixels
    height: u32,

    /// Output format (default: inferred from the destination extension)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// JPEG quality, 0-100
    #[arg(long)]
    quality: Option<u8>,

    /// PNG compression level, 1-9
    #[arg(long)]
    compression: Option<u8>,
}

#[derive(Subcommand)]
enum Command {
    /// Scale to fit entirely within the box, preserving aspect ratio
    Contain(FitArgs),
    /// Scale to cover the box, then center-crop to it
    Cover(FitArgs),
    /// Stretch to the box exactly, ignoring aspect ratio
    Fill(FitArgs),
    /// Like contain, but never upscale a smaller source
    ScaleDown(FitArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Gif,
    Jpeg,
    Png,
}

/// Build encoder options from the format/parameter flags, or None to defer
/// to extension-based encoder selection.
fn encoder_options(args: &FitArgs) -> Option<EncoderOptions> {
    let format = args.format.or_else(|| {
        if args.quality.is_some() {
            Some(OutputFormat::Jpeg)
        } else if args.compression.is_some() {
            Some(OutputFormat::Png)
        } else {
            None
        }
    })?;

    Some(match format {
        OutputFormat::Gif => EncoderOptions::Gif,
        OutputFormat::Jpeg => EncoderOptions::Jpeg {
            quality: args.quality,
        },
        OutputFormat::Png => EncoderOptions::Png {
            compression: args.compression,
        },
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let (strategy, args) = match cli.command {
        Command::Contain(args) => (FitStrategy::Contain, args),
        Command::Cover(args) => (FitStrategy::Cover, args),
        Command::Fill(args) => (FitStrategy::Fill, args),
        Command::ScaleDown(args) => (FitStrategy::ScaleDown, args),
    };

    let options = encoder_options(&args);
    let canvas = imgfit::generate(
        &args.source,
        &args.destination,
        args.width,
        args.height,
        strategy,
        options,
    )?;

    println!(
        "{} ({}x{})",
        args.destination.display(),
        canvas.width,
        canvas.height
    );
    Ok(())
}
