//! rectscan CLI — command-line front end for rectangular feature detection.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use rectscan::overlay::render_overlay;
use rectscan::sample::{generate_sample, SampleConfig, SampleShape};
use rectscan::{DetectConfig, Detector, EdgeMethod, SizeRange};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "rectscan")]
#[command(about = "Detect rectangular flat-colored features via outline color coherence")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect features in an image.
    Detect(CliDetectArgs),

    /// Generate a synthetic sample image with known features.
    Sample(CliSampleArgs),
}

#[derive(Debug, Clone, Args)]
struct CliDetectArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write detection results (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Path to write an overlay image with accepted boxes drawn.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Minimum candidate width (pixels, inclusive).
    #[arg(long, default_value = "0")]
    min_w: u32,

    /// Maximum candidate width (pixels, inclusive).
    #[arg(long, default_value = "10000")]
    max_w: u32,

    /// Minimum candidate height (pixels, inclusive).
    #[arg(long, default_value = "0")]
    min_h: u32,

    /// Maximum candidate height (pixels, inclusive).
    #[arg(long, default_value = "10000")]
    max_h: u32,

    /// CIE76 Delta-E acceptance threshold in standard Lab units.
    #[arg(long, default_value = "2.3")]
    threshold: f32,

    /// Edge detection method ("canny" or "sobel"); unrecognized values
    /// fall back to canny.
    #[arg(long, default_value = "canny")]
    edge_method: String,

    /// Reduce each accepted region to a representative hex color.
    #[arg(long)]
    dominant_color: bool,
}

#[derive(Debug, Clone, Args)]
struct CliSampleArgs {
    /// Path to write the generated image (PNG).
    #[arg(long)]
    out: PathBuf,

    /// Path to write the ground-truth placements (JSON).
    #[arg(long)]
    truth: Option<PathBuf>,

    /// Image width (pixels).
    #[arg(long, default_value = "640")]
    width: u32,

    /// Image height (pixels).
    #[arg(long, default_value = "480")]
    height: u32,

    /// Number of features to place.
    #[arg(long, default_value = "10")]
    num_features: usize,

    /// Minimum feature size (pixels).
    #[arg(long, default_value = "10")]
    min_size: u32,

    /// Maximum feature size (pixels).
    #[arg(long, default_value = "40")]
    max_size: u32,

    /// Background color as #rrggbb.
    #[arg(long, default_value = "#e8e8e8")]
    bg_color: String,

    /// Draw every feature in this fixed #rrggbb color instead of random
    /// contrasting colors.
    #[arg(long)]
    feature_color: Option<String>,

    /// Shape of the generated features.
    #[arg(long, value_enum, default_value_t = SampleShapeArg::Mixed)]
    shape: SampleShapeArg,

    /// RNG seed; the same seed reproduces the same scene.
    #[arg(long, default_value = "7")]
    seed: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SampleShapeArg {
    Rectangle,
    Ellipse,
    Mixed,
}

impl SampleShapeArg {
    fn to_core(self) -> SampleShape {
        match self {
            Self::Rectangle => SampleShape::Rectangle,
            Self::Ellipse => SampleShape::Ellipse,
            Self::Mixed => SampleShape::Mixed,
        }
    }
}

fn parse_hex_color(hex: &str) -> CliResult<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid color {hex:?}: expected #rrggbb").into());
    }
    Ok([
        u8::from_str_radix(&digits[0..2], 16)?,
        u8::from_str_radix(&digits[2..4], 16)?,
        u8::from_str_radix(&digits[4..6], 16)?,
    ])
}

fn run_detect(args: &CliDetectArgs) -> CliResult<()> {
    tracing::info!("Loading image: {}", args.image.display());
    let image = image::open(&args.image)?.to_rgb8();
    let (w, h) = image.dimensions();
    tracing::info!("Image size: {}x{}", w, h);

    let config = DetectConfig {
        size_range: SizeRange::new(args.min_w, args.max_w, args.min_h, args.max_h),
        delta_e_threshold: args.threshold,
        edge_method: EdgeMethod::parse_lenient(&args.edge_method),
        extract_dominant_color: args.dominant_color,
    };
    let detector = Detector::with_config(config);
    let result = detector.detect(&image)?;

    tracing::info!(
        "{} boxes accepted in {:.1} ms",
        result.bounding_boxes.len(),
        result.processing_time_ms
    );

    let json = serde_json::to_string_pretty(&result)?;
    std::fs::write(&args.out, json)?;
    tracing::info!("Results written to {}", args.out.display());

    if let Some(overlay_path) = &args.overlay {
        let overlay = render_overlay(&image, &result.bounding_boxes);
        overlay.save(overlay_path)?;
        tracing::info!("Overlay written to {}", overlay_path.display());
    }
    Ok(())
}

fn run_sample(args: &CliSampleArgs) -> CliResult<()> {
    let config = SampleConfig {
        width: args.width,
        height: args.height,
        num_features: args.num_features,
        min_size: args.min_size,
        max_size: args.max_size,
        bg_color: parse_hex_color(&args.bg_color)?,
        random_colors: args.feature_color.is_none(),
        feature_color: args
            .feature_color
            .as_deref()
            .map(parse_hex_color)
            .transpose()?
            .unwrap_or([0xff, 0x00, 0x00]),
        shape: args.shape.to_core(),
        seed: args.seed,
    };

    let (image, features) = generate_sample(&config);
    image.save(&args.out)?;
    tracing::info!(
        "Sample with {} features written to {}",
        features.len(),
        args.out.display()
    );

    if let Some(truth_path) = &args.truth {
        let json = serde_json::to_string_pretty(&features)?;
        std::fs::write(truth_path, json)?;
        tracing::info!("Ground truth written to {}", truth_path.display());
    }
    Ok(())
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Sample(args) => run_sample(&args),
    }
}
