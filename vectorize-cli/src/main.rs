//! Command-line front end for vectorize-core.
//!
//! Loads a raster image, optionally quantizes/thins it, traces pixel
//! outlines, fits cubic Bezier splines, and writes an SVG. Every
//! [`vectorize_core::FittingOptions`] field is exposed as a flag, named
//! after AutoTrace's own `--corner-surround`-style options, since that's
//! the vocabulary anyone porting a `.at` profile already knows.

mod loader;
mod svg_writer;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use vectorize_core::{bitmap, find_outline_pixels, fitted_splines, FittingOptions, Rgb};

#[derive(Parser)]
#[command(name = "vectorize-cli")]
#[command(about = "Trace a segmented bitmap into an SVG of cubic Bezier splines")]
#[command(version)]
struct Cli {
    /// Input image file (any format the `image` crate decodes, including PNM).
    input: PathBuf,

    /// Output SVG file.
    output: PathBuf,

    /// Fitting options as a JSON file; CLI flags below override individual fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append a log of this run to this file, in addition to stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,

    /// Background color to exclude, as "R,G,B" (e.g. "255,255,255").
    #[arg(long)]
    background_color: Option<String>,

    /// Palette size for pre-quantization; 0 disables.
    #[arg(long)]
    color_count: Option<u32>,

    /// Run morphological thinning before tracing.
    #[arg(long)]
    thin: bool,

    #[arg(long)]
    corner_always_threshold: Option<f64>,
    #[arg(long)]
    corner_surround: Option<usize>,
    #[arg(long)]
    corner_threshold: Option<f64>,
    #[arg(long)]
    error_threshold: Option<f64>,
    #[arg(long)]
    filter_alternative_surround: Option<usize>,
    #[arg(long)]
    filter_epsilon: Option<f64>,
    #[arg(long)]
    filter_iteration_count: Option<u32>,
    #[arg(long)]
    filter_percent: Option<f64>,
    #[arg(long)]
    filter_surround: Option<usize>,
    #[arg(long)]
    line_reversion_threshold: Option<f64>,
    #[arg(long)]
    line_threshold: Option<f64>,
    #[arg(long)]
    reparameterize_improve: Option<f64>,
    #[arg(long)]
    reparameterize_threshold: Option<f64>,
    #[arg(long)]
    subdivide_search: Option<f64>,
    #[arg(long)]
    subdivide_surround: Option<usize>,
    #[arg(long)]
    subdivide_threshold: Option<f64>,
    #[arg(long)]
    tangent_surround: Option<usize>,
    #[arg(long)]
    remove_adj_corners: bool,

    /// Decimal places kept in emitted SVG path coordinates.
    #[arg(long, default_value = "2")]
    decimal_precision: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    log::info!("Loading image: {}", cli.input.display());
    let mut bmp = loader::load_bitmap(&cli.input)?;

    let opts = build_fitting_options(&cli)?;
    opts.validate().context("invalid fitting options")?;

    if opts.color_count > 0 {
        log::info!("Quantizing to at most {} colors", opts.color_count);
        bitmap::quantize(&mut bmp, opts.color_count, opts.background_color);
    }
    if opts.thin {
        log::info!("Running morphological thinning");
        bitmap::thin(&mut bmp);
    }

    let start = Instant::now();
    let outlines = find_outline_pixels(&bmp, opts.background_color);
    log::info!("Traced {} outline(s) in {:.3}s", outlines.len(), start.elapsed().as_secs_f64());

    let start = Instant::now();
    let splines = fitted_splines(&outlines, &opts).context("fitting failed")?;
    log::info!("Fit {} spline list(s) in {:.3}s", splines.len(), start.elapsed().as_secs_f64());

    let svg_opts = svg_writer::SvgWriteOptions {
        decimal_precision: cli.decimal_precision,
        include_comments: cli.verbose,
    };
    let svg_content = svg_writer::write_svg(&splines, bmp.width(), bmp.height(), &svg_opts);

    fs::write(&cli.output, svg_content)
        .with_context(|| format!("failed to write SVG to: {}", cli.output.display()))?;
    log::info!("SVG saved to: {}", cli.output.display());

    Ok(())
}

/// Set up `env_logger` on stderr and, if `--log-file` was given, duplicate
/// every record to that file too (mirroring AutoTrace's own `-log` flag,
/// which tees warnings to a `<input>.log` file alongside stderr).
fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));

    if let Some(log_path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .with_context(|| format!("failed to open log file: {}", log_path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn build_fitting_options(cli: &Cli) -> Result<FittingOptions> {
    let mut opts = if let Some(path) = &cli.config {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?
    } else {
        FittingOptions::default()
    };

    if let Some(s) = &cli.background_color {
        opts.background_color = Some(parse_rgb(s)?);
    }
    if let Some(v) = cli.color_count {
        opts.color_count = v;
    }
    opts.thin = opts.thin || cli.thin;
    opts.remove_adj_corners = opts.remove_adj_corners || cli.remove_adj_corners;

    macro_rules! override_if_some {
        ($field:ident) => {
            if let Some(v) = cli.$field {
                opts.$field = v;
            }
        };
    }
    override_if_some!(corner_always_threshold);
    override_if_some!(corner_surround);
    override_if_some!(corner_threshold);
    override_if_some!(error_threshold);
    override_if_some!(filter_alternative_surround);
    override_if_some!(filter_epsilon);
    override_if_some!(filter_iteration_count);
    override_if_some!(filter_percent);
    override_if_some!(filter_surround);
    override_if_some!(line_reversion_threshold);
    override_if_some!(line_threshold);
    override_if_some!(subdivide_search);
    override_if_some!(subdivide_surround);
    override_if_some!(subdivide_threshold);
    override_if_some!(tangent_surround);
    if let Some(v) = cli.reparameterize_improve {
        opts.reparameterize_improvement = v;
    }
    if let Some(v) = cli.reparameterize_threshold {
        opts.reparameterize_threshold = v;
    }

    Ok(opts)
}

fn parse_rgb(s: &str) -> Result<Rgb> {
    let parts: Vec<&str> = s.split(',').collect();
    anyhow::ensure!(parts.len() == 3, "expected \"R,G,B\", got \"{s}\"");
    let channel = |i: usize| -> Result<u8> { Ok(parts[i].trim().parse::<u8>()?) };
    Ok(Rgb::new(channel(0)?, channel(1)?, channel(2)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_rgb_triplet() {
        let rgb = parse_rgb("255, 128,0").unwrap();
        assert_eq!(rgb, Rgb::new(255, 128, 0));
    }

    #[test]
    fn rejects_malformed_rgb_triplet() {
        assert!(parse_rgb("255,128").is_err());
        assert!(parse_rgb("255,128,300").is_err());
    }
}
