//! Heatmap renderer command-line tool.
//!
//! Reads points from a file (or generates a seeded random set), renders a
//! density heatmap and writes it as PNG, KML or KMZ.

mod config;
mod output;
mod points;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{HeatmapConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "heatmap")]
#[command(about = "Render point density heatmaps to PNG, KML or KMZ")]
struct Args {
    /// Configuration file path (YAML). Without it, HEATMAP_* variables are read
    #[arg(short, long, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Point file, one `x,y` pair per line; `-` reads stdin
    #[arg(short, long, conflicts_with = "random")]
    input: Option<PathBuf>,

    /// Generate this many random points instead of reading a file
    #[arg(long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Dot radius in pixels
    #[arg(short, long)]
    radius: Option<f64>,

    /// Row bands colored in parallel
    #[arg(short, long)]
    workers: Option<usize>,

    /// Preset scheme name
    #[arg(short, long)]
    scheme: Option<String>,

    /// Gradient image to derive the scheme from
    #[arg(long)]
    gradient: Option<PathBuf>,

    /// Scheme opacity, 0-255
    #[arg(long)]
    opacity: Option<u8>,

    /// Image URL written into KML output
    #[arg(long)]
    image_url: Option<String>,

    /// Log level
    #[arg(long, default_value = "info", env = "HEATMAP_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    /// Command-line values win over the loaded configuration.
    fn apply(&self, config: &mut HeatmapConfig) {
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(scheme) = &self.scheme {
            config.scheme = scheme.clone();
            config.scheme_stops.clear();
        }
        if let Some(gradient) = &self.gradient {
            config.gradient = Some(gradient.clone());
        }
        if let Some(opacity) = self.opacity {
            config.opacity = opacity;
        }
        if let Some(url) = &self.image_url {
            config.image_url = Some(url.clone());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let mut config = match &args.config {
        Some(path) => HeatmapConfig::from_yaml(path)?,
        None => HeatmapConfig::from_env()?,
    };
    args.apply(&mut config);
    info!(
        width = config.width,
        height = config.height,
        radius = config.radius,
        workers = config.workers,
        format = ?config.format,
        "Loaded configuration"
    );

    let scheme = config.build_scheme()?;

    let points = match (&args.input, args.random) {
        (_, Some(count)) => points::random_points(count, args.seed),
        (Some(path), None) => {
            let text = if path.as_os_str() == "-" {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            } else {
                std::fs::read_to_string(path)
                    .with_context(|| format!("reading points from {}", path.display()))?
            };
            points::parse_points(&text)?
        }
        (None, None) => bail!("either --input or --random is required"),
    };
    info!(count = points.len(), "Loaded points");

    let written = output::write_output(&config, &scheme, &points, &args.output)?;
    for path in written {
        info!(path = %path.display(), "Output written");
    }

    Ok(())
}
