use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use scp::config::AppConfig;
use scp_core::mapper;
use scp_types::{hue, PointerRates, Rgba};
use std::path::PathBuf;

/// scp - inspect and compose colors the way the picker maps them
#[derive(Parser, Debug)]
#[command(name = "scp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0", global = true)]
    debug: u8,

    /// Config file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a color and show where the picker handles would go
    Inspect {
        /// Color in #rgb, #rrggbb, #argb, #aarrggbb, rgb() or rgba() form
        color: String,
    },
    /// Build a color from handle positions
    Compose {
        /// Hue ramp rate (0..1)
        #[arg(long, value_parser = parse_rate)]
        hue: f64,
        /// Square horizontal rate (0 = white, 1 = full hue)
        #[arg(short, long, value_parser = parse_rate, default_value = "1")]
        x: f64,
        /// Square vertical rate (0 = bright, 1 = black)
        #[arg(short, long, value_parser = parse_rate, default_value = "0")]
        y: f64,
        /// Alpha ramp rate (0 = opaque, 1 = transparent)
        #[arg(short, long, value_parser = parse_rate, default_value = "0")]
        alpha: f64,
    },
    /// Print the hue ramp
    Ramp {
        /// Distance between samples
        #[arg(short, long, value_parser = parse_step, default_value = "0.1")]
        step: f64,
    },
}

/// Parse a rate in 0..=1
fn parse_rate(s: &str) -> Result<f64, String> {
    let rate = s
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid rate {}: {}", s, e))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("Rate must be between 0 and 1, got: {}", s));
    }
    Ok(rate)
}

/// Smallest ramp step accepted on the command line
const MIN_STEP: f64 = 0.001;

/// Parse a ramp step in MIN_STEP..=1
fn parse_step(s: &str) -> Result<f64, String> {
    let step = parse_rate(s)?;
    if step < MIN_STEP {
        return Err(format!("Step must be at least {}, got: {}", MIN_STEP, s));
    }
    Ok(step)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        }),
    };
    info!("Using options {:?}", config.options);

    match cli.command {
        Command::Inspect { color } => inspect(&color),
        Command::Compose { hue, x, y, alpha } => {
            let rates = PointerRates::new(hue, x, y, alpha);
            let color = mapper::pointer_to_color(&rates, config.options.transparency);
            println!("{}", color);
            Ok(())
        }
        Command::Ramp { step } => ramp(step),
    }
}

fn inspect(input: &str) -> Result<()> {
    let color = Rgba::parse(input)?;
    let recovered = mapper::color_to_pointers(&color);

    println!("input:     {}", input);
    println!("channels:  r={} g={} b={} a={}", color.r, color.g, color.b, color.a);
    println!("canonical: {}", color);
    match recovered.hue {
        Some(rate) => println!("hue rate:  {:.2}", rate),
        None => println!("hue rate:  - (achromatic)"),
    }
    println!("alpha rate: {:.2}", recovered.alpha);
    Ok(())
}

fn ramp(step: f64) -> Result<()> {
    if !(MIN_STEP..=1.0).contains(&step) {
        anyhow::bail!("Step must be between {} and 1, got: {}", MIN_STEP, step);
    }
    let samples = (1.0 / step).floor() as usize;
    for i in 0..=samples {
        let rate = (i as f64 * step).min(1.0);
        let color = Rgba::from_rgb(hue::hue_at(rate), 1.0).ceil();
        println!("{:.2}  {}", rate, color);
    }
    Ok(())
}
