//! # dealcalc
//!
//! Prices a purchase from a JSON params file.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ──────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr            │
//! │     • Default: warn,dealcalc=info; override with RUST_LOG              │
//! │                                                                         │
//! │  2. Load Config ─────────────────────────────────────────────────────► │
//! │     • defaults → cli.toml → DEALCALC_* → validate                      │
//! │                                                                         │
//! │  3. Build Params ────────────────────────────────────────────────────► │
//! │     • params file, config defaults for tax / shipping                  │
//! │     • --price switches to a single item                                │
//! │                                                                         │
//! │  4. Validate → Calculate → Render ───────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod params;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use dealcalc_core::validation::{parse_amount_strict, validate_params};
use dealcalc_core::{calculate, CalculationParams};

use crate::config::{CliConfig, OutputFormat};
use crate::error::CliError;
use crate::params::{with_single_price, ParamsFile};
use crate::render::{render, RenderOptions};

#[derive(Parser)]
#[command(
    name = "dealcalc",
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
struct Args {
    /// JSON file with the calculation params.
    params: Option<PathBuf>,

    #[arg(long, help = "Config file (default: the user config dir's cli.toml)")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, help = "Output format, overriding the config")]
    format: Option<OutputFormat>,

    #[arg(long, help = "Omit the step trace")]
    no_steps: bool,

    #[arg(long, help = "Also print the copyable summary and share text")]
    summary: bool,

    #[arg(long, help = "Price a single item at this amount, e.g. \"$49.99\"")]
    price: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = CliConfig::load(args.config.clone()).context("loading configuration")?;

    let params = build_params(&args, &config)?;
    validate_params(&params).map_err(CliError::from)?;

    let calculation = calculate(&params);
    info!(final_price = %calculation.result.final_price, "Calculation complete");

    let format = args.format.unwrap_or(config.output.format);
    let options = RenderOptions {
        show_steps: config.output.show_steps && !args.no_steps,
        summary: args.summary,
    };
    println!("{}", render(&calculation, format, options)?);

    Ok(())
}

fn build_params(args: &Args, config: &CliConfig) -> Result<CalculationParams> {
    let file = match &args.params {
        Some(path) => Some(
            ParamsFile::read(path).with_context(|| format!("reading {}", path.display()))?,
        ),
        None => None,
    };
    if file.is_none() && args.price.is_none() {
        return Err(CliError::NothingToPrice.into());
    }

    let params = file.unwrap_or_default().into_params(&config.defaults);
    match &args.price {
        Some(text) => {
            let price = parse_amount_strict(text).map_err(CliError::from)?;
            Ok(with_single_price(params, price))
        }
        None => Ok(params),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show rule selection
/// - `RUST_LOG=trace` - Show every pipeline stage
/// - Default: `warn,dealcalc=info` keeps stderr quiet for scripted use
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    build_subscriber(filter).init();
}

const DEFAULT_LOG_FILTER: &str = "warn,dealcalc=info";

/// Formatting subscriber on stderr; stdout carries the rendered result.
fn build_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_default_filter_limits_levels() {
        let subscriber = build_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "dealcalc_core::pipeline", Level::INFO));
            assert!(!tracing::enabled!(target: "dealcalc_core::pipeline", Level::DEBUG));
            assert!(!tracing::enabled!(target: "dealcalc_core::pipeline", Level::TRACE));
            assert!(tracing::enabled!(target: "some_dep", Level::WARN));
            assert!(!tracing::enabled!(target: "some_dep", Level::DEBUG));
        });
    }

    #[test]
    fn test_explicit_filter_is_honored() {
        let subscriber = build_subscriber(EnvFilter::new("dealcalc_core=trace"));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "dealcalc_core::quantity", Level::TRACE));
            assert!(!tracing::enabled!(target: "some_dep", Level::DEBUG));
        });
    }
}
