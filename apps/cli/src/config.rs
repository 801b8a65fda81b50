//! # CLI Configuration
//!
//! Settings for the `dealcalc` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied in main)             │
//! │     --format json, --no-steps                                          │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     DEALCALC_FORMAT=json                                               │
//! │     DEALCALC_TAX_RATE=8.25                                             │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/dealcalc/cli.toml (Linux)                                │
//! │     ~/Library/Application Support/com.dealcalc.dealcalc/cli.toml      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     human output, steps shown, no tax, free shipping                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cli.toml
//! [output]
//! format = "human"  # human | json
//! show_steps = true
//!
//! [defaults]
//! tax_rate = 825    # basis points, used when a params file has no taxRate
//! shipping = { kind = "standard", cost = 499 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use dealcalc_core::validation::{parse_amount, parse_rate, validate_price, validate_tax_rate};
use dealcalc_core::{Rate, ShippingKind, ShippingOption};

use crate::error::{CliError, CliResult};

// =============================================================================
// Output Format
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Step table and totals for a terminal.
    #[default]
    Human,
    /// The calculation as JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: human, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Print the step trace before the totals.
    #[serde(default = "default_true")]
    pub show_steps: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: OutputFormat::default(),
            show_steps: true,
        }
    }
}

/// Fallbacks for fields a params file leaves out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Basis points.
    #[serde(default)]
    pub tax_rate: Rate,

    #[serde(default)]
    pub shipping: ShippingOption,
}

// =============================================================================
// CLI Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub defaults: DefaultSettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cli.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file at the default location is not.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        let explicit = config_path.is_some();
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading CLI config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(CliError::ConfigLoadFailed(format!(
                    "{} does not exist",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        validate_tax_rate(self.defaults.tax_rate)
            .map_err(|e| CliError::InvalidConfig(format!("defaults.tax_rate: {}", e)))?;
        validate_price(self.defaults.shipping.cost)
            .map_err(|e| CliError::InvalidConfig(format!("defaults.shipping: {}", e)))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies `DEALCALC_*` overrides read through `lookup`.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(format) = lookup("DEALCALC_FORMAT") {
            match format.parse() {
                Ok(parsed) => {
                    debug!(format = %format, "Overriding output format from environment");
                    self.output.format = parsed;
                }
                Err(_) => warn!(format = %format, "Unknown output format in environment"),
            }
        }

        if let Some(show) = lookup("DEALCALC_SHOW_STEPS") {
            match show.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.output.show_steps = true,
                "0" | "false" | "no" => self.output.show_steps = false,
                _ => warn!(value = %show, "Unrecognised DEALCALC_SHOW_STEPS value"),
            }
        }

        // Percent text, e.g. "8.25"
        if let Some(rate) = lookup("DEALCALC_TAX_RATE") {
            let parsed = parse_rate(&rate);
            debug!(tax_rate = %parsed, "Overriding default tax rate from environment");
            self.defaults.tax_rate = parsed;
        }

        if let Some(cost) = lookup("DEALCALC_SHIPPING_COST") {
            let cost = parse_amount(&cost);
            debug!(cost = %cost, "Overriding default shipping from environment");
            self.defaults.shipping = if cost.is_positive() {
                let kind = match self.defaults.shipping.kind {
                    ShippingKind::Free => ShippingKind::Standard,
                    kind => kind,
                };
                ShippingOption::paid(kind, cost)
            } else {
                ShippingOption::free()
            };
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "dealcalc", "dealcalc")
            .map(|dirs| dirs.config_dir().join("cli.toml"))
    }
}
