//! # CLI Error Types
//!
//! Failures the `dealcalc` binary can hit before pricing anything. Pricing
//! itself cannot fail; bad input is rejected by validation first.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Configuration          Input                    Output                │
//! │  ─────────────          ─────                    ──────                │
//! │  ConfigLoadFailed       ParamsLoadFailed         RenderFailed          │
//! │  InvalidConfig          InvalidParams                                  │
//! │                         NothingToPrice                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use dealcalc_core::{CoreError, ValidationError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration
    // =========================================================================
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Input
    // =========================================================================
    #[error("Failed to read params: {0}")]
    ParamsLoadFailed(String),

    #[error("Invalid params: {0}")]
    InvalidParams(#[from] ValidationError),

    #[error("Nothing to price: pass a params file or --price")]
    NothingToPrice,

    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Output
    // =========================================================================
    #[error("Failed to render output: {0}")]
    RenderFailed(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigLoadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::RenderFailed(err.to_string())
    }
}
