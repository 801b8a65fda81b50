//! # Params File
//!
//! The JSON document the CLI prices. Same shape as `CalculationParams`,
//! except `taxRate` and `shipping` may be left out to pick up the
//! configured defaults.
//!
//! ```json
//! {
//!   "cartItems": [{ "id": "1", "name": "Shirt", "price": 5000, "quantity": 4 }],
//!   "coupon": { "kind": "percentage", "value": 1000 }
//! }
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use dealcalc_core::{CalculationParams, Money, Rate, ShippingOption};

use crate::config::DefaultSettings;
use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamsFile {
    #[serde(default)]
    tax_rate: Option<Rate>,

    #[serde(default)]
    shipping: Option<ShippingOption>,

    #[serde(flatten)]
    params: CalculationParams,
}

impl ParamsFile {
    pub fn read(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::ParamsLoadFailed(format!("{}: {}", path.display(), e)))?;
        Self::parse(&contents)
    }

    pub fn parse(json: &str) -> CliResult<Self> {
        serde_json::from_str(json).map_err(|e| CliError::ParamsLoadFailed(e.to_string()))
    }

    /// The params to price, with `defaults` filling whatever the file left
    /// out.
    pub fn into_params(self, defaults: &DefaultSettings) -> CalculationParams {
        let mut params = self.params;
        params.tax_rate = self.tax_rate.unwrap_or(defaults.tax_rate);
        params.shipping = self.shipping.unwrap_or_else(|| defaults.shipping.clone());
        debug!(
            cart_lines = params.cart_items.len(),
            tax_rate = %params.tax_rate,
            "Params resolved"
        );
        params
    }
}

/// Single-item override from the command line: prices `price` with
/// everything else from `base` except the cart.
pub fn with_single_price(mut base: CalculationParams, price: Money) -> CalculationParams {
    base.cart_items.clear();
    base.original_price = price;
    base
}
