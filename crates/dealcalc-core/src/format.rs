//! # Display Formatting
//!
//! Text forms of a result for people: currency and percentage strings, the
//! copyable price summary, and the one-line share text.
//!
//! ## Summary Layout
//! ```text
//! Price Breakdown:
//! Original Price: $200.00
//! Total Savings: $50.00 (25.0%)
//! Pre-tax Price: $150.00
//! Estimated Tax: $12.00
//! Shipping: FREE
//!
//! FINAL PRICE: $162.00
//! ```

use crate::money::Money;
use crate::types::CalculationResult;

/// `$12.34`. Always the absolute value; callers add their own sign.
///
/// ## Example
/// ```rust
/// use dealcalc_core::format::format_currency;
/// use dealcalc_core::Money;
///
/// assert_eq!(format_currency(Money::from_cents(-1234)), "$12.34");
/// ```
pub fn format_currency(amount: Money) -> String {
    amount.abs().to_string()
}

/// One decimal place and a percent sign: `25.0%`.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

/// Shipping as shown to the customer: `FREE` when nothing is charged.
pub fn format_shipping(cost: Money) -> String {
    if cost.is_positive() {
        format_currency(cost)
    } else {
        "FREE".to_string()
    }
}

/// Multi-line price summary suitable for pasting elsewhere.
pub fn summary_text(result: &CalculationResult) -> String {
    format!(
        "Price Breakdown:\n\
         Original Price: {}\n\
         Total Savings: {} ({})\n\
         Pre-tax Price: {}\n\
         Estimated Tax: {}\n\
         Shipping: {}\n\
         \n\
         FINAL PRICE: {}",
        format_currency(result.original_price),
        format_currency(result.total_savings),
        format_percentage(result.savings_percentage),
        format_currency(result.pre_tax_price),
        format_currency(result.estimated_tax),
        format_shipping(result.shipping_cost),
        format_currency(result.final_price),
    )
}

/// One-line deal summary.
pub fn share_text(result: &CalculationResult) -> String {
    format!(
        "Check out this deal! Original: {} → Final: {} ({} off!)",
        format_currency(result.original_price),
        format_currency(result.final_price),
        format_percentage(result.savings_percentage),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Rate;
    use crate::pipeline::compute_result;
    use crate::types::{CalculationParams, Discount, ShippingKind, ShippingOption};

    fn sample() -> CalculationResult {
        let mut params = CalculationParams::single(Money::from_dollars(200));
        params.coupon = Some(Discount::percentage(Rate::from_bps(2500)));
        params.tax_rate = Rate::from_bps(800);
        compute_result(&params)
    }

    #[test]
    fn test_format_currency_and_percentage() {
        assert_eq!(format_currency(Money::from_cents(5)), "$0.05");
        assert_eq!(format_currency(Money::from_cents(-250)), "$2.50");
        assert_eq!(format_percentage(25.0), "25.0%");
        assert_eq!(format_percentage(33.333), "33.3%");
    }

    #[test]
    fn test_summary_text() {
        let text = summary_text(&sample());
        assert!(text.starts_with("Price Breakdown:"));
        assert!(text.contains("Total Savings: $50.00 (25.0%)"));
        assert!(text.contains("Estimated Tax: $12.00"));
        assert!(text.contains("Shipping: FREE"));
        assert!(text.ends_with("FINAL PRICE: $162.00"));
    }

    #[test]
    fn test_summary_shows_paid_shipping() {
        let mut params = CalculationParams::single(Money::from_dollars(10));
        params.shipping = ShippingOption::paid(ShippingKind::Standard, Money::from_cents(599));
        let text = summary_text(&compute_result(&params));
        assert!(text.contains("Shipping: $5.99"));
    }

    #[test]
    fn test_share_text() {
        assert_eq!(
            share_text(&sample()),
            "Check out this deal! Original: $200.00 → Final: $162.00 (25.0% off!)"
        );
    }
}
