//! # Step Trace
//!
//! The itemized breakdown shown next to a result.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart Subtotal (4 items)                      $200.00   → $200.00      │
//! │  Buy 2+ items, 20% off (Most Expensive)     − $20.00    → $180.00      │
//! │  Spend $150.00 get $30.00 off               − $30.00    → $150.00      │
//! │  Coupon (10%)                               − $15.00    → $135.00      │
//! │  Sales Tax (8%)                             + $10.80    → $145.80      │
//! │  Shipping: free                               $0.00     → $145.80      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps are recorded by the pipeline as it runs ([`crate::pipeline`]), so
//! every `running_total` is the pipeline's own running price, and the last
//! one is the final price.

use crate::money::{Money, Rate};
use crate::pipeline;
use crate::types::{CalculationParams, CalculationStep, ShippingKind, ShippingOption, StepKind};

/// Ordered step recorder used by the pipeline.
#[derive(Debug, Default)]
pub(crate) struct Trace {
    steps: Vec<CalculationStep>,
}

impl Trace {
    /// The starting price. Not a deduction; the running total is the amount.
    pub(crate) fn opening(&mut self, description: String, amount: Money) {
        self.push(StepKind::Subtotal, description, amount, false, amount);
    }

    pub(crate) fn deduction(
        &mut self,
        kind: StepKind,
        description: String,
        amount: Money,
        running_total: Money,
    ) {
        self.push(kind, description, amount, true, running_total);
    }

    pub(crate) fn addition(
        &mut self,
        kind: StepKind,
        description: String,
        amount: Money,
        running_total: Money,
    ) {
        self.push(kind, description, amount, false, running_total);
    }

    pub(crate) fn into_steps(self) -> Vec<CalculationStep> {
        self.steps
    }

    fn push(
        &mut self,
        kind: StepKind,
        description: String,
        amount: Money,
        is_deduction: bool,
        running_total: Money,
    ) {
        self.steps.push(CalculationStep {
            kind,
            description,
            amount,
            is_deduction,
            running_total,
        });
    }
}

/// The ordered trace for `params`.
///
/// Same evaluation as [`pipeline::compute_result`]; use
/// [`pipeline::calculate`] when both are needed.
pub fn compute_steps(params: &CalculationParams) -> Vec<CalculationStep> {
    pipeline::calculate(params).steps
}

// =============================================================================
// Labels
// =============================================================================

pub(crate) fn cart_subtotal_label(units: u64) -> String {
    match units {
        1 => "Cart Subtotal (1 item)".to_string(),
        n => format!("Cart Subtotal ({} items)", n),
    }
}

pub(crate) const ORIGINAL_PRICE_LABEL: &str = "Original Price";

/// Rule descriptions are free text; blank ones get a generic label.
pub(crate) fn rule_label(description: &str, fallback: &str) -> String {
    match description.trim() {
        "" => fallback.to_string(),
        text => text.to_string(),
    }
}

pub(crate) fn tax_label(rate: Rate) -> String {
    format!("Sales Tax ({})", rate)
}

pub(crate) fn shipping_label(shipping: &ShippingOption) -> String {
    if let Some(label) = shipping.label.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        return format!("Shipping: {}", label);
    }
    match shipping.kind {
        ShippingKind::Free => "Shipping: free".to_string(),
        ShippingKind::Standard => "Shipping: standard".to_string(),
        ShippingKind::Express => "Shipping: express".to_string(),
        ShippingKind::Custom => "Shipping: custom".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_subtotal_label() {
        assert_eq!(cart_subtotal_label(1), "Cart Subtotal (1 item)");
        assert_eq!(cart_subtotal_label(4), "Cart Subtotal (4 items)");
    }

    #[test]
    fn test_rule_label_fallback() {
        assert_eq!(rule_label("  ", "Spend & Save"), "Spend & Save");
        assert_eq!(rule_label("Spend $50 get $5 off", "x"), "Spend $50 get $5 off");
    }

    #[test]
    fn test_tax_and_shipping_labels() {
        assert_eq!(tax_label(Rate::from_bps(825)), "Sales Tax (8.25%)");
        assert_eq!(shipping_label(&ShippingOption::free()), "Shipping: free");

        let mut express = ShippingOption::paid(ShippingKind::Express, Money::from_cents(1500));
        assert_eq!(shipping_label(&express), "Shipping: express");
        express.label = Some("Overnight".to_string());
        assert_eq!(shipping_label(&express), "Shipping: Overnight");

        let custom = ShippingOption::paid(ShippingKind::Custom, Money::from_cents(700));
        assert_eq!(shipping_label(&custom), "Shipping: custom");
    }

    #[test]
    fn test_recorder_keeps_order() {
        let mut trace = Trace::default();
        trace.opening("Original Price".to_string(), Money::from_dollars(10));
        trace.deduction(
            StepKind::Coupon,
            "Coupon ($1.00)".to_string(),
            Money::from_dollars(1),
            Money::from_dollars(9),
        );
        let steps = trace.into_steps();
        assert_eq!(steps.len(), 2);
        assert!(!steps[0].is_deduction);
        assert_eq!(steps[0].running_total, Money::from_dollars(10));
        assert!(steps[1].is_deduction);
        assert_eq!(steps[1].running_total, Money::from_dollars(9));
    }
}
