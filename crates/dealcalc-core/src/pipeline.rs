//! # Price Composition Pipeline
//!
//! Turns a [`CalculationParams`] snapshot into a [`CalculationResult`] and
//! its step trace.
//!
//! ## Application Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Price Composition (fixed order)                      │
//! │                                                                         │
//! │  Cart mode                          Single-item mode                   │
//! │  ─────────                          ────────────────                   │
//! │  subtotal(cart)                     original_price                     │
//! │       │                                   │                             │
//! │       ▼                                   │                             │
//! │  quantity discount                        │                             │
//! │  (re-subtotal regrouped cart)             │                             │
//! │       ▼                                   │                             │
//! │  spend & save                             │                             │
//! │       └──────────────┬────────────────────┘                             │
//! │                      ▼                                                  │
//! │              other discount ─► coupon ─► promo code                     │
//! │                      ▼                                                  │
//! │              PRE-TAX PRICE                                              │
//! │                      ▼                                                  │
//! │              + tax (pre-tax × rate) ─► + shipping (flat)                │
//! │                      ▼                                                  │
//! │              FINAL PRICE                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reordering these stages changes results; the order is part of the
//! contract. Every stage works on the running price left by the one before.
//!
//! ## Example
//! ```rust
//! use dealcalc_core::{compute_result, CalculationParams, Discount, Money, Rate};
//!
//! let mut params = CalculationParams::single(Money::from_dollars(100));
//! params.coupon = Some(Discount::percentage(Rate::from_bps(1000)));
//! params.tax_rate = Rate::from_bps(800);
//!
//! let result = compute_result(&params);
//! assert_eq!(result.pre_tax_price, Money::from_dollars(90));
//! assert_eq!(result.estimated_tax.cents(), 720);
//! assert_eq!(result.final_price.cents(), 9720);
//! ```

use tracing::{debug, trace};

use crate::cart;
use crate::discount::{apply_discount, discount_amount};
use crate::money::Money;
use crate::quantity::apply_best_quantity_discount;
use crate::spend_save::best_spend_save;
use crate::trace::{self as labels, Trace};
use crate::types::{
    Calculation, CalculationParams, CalculationResult, Discount, DiscountBreakdown,
    DiscountSource, StepKind,
};

/// Runs the pipeline once and returns both the result and the trace.
pub fn calculate(params: &CalculationParams) -> Calculation {
    let mut run = Run::default();

    // -------------------------------------------------------------------------
    // Entry: cart or single item
    // -------------------------------------------------------------------------
    let cart_mode = params.is_cart_mode();
    let (original_total, item_count, quantity_rule) = if cart_mode {
        let subtotal = cart::subtotal(&params.cart_items);
        let item_count = cart::total_quantity(&params.cart_items);
        run.open(labels::cart_subtotal_label(item_count), subtotal);

        let outcome = apply_best_quantity_discount(&params.cart_items, &params.quantity_rules);
        run.running = cart::subtotal(&outcome.items);
        let savings = outcome.savings.non_negative();
        run.breakdown.record(DiscountSource::QuantityDiscount, savings);
        if let (Some(rule), true) = (outcome.rule, savings.is_positive()) {
            run.trace.deduction(
                StepKind::QuantityDiscount,
                labels::rule_label(&rule.description, "Quantity Discount"),
                savings,
                run.running,
            );
        }
        (subtotal, item_count, outcome.rule.map(|r| r.id.clone()))
    } else {
        run.open(labels::ORIGINAL_PRICE_LABEL.to_string(), params.original_price);
        (params.original_price, 1, None)
    };
    trace!(cart_mode, running = %run.running, "Pipeline entry priced");

    // -------------------------------------------------------------------------
    // Spend & save (cart only)
    // -------------------------------------------------------------------------
    let spend_save_rule = if cart_mode {
        let spend_save = best_spend_save(run.running, &params.spend_save_rules);
        if let Some(rule) = spend_save.rule {
            run.deduct(
                StepKind::SpendSave,
                DiscountSource::SpendSave,
                labels::rule_label(&rule.description, "Spend & Save"),
                &Discount::fixed(spend_save.reduction),
            );
        }
        spend_save.rule.map(|r| r.id.clone())
    } else {
        None
    };

    // -------------------------------------------------------------------------
    // Other discount, coupon, promo code
    // -------------------------------------------------------------------------
    if let Some(other) = params.other_discount.as_ref().filter(|o| o.discount.is_effective()) {
        run.deduct(
            StepKind::OtherDiscount,
            DiscountSource::OtherDiscount,
            format!("{} {}", other.display_label(), other.discount),
            &other.discount,
        );
    }
    if let Some(coupon) = params.coupon.as_ref().filter(|d| d.is_effective()) {
        run.deduct(
            StepKind::Coupon,
            DiscountSource::Coupon,
            format!("Coupon {}", coupon),
            coupon,
        );
    }
    if let Some(promo) = params.promo_code.as_ref().filter(|d| d.is_effective()) {
        run.deduct(
            StepKind::PromoCode,
            DiscountSource::PromoCode,
            format!("Promo Code {}", promo),
            promo,
        );
    }

    let pre_tax_price = run.running;

    // -------------------------------------------------------------------------
    // Tax and shipping
    // -------------------------------------------------------------------------
    let estimated_tax = pre_tax_price.calculate_tax(params.tax_rate);
    if !params.tax_rate.is_zero() {
        run.add(StepKind::Tax, labels::tax_label(params.tax_rate), estimated_tax);
    }

    let shipping_cost = params.shipping.effective_cost();
    if shipping_cost.is_positive() || params.shipping.is_free() {
        run.add(StepKind::Shipping, labels::shipping_label(&params.shipping), shipping_cost);
    }

    let final_price = pre_tax_price + estimated_tax + shipping_cost;

    // -------------------------------------------------------------------------
    // Savings
    // -------------------------------------------------------------------------
    let total_savings = original_total - pre_tax_price;
    let savings_percentage = savings_percentage(total_savings, original_total);

    debug!(
        cart_mode,
        original = %original_total,
        pre_tax = %pre_tax_price,
        final_price = %final_price,
        "Price calculated"
    );

    let result = CalculationResult {
        original_price: original_total,
        cart_subtotal: original_total,
        cart_item_count: item_count,
        spend_save_savings: run.breakdown.spend_save,
        quantity_discount_savings: run.breakdown.quantity_discount,
        pre_tax_price,
        total_savings,
        savings_percentage,
        estimated_tax,
        shipping_cost,
        final_price,
        discount_breakdown: run.breakdown,
        applied_quantity_rule: quantity_rule,
        applied_spend_save_rule: spend_save_rule,
    };

    Calculation {
        result,
        steps: run.trace.into_steps(),
    }
}

/// The result for `params`, without the trace.
pub fn compute_result(params: &CalculationParams) -> CalculationResult {
    calculate(params).result
}

/// `savings / original × 100`, or 0 when there is nothing to save from.
pub fn savings_percentage(savings: Money, original: Money) -> f64 {
    if !original.is_positive() {
        return 0.0;
    }
    // Multiply first so whole-number percentages come out exact
    (savings.cents() as f64 * 100.0) / original.cents() as f64
}

/// Running state of one evaluation.
#[derive(Debug, Default)]
struct Run {
    running: Money,
    breakdown: DiscountBreakdown,
    trace: Trace,
}

impl Run {
    fn open(&mut self, description: String, amount: Money) {
        self.running = amount;
        self.trace.opening(description, amount);
    }

    /// Applies `discount` to the running price through the shared
    /// primitives, records the amount, and adds a trace step.
    fn deduct(
        &mut self,
        kind: StepKind,
        source: DiscountSource,
        description: String,
        discount: &Discount,
    ) {
        let amount = discount_amount(self.running, discount);
        self.running = apply_discount(self.running, discount);
        self.breakdown.record(source, amount);
        trace!(?kind, amount = %amount, running = %self.running, "Discount layered");
        if amount.is_positive() {
            self.trace.deduction(kind, description, amount, self.running);
        }
    }

    fn add(&mut self, kind: StepKind, description: String, amount: Money) {
        self.running += amount;
        self.trace.addition(kind, description, amount, self.running);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
