//! # Domain Types
//!
//! Value types the pricing engine consumes and produces.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT: CalculationParams                                               │
//! │  ├── original_price (single mode)   ├── cart_items: Vec<CartItem>      │
//! │  ├── spend_save_rules               ├── quantity_rules                 │
//! │  ├── other_discount: Option<OtherDiscount>                             │
//! │  ├── coupon / promo_code: Option<Discount>                             │
//! │  ├── tax_rate: Rate                 └── shipping: ShippingOption       │
//! │                                                                         │
//! │  OUTPUT                                                                 │
//! │  ├── CalculationResult (figures + DiscountBreakdown)                   │
//! │  └── Vec<CalculationStep> (ordered trace)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All amounts are [`Money`] (integer cents) and all percentages are [`Rate`]
//! (basis points). Every type is a plain value: the engine copies what it
//! needs and never mutates caller data.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::{Money, Rate};

// =============================================================================
// Discount
// =============================================================================

/// A single reduction: a percentage of the current price or a fixed amount.
///
/// ## Wire Format
/// ```json
/// { "kind": "percentage", "value": 1000 }   // 10% (basis points)
/// { "kind": "fixed", "value": 500 }         // $5.00 (cents)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    Percentage(Rate),
    Fixed(Money),
}

impl Discount {
    #[inline]
    pub fn percentage(rate: Rate) -> Self {
        Discount::Percentage(rate)
    }

    #[inline]
    pub fn fixed(amount: Money) -> Self {
        Discount::Fixed(amount)
    }

    /// A discount with a zero (or negative) value has no effect and is
    /// treated the same as an absent one.
    pub fn is_effective(&self) -> bool {
        match self {
            Discount::Percentage(rate) => !rate.is_zero(),
            Discount::Fixed(amount) => amount.is_positive(),
        }
    }
}

/// `(10%)` or `($5.00)`, the form used in trace labels.
impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discount::Percentage(rate) => write!(f, "({})", rate),
            Discount::Fixed(amount) => write!(f, "({})", amount),
        }
    }
}

/// Category of an [`OtherDiscount`]. Informational only: it picks the
/// default label and never changes arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountCategory {
    Membership,
    Subscription,
    Bulk,
    #[default]
    Custom,
}

impl DiscountCategory {
    pub fn label(&self) -> &'static str {
        match self {
            DiscountCategory::Membership => "Membership Discount",
            DiscountCategory::Subscription => "Subscription Discount",
            DiscountCategory::Bulk => "Bulk Discount",
            DiscountCategory::Custom => "Other Discount",
        }
    }
}

/// A membership/subscription/bulk/custom discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OtherDiscount {
    pub category: DiscountCategory,
    pub discount: Discount,
    /// Display label; falls back to the category label.
    #[serde(default)]
    pub label: Option<String>,
}

impl OtherDiscount {
    pub fn new(category: DiscountCategory, discount: Discount) -> Self {
        OtherDiscount {
            category,
            discount,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label shown in the trace. Blank labels fall back to the category.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => self.category.label(),
        }
    }
}

// =============================================================================
// Shipping
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingKind {
    #[default]
    Free,
    Standard,
    Express,
    Custom,
}

/// How the order ships. Shipping is a flat cost, never derived from price.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    pub kind: ShippingKind,
    #[serde(default)]
    pub cost: Money,
    #[serde(default)]
    pub label: Option<String>,
}

impl ShippingOption {
    pub fn free() -> Self {
        ShippingOption::default()
    }

    pub fn paid(kind: ShippingKind, cost: Money) -> Self {
        ShippingOption {
            kind,
            cost,
            label: None,
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.kind == ShippingKind::Free
    }

    /// The cost actually charged. `Free` ignores the stored cost.
    pub fn effective_cost(&self) -> Money {
        if self.is_free() {
            Money::zero()
        } else {
            self.cost.non_negative()
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart: one product at one unit price, `quantity` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Caller-assigned identifier, unique within the cart.
    pub id: String,
    pub name: String,
    /// Unit price.
    pub price: Money,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        quantity: u32,
    ) -> Self {
        CartItem {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Rules
// =============================================================================

/// "Spend & save": a fixed reduction once the running subtotal reaches
/// `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SpendSaveRule {
    pub id: String,
    pub threshold: Money,
    pub reduction: Money,
    pub description: String,
    pub enabled: bool,
}

impl SpendSaveRule {
    /// Creates an enabled rule with a generated id and a default
    /// description such as `Spend $100.00 get $20.00 off`.
    pub fn new(threshold: Money, reduction: Money) -> Self {
        SpendSaveRule {
            id: Uuid::new_v4().to_string(),
            threshold,
            reduction,
            description: format!("Spend {} get {} off", threshold, reduction),
            enabled: true,
        }
    }

    /// Replaces the description unless `description` is blank.
    pub fn with_description(mut self, description: &str) -> Self {
        let description = description.trim();
        if !description.is_empty() {
            self.description = description.to_string();
        }
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether this rule can fire against `subtotal`.
    #[inline]
    pub fn applies_to(&self, subtotal: Money) -> bool {
        self.enabled && subtotal >= self.threshold
    }
}

/// Which units of the cart receive a quantity discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuantityStrategy {
    /// The `min_quantity` most expensive units.
    #[default]
    Highest,
    /// The `min_quantity` least expensive units.
    Lowest,
    /// Every unit in the cart.
    All,
}

impl QuantityStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            QuantityStrategy::Highest => "Most Expensive",
            QuantityStrategy::Lowest => "Least Expensive",
            QuantityStrategy::All => "All Items",
        }
    }
}

/// Per-unit discount once the cart holds at least `min_quantity` units.
///
/// ## Pay Rate Convention
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  pay_rate is what the customer PAYS, not what they save.               │
/// │                                                                         │
/// │    pay_rate = 8000 bps (80%)                                            │
/// │    unit $50.00 ──► $40.00          saving: $10.00 (20% off)            │
/// │                                                                         │
/// │  Lower pay_rate = deeper discount. The resolver picks the LOWEST.      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuantityDiscountRule {
    pub id: String,
    pub min_quantity: u32,
    /// Share of the unit price the customer pays for a discounted unit.
    pub pay_rate: Rate,
    pub strategy: QuantityStrategy,
    pub description: String,
    pub enabled: bool,
}

impl QuantityDiscountRule {
    /// Creates an enabled rule with a generated id and a default
    /// description such as `Buy 2+ items, 20% off (Most Expensive)`.
    pub fn new(min_quantity: u32, pay_rate: Rate, strategy: QuantityStrategy) -> Self {
        QuantityDiscountRule {
            id: Uuid::new_v4().to_string(),
            min_quantity,
            pay_rate,
            strategy,
            description: format!(
                "Buy {}+ items, {} off ({})",
                min_quantity,
                pay_rate.complement(),
                strategy.label()
            ),
            enabled: true,
        }
    }

    /// Replaces the description unless `description` is blank.
    pub fn with_description(mut self, description: &str) -> Self {
        let description = description.trim();
        if !description.is_empty() {
            self.description = description.to_string();
        }
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Share of the unit price saved on a discounted unit.
    #[inline]
    pub fn off_rate(&self) -> Rate {
        self.pay_rate.complement()
    }

    /// Price of one discounted unit.
    #[inline]
    pub fn discounted_price(&self, unit_price: Money) -> Money {
        unit_price.percentage(self.pay_rate)
    }

    /// Whether this rule can fire for a cart of `total_quantity` units.
    #[inline]
    pub fn applies_to(&self, total_quantity: u64) -> bool {
        self.enabled && total_quantity >= u64::from(self.min_quantity)
    }
}

// =============================================================================
// Calculation Input
// =============================================================================

/// Everything one calculation needs.
///
/// ## Mode Selection
/// - Cart mode when `cart_items` is non-empty (takes precedence)
/// - Single-item mode otherwise, priced from `original_price`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationParams {
    pub original_price: Money,
    pub cart_items: Vec<CartItem>,
    pub spend_save_rules: Vec<SpendSaveRule>,
    pub quantity_rules: Vec<QuantityDiscountRule>,
    pub other_discount: Option<OtherDiscount>,
    pub coupon: Option<Discount>,
    pub promo_code: Option<Discount>,
    pub tax_rate: Rate,
    pub shipping: ShippingOption,
}

impl CalculationParams {
    /// Single-item parameters with free shipping and no tax.
    pub fn single(original_price: Money) -> Self {
        CalculationParams {
            original_price,
            ..Default::default()
        }
    }

    /// Cart parameters with free shipping and no tax.
    pub fn cart(items: Vec<CartItem>) -> Self {
        CalculationParams {
            cart_items: items,
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_cart_mode(&self) -> bool {
        !self.cart_items.is_empty()
    }
}

// =============================================================================
// Calculation Output
// =============================================================================

/// Amount removed by each discount mechanism. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountBreakdown {
    pub spend_save: Money,
    pub quantity_discount: Money,
    pub other_discount: Money,
    pub coupon: Money,
    pub promo_code: Money,
}

/// Keys of [`DiscountBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountSource {
    QuantityDiscount,
    SpendSave,
    OtherDiscount,
    Coupon,
    PromoCode,
}

impl DiscountBreakdown {
    pub fn get(&self, source: DiscountSource) -> Money {
        match source {
            DiscountSource::QuantityDiscount => self.quantity_discount,
            DiscountSource::SpendSave => self.spend_save,
            DiscountSource::OtherDiscount => self.other_discount,
            DiscountSource::Coupon => self.coupon,
            DiscountSource::PromoCode => self.promo_code,
        }
    }

    pub(crate) fn record(&mut self, source: DiscountSource, amount: Money) {
        let slot = match source {
            DiscountSource::QuantityDiscount => &mut self.quantity_discount,
            DiscountSource::SpendSave => &mut self.spend_save,
            DiscountSource::OtherDiscount => &mut self.other_discount,
            DiscountSource::Coupon => &mut self.coupon,
            DiscountSource::PromoCode => &mut self.promo_code,
        };
        *slot = amount;
    }

    /// Entries in pipeline order.
    pub fn entries(&self) -> [(DiscountSource, Money); 5] {
        [
            (DiscountSource::QuantityDiscount, self.quantity_discount),
            (DiscountSource::SpendSave, self.spend_save),
            (DiscountSource::OtherDiscount, self.other_discount),
            (DiscountSource::Coupon, self.coupon),
            (DiscountSource::PromoCode, self.promo_code),
        ]
    }

    pub fn total(&self) -> Money {
        self.entries().iter().map(|(_, amount)| *amount).sum()
    }
}

/// Snapshot of one calculation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Cart subtotal before discounts in cart mode, else the original price.
    pub original_price: Money,
    pub cart_subtotal: Money,
    /// Total units in cart mode, 1 in single-item mode.
    pub cart_item_count: u64,
    pub spend_save_savings: Money,
    pub quantity_discount_savings: Money,
    pub pre_tax_price: Money,
    pub total_savings: Money,
    /// Display only.
    pub savings_percentage: f64,
    pub estimated_tax: Money,
    pub shipping_cost: Money,
    pub final_price: Money,
    pub discount_breakdown: DiscountBreakdown,
    pub applied_quantity_rule: Option<String>,
    pub applied_spend_save_rule: Option<String>,
}

/// Pipeline stage that produced a [`CalculationStep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Subtotal,
    QuantityDiscount,
    SpendSave,
    OtherDiscount,
    Coupon,
    PromoCode,
    Tax,
    Shipping,
}

/// One line of the itemized trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationStep {
    pub kind: StepKind,
    pub description: String,
    pub amount: Money,
    pub is_deduction: bool,
    /// Running price after this step.
    pub running_total: Money,
}

/// Result and trace from a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub result: CalculationResult,
    pub steps: Vec<CalculationStep>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_wire_format() {
        let json = serde_json::to_string(&Discount::percentage(Rate::from_bps(1000))).unwrap();
        assert_eq!(json, r#"{"kind":"percentage","value":1000}"#);

        let parsed: Discount = serde_json::from_str(r#"{"kind":"fixed","value":500}"#).unwrap();
        assert_eq!(parsed, Discount::fixed(Money::from_cents(500)));
    }

    #[test]
    fn test_discount_is_effective() {
        assert!(Discount::percentage(Rate::from_bps(1)).is_effective());
        assert!(!Discount::percentage(Rate::zero()).is_effective());
        assert!(!Discount::fixed(Money::zero()).is_effective());
        assert!(!Discount::fixed(Money::from_cents(-5)).is_effective());
    }

    #[test]
    fn test_discount_display() {
        assert_eq!(Discount::percentage(Rate::from_bps(1250)).to_string(), "(12.5%)");
        assert_eq!(Discount::fixed(Money::from_cents(500)).to_string(), "($5.00)");
    }

    #[test]
    fn test_other_discount_label_fallback() {
        let discount = Discount::percentage(Rate::from_bps(500));
        let member = OtherDiscount::new(DiscountCategory::Membership, discount);
        assert_eq!(member.display_label(), "Membership Discount");

        let labelled = member.clone().with_label("Gold tier");
        assert_eq!(labelled.display_label(), "Gold tier");

        let blank = member.with_label("   ");
        assert_eq!(blank.display_label(), "Membership Discount");
    }

    #[test]
    fn test_free_shipping_ignores_cost() {
        let mut shipping = ShippingOption::free();
        shipping.cost = Money::from_cents(999);
        assert_eq!(shipping.effective_cost(), Money::zero());

        let express = ShippingOption::paid(ShippingKind::Express, Money::from_cents(1500));
        assert_eq!(express.effective_cost().cents(), 1500);
    }

    #[test]
    fn test_rule_default_descriptions() {
        let spend = SpendSaveRule::new(Money::from_dollars(100), Money::from_dollars(20));
        assert_eq!(spend.description, "Spend $100.00 get $20.00 off");
        assert!(spend.enabled);
        assert!(!spend.id.is_empty());

        let qty = QuantityDiscountRule::new(2, Rate::from_bps(8000), QuantityStrategy::Highest);
        assert_eq!(qty.description, "Buy 2+ items, 20% off (Most Expensive)");
        assert_eq!(qty.off_rate().bps(), 2000);

        let custom = qty.with_description("  Pair deal ");
        assert_eq!(custom.description, "Pair deal");
    }

    #[test]
    fn test_rule_applicability() {
        let spend = SpendSaveRule::new(Money::from_dollars(50), Money::from_dollars(5));
        assert!(spend.applies_to(Money::from_dollars(50)));
        assert!(!spend.applies_to(Money::from_cents(4999)));
        assert!(!spend.disabled().applies_to(Money::from_dollars(500)));

        let qty = QuantityDiscountRule::new(3, Rate::from_bps(9000), QuantityStrategy::All);
        assert!(qty.applies_to(3));
        assert!(!qty.applies_to(2));
    }

    #[test]
    fn test_params_mode() {
        assert!(!CalculationParams::single(Money::from_dollars(10)).is_cart_mode());
        let item = CartItem::new("a", "Mug", Money::from_dollars(10), 1);
        assert!(CalculationParams::cart(vec![item]).is_cart_mode());
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: CalculationParams =
            serde_json::from_str(r#"{ "originalPrice": 10000, "taxRate": 800 }"#).unwrap();
        assert_eq!(params.original_price.cents(), 10000);
        assert_eq!(params.tax_rate.bps(), 800);
        assert!(params.shipping.is_free());
        assert!(params.coupon.is_none());
    }

    #[test]
    fn test_breakdown_entries_and_total() {
        let mut breakdown = DiscountBreakdown::default();
        breakdown.record(DiscountSource::Coupon, Money::from_cents(300));
        breakdown.record(DiscountSource::SpendSave, Money::from_cents(200));
        assert_eq!(breakdown.get(DiscountSource::Coupon).cents(), 300);
        assert_eq!(breakdown.total().cents(), 500);
        assert_eq!(breakdown.entries()[0].0, DiscountSource::QuantityDiscount);
    }
}
